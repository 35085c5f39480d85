//! widgetry-core: turns widget descriptions into self-contained markup
//! resources.
//!
//! The pipeline is text or explicit config, then [`extract()`] (for text), then
//! one of the four compilers in [`compile`], producing a [`UiResource`] whose
//! embedded script reports user interactions as [`ActionEnvelope`] messages.
//!
//! # Public API
//!
//! - [`extract()`] -- free text to [`ComponentRequirements`]
//! - [`compile::form::compile`], [`compile::dashboard::compile`],
//!   [`compile::chart::compile`], [`compile::custom::compile`] -- the compilers
//! - [`ComponentFactory`] -- extraction + compilation + registry recording
//! - [`ActionEnvelope::from_message`] -- the inbound boundary filter
//! - [`suggest()`], [`templates()`], [`demo::settings_demo`]

pub mod action;
pub mod compile;
pub mod demo;
pub mod error;
pub mod extract;
pub mod factory;
pub mod model;
pub mod resource;
pub mod suggest;

// ── Convenience re-exports ───────────────────────────────────────────

pub use action::{ActionEnvelope, ActionType};
pub use compile::compile_requirements;
pub use error::{CompileError, FactoryError};
pub use extract::extract;
pub use factory::{ComponentFactory, FactoryConfig};
pub use model::{
    ChartKind, ChartSpec, ComponentKind, ComponentRequirements, CustomConfig, DashboardConfig,
    FieldKind, FieldSpec, FormConfig, SelectOption, WidgetSpec,
};
pub use resource::{ComponentId, UiResource, HTML_MIME_TYPE};
pub use suggest::{suggest, templates};
