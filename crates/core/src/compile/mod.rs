//! Resource compilers.
//!
//! Each compiler is a pure function `compile(config, id) -> UiResource` that
//! validates its config first and produces no markup on failure. All of them
//! embed structural markup, inline styling, and the shared bridge script.

mod bridge;
pub mod chart;
pub mod custom;
pub mod dashboard;
pub mod form;
mod style;

pub use chart::{bar_heights, pie_slices, PieSlice, BAR_CHART_HEIGHT};
pub use dashboard::WIDGET_BAR_HEIGHT;
pub use style::PIE_PALETTE;

pub(crate) use bridge::{post, script_block};
pub(crate) use style::{container_style, js_string};

use crate::error::CompileError;
use crate::model::{ComponentKind, ComponentRequirements};
use crate::resource::{ComponentId, UiResource};

/// Compile extracted requirements with the compiler matching their kind.
///
/// `id` must have been minted for `requirements.kind`.
pub fn compile_requirements(
    requirements: &ComponentRequirements,
    id: &ComponentId,
) -> Result<UiResource, CompileError> {
    debug_assert_eq!(requirements.kind, id.kind());
    match requirements.kind {
        ComponentKind::Form => form::compile(&requirements.form_config(), id),
        ComponentKind::Dashboard => dashboard::compile(&requirements.dashboard_config(), id),
        ComponentKind::Chart => chart::compile(&requirements.chart_spec(), id),
        ComponentKind::Custom => custom::compile(&requirements.custom_config(), id),
    }
}
