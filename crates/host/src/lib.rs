//! widgetry-host: the embedding side of the action envelope protocol.
//!
//! - [`render_frame`] / [`try_render_frame`] place a resource in a sandboxed frame
//! - [`HostActionRouter`] filters inbound messages and dispatches them
//! - [`NotificationQueue`] holds transient notifications with per-item expiry

mod error;
pub mod frame;
pub mod notification;
pub mod router;
pub mod tool;

pub use error::HostError;
pub use frame::{render_frame, try_render_frame};
pub use notification::{Notification, NotificationQueue, Severity};
pub use router::{HostActionRouter, RouterConfig, Submission};
pub use tool::{AnimationSpeed, HostSettings, ToolCall};
