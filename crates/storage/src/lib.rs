//! widgetry-storage: persistence ports for generated components.
//!
//! The generation pipeline never reads these stores back while compiling; they
//! exist so the orchestrating layer can record what it produced and so callers
//! can park opaque per-user payloads. Backends implement [`ComponentRegistry`]
//! and [`UserStore`]; [`MemoryStore`] is the in-process default.

pub mod conformance;
mod error;
mod memory;
mod record;
mod traits;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use record::{ComponentRecord, UserDataRecord};
pub use traits::{ComponentRegistry, UserStore};
