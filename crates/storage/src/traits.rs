use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::{ComponentRecord, UserDataRecord};

/// Component id -> last-known `{type, config}` record.
///
/// Used for later introspection only; compilers never read from it.
/// `put_component` overwrites any earlier record with the same id.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can be
/// shared behind an `Arc` by the factory and any number of concurrent callers.
#[async_trait]
pub trait ComponentRegistry: Send + Sync + 'static {
    /// Record (or replace) the component stored under `record.component_id`.
    ///
    /// Returns `Err(StorageError::InvalidKey)` if the id is empty.
    async fn put_component(&self, record: ComponentRecord) -> Result<(), StorageError>;

    /// Fetch the record for `component_id`.
    ///
    /// Returns `Err(StorageError::ComponentNotFound)` if nothing was recorded.
    async fn get_component(&self, component_id: &str) -> Result<ComponentRecord, StorageError>;
}

/// User id -> opaque payload. Round-trips the payload unchanged.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Store (or replace) the payload for `record.user_id`.
    async fn put_user_data(&self, record: UserDataRecord) -> Result<(), StorageError>;

    /// Fetch the payload for `user_id`.
    ///
    /// Returns `Err(StorageError::UserDataNotFound)` if nothing was stored.
    async fn get_user_data(&self, user_id: &str) -> Result<UserDataRecord, StorageError>;
}
