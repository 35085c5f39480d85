/// All errors that can be returned by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No component has been recorded under the given id.
    #[error("component not found: {component_id}")]
    ComponentNotFound { component_id: String },

    /// No payload has been stored for the given user.
    #[error("user data not found: {user_id}")]
    UserDataNotFound { user_id: String },

    /// The key is empty or otherwise unusable as a storage key.
    #[error("invalid {kind} key: {key:?}")]
    InvalidKey { kind: &'static str, key: String },
}
