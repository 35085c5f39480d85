//! In-memory storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::{ComponentRecord, UserDataRecord};
use crate::traits::{ComponentRegistry, UserStore};

/// Process-local backend implementing both storage ports.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    components: RwLock<HashMap<String, ComponentRecord>>,
    user_data: RwLock<HashMap<String, UserDataRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded components.
    pub async fn component_count(&self) -> usize {
        self.components.read().await.len()
    }
}

fn check_key(kind: &'static str, key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey {
            kind,
            key: key.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ComponentRegistry for MemoryStore {
    async fn put_component(&self, record: ComponentRecord) -> Result<(), StorageError> {
        check_key("component", &record.component_id)?;
        tracing::debug!(component_id = %record.component_id, kind = %record.kind, "recording component");
        self.components
            .write()
            .await
            .insert(record.component_id.clone(), record);
        Ok(())
    }

    async fn get_component(&self, component_id: &str) -> Result<ComponentRecord, StorageError> {
        self.components
            .read()
            .await
            .get(component_id)
            .cloned()
            .ok_or_else(|| StorageError::ComponentNotFound {
                component_id: component_id.to_string(),
            })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn put_user_data(&self, record: UserDataRecord) -> Result<(), StorageError> {
        check_key("user", &record.user_id)?;
        self.user_data
            .write()
            .await
            .insert(record.user_id.clone(), record);
        Ok(())
    }

    async fn get_user_data(&self, user_id: &str) -> Result<UserDataRecord, StorageError> {
        self.user_data
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| StorageError::UserDataNotFound {
                user_id: user_id.to_string(),
            })
    }
}
