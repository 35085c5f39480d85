use serde::{Deserialize, Serialize};

/// What the registry remembers about one generated component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub component_id: String,
    /// Component kind (`form`, `dashboard`, `chart`, `custom`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The config the component was compiled from, as submitted.
    pub config: serde_json::Value,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub created_at: String,
}

/// An opaque payload parked for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataRecord {
    pub user_id: String,
    pub data: serde_json::Value,
}
