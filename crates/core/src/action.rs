//! The action envelope: the one message shape embedded content may send to
//! its host.
//!
//! Wire format is `{ "type": <action type>, "payload": { .. } }` with camelCase
//! payload keys. Exactly five types exist. [`ActionEnvelope::from_message`] is
//! the boundary filter: anything outside the set, or with a payload that does
//! not fit its type, is dropped there and never reaches a router.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version of the envelope protocol spoken by the embedded bridge script.
pub const PROTOCOL_VERSION: u32 = 1;

/// Target origin used when posting envelopes to the embedding window.
pub const TARGET_ORIGIN: &str = "*";

/// The closed set of action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Tool,
    Notify,
    FormSubmit,
    DashboardRefresh,
    ChartExport,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::Tool,
        ActionType::Notify,
        ActionType::FormSubmit,
        ActionType::DashboardRefresh,
        ActionType::ChartExport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Tool => "tool",
            ActionType::Notify => "notify",
            ActionType::FormSubmit => "form-submit",
            ActionType::DashboardRefresh => "dashboard-refresh",
            ActionType::ChartExport => "chart-export",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPayload {
    pub tool_name: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyPayload {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmitPayload {
    pub form_id: String,
    /// Flat control name -> value map.
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRefreshPayload {
    pub dashboard_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartExportPayload {
    pub chart_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ActionEnvelope {
    Tool(ToolPayload),
    Notify(NotifyPayload),
    FormSubmit(FormSubmitPayload),
    DashboardRefresh(DashboardRefreshPayload),
    ChartExport(ChartExportPayload),
}

impl ActionEnvelope {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionEnvelope::Tool(_) => ActionType::Tool,
            ActionEnvelope::Notify(_) => ActionType::Notify,
            ActionEnvelope::FormSubmit(_) => ActionType::FormSubmit,
            ActionEnvelope::DashboardRefresh(_) => ActionType::DashboardRefresh,
            ActionEnvelope::ChartExport(_) => ActionType::ChartExport,
        }
    }

    /// Accept a raw inbound message, or drop it.
    ///
    /// Returns `None` when `type` is missing or not one of the five action
    /// types, and when the payload does not match the type. Never fails.
    pub fn from_message(raw: &serde_json::Value) -> Option<Self> {
        let type_name = match raw.get("type").and_then(|t| t.as_str()) {
            Some(t) => t,
            None => {
                tracing::debug!("dropping message without a type");
                return None;
            }
        };
        if ActionType::parse(type_name).is_none() {
            tracing::debug!(message_type = type_name, "dropping message with unrecognized type");
            return None;
        }
        match serde_json::from_value(raw.clone()) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::warn!(message_type = type_name, error = %e, "dropping malformed action envelope");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_each_recognized_type() {
        let messages = [
            json!({"type": "tool", "payload": {"toolName": "applySettings", "params": {"theme": "dark"}}}),
            json!({"type": "notify", "payload": {"message": "hi"}}),
            json!({"type": "form-submit", "payload": {"formId": "f1", "data": {"name": "Ada"}}}),
            json!({"type": "dashboard-refresh", "payload": {"dashboardId": "d1"}}),
            json!({"type": "chart-export", "payload": {"chartId": "c1"}}),
        ];
        for (msg, expected) in messages.iter().zip(ActionType::ALL) {
            let env = ActionEnvelope::from_message(msg).expect("accepted");
            assert_eq!(env.action_type(), expected);
        }
    }

    #[test]
    fn drops_unknown_and_untyped_messages() {
        assert_eq!(ActionEnvelope::from_message(&json!({"type": "ping"})), None);
        assert_eq!(ActionEnvelope::from_message(&json!({"payload": {}})), None);
        assert_eq!(ActionEnvelope::from_message(&json!("notify")), None);
        assert_eq!(ActionEnvelope::from_message(&json!({"type": 3})), None);
    }

    #[test]
    fn drops_recognized_type_with_bad_payload() {
        assert_eq!(
            ActionEnvelope::from_message(&json!({"type": "notify", "payload": {"msg": "x"}})),
            None
        );
        assert_eq!(ActionEnvelope::from_message(&json!({"type": "chart-export"})), None);
    }

    #[test]
    fn tool_params_default_to_null() {
        let env = ActionEnvelope::from_message(
            &json!({"type": "tool", "payload": {"toolName": "setAnimationSpeed"}}),
        )
        .unwrap();
        match env {
            ActionEnvelope::Tool(p) => assert!(p.params.is_null()),
            other => panic!("expected tool, got {other:?}"),
        }
    }

    #[test]
    fn serializes_to_wire_shape() {
        let env = ActionEnvelope::DashboardRefresh(DashboardRefreshPayload {
            dashboard_id: "dashboard-u-1".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"type": "dashboard-refresh", "payload": {"dashboardId": "dashboard-u-1"}})
        );
    }
}
