//! HostActionRouter: boundary filter plus typed dispatch of inbound actions.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use widgetry_core::action::{ActionEnvelope, ActionType, ToolPayload};

use crate::notification::{Notification, NotificationQueue, Severity};
use crate::tool::{HostSettings, ToolCall};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// How long each notification stays visible.
    pub notification_ttl: Duration,
    /// How many form submissions are retained; older ones are dropped first.
    pub max_submissions: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            notification_ttl: Duration::from_secs(5),
            max_submissions: 100,
        }
    }
}

/// One received `form-submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub form_id: String,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Host-side state driven by messages from embedded content.
///
/// Submissions are kept in a window of the most recent
/// [`RouterConfig::max_submissions`] entries.
pub struct HostActionRouter {
    notifications: NotificationQueue,
    settings: RwLock<HostSettings>,
    submissions: Mutex<VecDeque<Submission>>,
    max_submissions: usize,
}

impl Default for HostActionRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}

impl HostActionRouter {
    pub fn new(config: RouterConfig) -> Self {
        HostActionRouter {
            notifications: NotificationQueue::new(config.notification_ttl),
            settings: RwLock::new(HostSettings::default()),
            submissions: Mutex::new(VecDeque::new()),
            max_submissions: config.max_submissions,
        }
    }

    /// Filter a raw inbound message and route it if it is a valid envelope.
    ///
    /// Returns the routed action type, or `None` when the message was dropped.
    pub async fn receive(&self, raw: &serde_json::Value) -> Option<ActionType> {
        let envelope = ActionEnvelope::from_message(raw)?;
        let action_type = envelope.action_type();
        self.route(envelope).await;
        Some(action_type)
    }

    pub async fn route(&self, action: ActionEnvelope) {
        tracing::debug!(action = %action.action_type(), "routing action");
        match action {
            ActionEnvelope::Tool(payload) => self.run_tool(&payload).await,
            ActionEnvelope::Notify(payload) => {
                self.notifications
                    .push(payload.message, Severity::Info)
                    .await;
            }
            ActionEnvelope::FormSubmit(payload) => {
                let summary = serde_json::Value::Object(payload.data.clone());
                self.notifications
                    .push(format!("Form submitted: {}", summary), Severity::Success)
                    .await;
                self.record_submission(Submission {
                    form_id: payload.form_id,
                    data: payload.data,
                })
                .await;
            }
            ActionEnvelope::DashboardRefresh(payload) => {
                self.notifications
                    .push(
                        format!("Dashboard refreshed: {}", payload.dashboard_id),
                        Severity::Info,
                    )
                    .await;
            }
            ActionEnvelope::ChartExport(payload) => {
                self.notifications
                    .push(format!("Chart exported: {}", payload.chart_id), Severity::Success)
                    .await;
            }
        }
    }

    async fn record_submission(&self, submission: Submission) {
        if self.max_submissions == 0 {
            return;
        }
        let mut submissions = self.submissions.lock().await;
        while submissions.len() >= self.max_submissions {
            if let Some(dropped) = submissions.pop_front() {
                tracing::debug!(form_id = %dropped.form_id, "dropping oldest submission");
            }
        }
        submissions.push_back(submission);
    }

    async fn run_tool(&self, payload: &ToolPayload) {
        match ToolCall::parse(payload) {
            Ok(call) => {
                let mut settings = self.settings.write().await;
                call.apply(&mut settings);
                tracing::info!(
                    tool = %payload.tool_name,
                    theme = %settings.theme,
                    font_size = settings.font_size,
                    animation_speed = ?settings.animation_speed,
                    "applied tool call"
                );
            }
            Err(err) => {
                tracing::warn!(tool = %payload.tool_name, error = %err, "ignoring tool call");
            }
        }
    }

    /// Currently visible notifications, oldest first.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.snapshot().await
    }

    pub async fn settings(&self) -> HostSettings {
        self.settings.read().await.clone()
    }

    /// Received form submissions, oldest first.
    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().await.iter().cloned().collect()
    }
}
