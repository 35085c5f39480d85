//! Host tools callable through `tool` actions.

use serde::{Deserialize, Serialize};
use widgetry_core::action::ToolPayload;

use crate::error::HostError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

/// Presentation settings the embedded content may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSettings {
    pub theme: String,
    /// Base font size in px.
    pub font_size: u32,
    pub animation_speed: AnimationSpeed,
}

impl Default for HostSettings {
    fn default() -> Self {
        HostSettings {
            theme: "light".to_string(),
            font_size: 16,
            animation_speed: AnimationSpeed::Normal,
        }
    }
}

/// A recognized tool invocation with decoded params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    ApplySettings { theme: String, font_size: u32 },
    SetAnimationSpeed(AnimationSpeed),
}

pub const APPLY_SETTINGS: &str = "applySettings";
pub const SET_ANIMATION_SPEED: &str = "setAnimationSpeed";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplySettingsParams {
    theme: String,
    font_size: FontSize,
}

/// Range inputs post their value as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum FontSize {
    Number(u32),
    Text(String),
}

#[derive(Deserialize)]
struct SetAnimationSpeedParams {
    speed: AnimationSpeed,
}

impl ToolCall {
    pub fn parse(payload: &ToolPayload) -> Result<Self, HostError> {
        let invalid = |message: String| HostError::InvalidToolParams {
            tool_name: payload.tool_name.clone(),
            message,
        };
        match payload.tool_name.as_str() {
            APPLY_SETTINGS => {
                let params: ApplySettingsParams = serde_json::from_value(payload.params.clone())
                    .map_err(|e| invalid(e.to_string()))?;
                if params.theme.trim().is_empty() {
                    return Err(invalid("theme must not be empty".to_string()));
                }
                let font_size = match params.font_size {
                    FontSize::Number(n) => n,
                    FontSize::Text(s) => s
                        .trim()
                        .trim_end_matches("px")
                        .parse()
                        .map_err(|_| invalid(format!("font size {:?} is not a number", s)))?,
                };
                if font_size == 0 {
                    return Err(invalid("font size must be positive".to_string()));
                }
                Ok(ToolCall::ApplySettings {
                    theme: params.theme,
                    font_size,
                })
            }
            SET_ANIMATION_SPEED => {
                let params: SetAnimationSpeedParams =
                    serde_json::from_value(payload.params.clone())
                        .map_err(|e| invalid(e.to_string()))?;
                Ok(ToolCall::SetAnimationSpeed(params.speed))
            }
            other => Err(HostError::UnknownTool {
                tool_name: other.to_string(),
            }),
        }
    }

    pub fn apply(&self, settings: &mut HostSettings) {
        match self {
            ToolCall::ApplySettings { theme, font_size } => {
                settings.theme = theme.clone();
                settings.font_size = *font_size;
            }
            ToolCall::SetAnimationSpeed(speed) => settings.animation_speed = *speed,
        }
    }
}
