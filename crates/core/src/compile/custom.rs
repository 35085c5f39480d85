//! Custom compiler: caller markup, embedded as given.
//!
//! The snippet gets the bridge prologue so it can call `postAction` like any
//! compiled component; nothing else is added.

use crate::error::CompileError;
use crate::model::{ComponentKind, CustomConfig};
use crate::resource::{ComponentId, UiResource};

use super::bridge;
use super::style::attr;

pub fn compile(config: &CustomConfig, id: &ComponentId) -> Result<UiResource, CompileError> {
    if config.html.trim().is_empty() {
        return Err(CompileError::validation(
            ComponentKind::Custom,
            "html",
            "custom component requires markup",
        ));
    }
    let markup = format!(
        r#"<div class="widgetry-custom" data-component-id="{}">{}{}</div>"#,
        attr(id.as_str()),
        config.html,
        bridge::script_block("")
    );
    Ok(UiResource::html(id.uri(), markup))
}
