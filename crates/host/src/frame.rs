//! Isolated-frame rendering.
//!
//! Markup resources are placed in a sandboxed `<iframe srcdoc>` that may run
//! scripts but has no same-origin access, so the posted action envelope is
//! its only way out.

use widgetry_core::UiResource;

use crate::error::HostError;

/// Sandbox flags applied to every frame.
pub const FRAME_SANDBOX: &str = "allow-scripts";

/// Render `resource` into a sandboxed frame, or fail for non-markup resources.
pub fn try_render_frame(resource: &UiResource) -> Result<String, HostError> {
    if !resource.is_html() {
        return Err(HostError::UnsupportedResource {
            mime_type: resource.mime_type.clone(),
        });
    }
    Ok(format!(
        r#"<iframe class="widgetry-frame" title="{title}" sandbox="{FRAME_SANDBOX}" srcdoc="{doc}" style="width: 100%; height: 600px; border: none; border-radius: 16px; background-color: transparent;"></iframe>"#,
        title = html_escape::encode_double_quoted_attribute(&resource.uri),
        doc = html_escape::encode_double_quoted_attribute(&resource.text),
    ))
}

/// Render `resource`, substituting a visible placeholder for unsupported types.
pub fn render_frame(resource: &UiResource) -> String {
    match try_render_frame(resource) {
        Ok(frame) => frame,
        Err(err) => {
            tracing::warn!(uri = %resource.uri, error = %err, "rendering unsupported resource placeholder");
            format!(
                r#"<div class="widgetry-unsupported">Unsupported resource type: {}</div>"#,
                html_escape::encode_text(&resource.mime_type)
            )
        }
    }
}
