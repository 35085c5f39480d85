//! Shared inline styling and escaping for compiled markup.

use std::borrow::Cow;

/// Colors assigned to pie slices and legend swatches, cycled by index.
pub const PIE_PALETTE: [&str; 5] = ["#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6"];

pub(crate) const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

pub(crate) const GREEN_GRADIENT: &str = "linear-gradient(135deg, #10b981 0%, #059669 100%)";
pub(crate) const BLUE_GRADIENT: &str = "linear-gradient(135deg, #3b82f6 0%, #1d4ed8 100%)";
pub(crate) const AMBER_GRADIENT: &str = "linear-gradient(135deg, #f59e0b 0%, #d97706 100%)";

/// Outer card every compiled component sits in.
pub(crate) fn container_style(max_width: &str) -> String {
    format!(
        "padding: 2rem; font-family: {FONT_STACK}; \
         background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; \
         border-radius: 12px; box-shadow: 0 10px 25px rgba(0,0,0,0.2); \
         max-width: {max_width}; margin: 0 auto;"
    )
}

/// Primary action button.
pub(crate) fn button_style(background: &str) -> String {
    format!(
        "padding: 0.75rem 1.5rem; border: none; border-radius: 8px; background: {background}; \
         color: white; font-size: 1rem; font-weight: 500; cursor: pointer; transition: all 0.2s;"
    )
}

pub(crate) const WIDGET_STYLE: &str = "background: rgba(255,255,255,0.1); padding: 1.5rem; \
     border-radius: 8px; border: 1px solid rgba(255,255,255,0.2);";

/// Escape text placed between tags.
pub(crate) fn text(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape text placed inside a double-quoted attribute.
pub(crate) fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// A JavaScript string literal safe to embed in a `<script>` block or, after
/// [`attr`], in an inline handler attribute.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// Beyond this magnitude an `f64` has no fractional digits to round.
const ROUNDING_LIMIT: f64 = 1e15;

/// Format a chart number to at most two decimals, without a trailing `.0`.
pub(crate) fn number(v: f64) -> String {
    if v.abs() > ROUNDING_LIMIT {
        return format!("{}", v);
    }
    let rounded = (v * 100.0).round() / 100.0;
    format!("{}", rounded)
}
