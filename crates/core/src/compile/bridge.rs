//! The embedded bridge script.
//!
//! Every compiled resource carries the same prologue: the protocol version,
//! the whitelist of action types, a single `postAction(type, payload)` that
//! posts the envelope to `window.parent`, and shared button hover feedback.
//! Component handlers only ever reach the host through `postAction`, and the
//! action type in each call comes from [`ActionType`], never a free string.

use crate::action::{ActionType, PROTOCOL_VERSION, TARGET_ORIGIN};

use super::style::js_string;

/// Script prologue shared by every resource.
pub(crate) fn prologue() -> String {
    let whitelist = ActionType::ALL
        .iter()
        .map(|t| js_string(t.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    let origin = js_string(TARGET_ORIGIN);
    format!(
        r#"
  const WIDGETRY_PROTOCOL = {PROTOCOL_VERSION};
  const WIDGETRY_ACTIONS = [{whitelist}];
  function postAction(type, payload) {{
    if (WIDGETRY_ACTIONS.indexOf(type) === -1) {{
      return;
    }}
    window.parent.postMessage({{ type: type, payload: payload }}, {origin});
  }}
  document.querySelectorAll('button').forEach(function (button) {{
    button.addEventListener('mouseenter', function () {{
      this.style.transform = 'translateY(-2px)';
      this.style.boxShadow = '0 6px 16px rgba(0,0,0,0.3)';
    }});
    button.addEventListener('mouseleave', function () {{
      this.style.transform = 'translateY(0)';
      this.style.boxShadow = '';
    }});
  }});
"#
    )
}

/// A `postAction(...)` call for `action` with a JS payload expression.
pub(crate) fn post(action: ActionType, payload_expr: &str) -> String {
    format!("postAction({}, {});", js_string(action.as_str()), payload_expr)
}

/// A complete `<script>` block: prologue followed by component handlers.
pub(crate) fn script_block(handlers: &str) -> String {
    format!("<script>{}{}</script>", prologue(), handlers)
}
