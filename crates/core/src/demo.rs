//! A fixed interactive resource exercising the `tool` and `notify` actions.

use crate::action::ActionType;
use crate::compile::{container_style, js_string, script_block};
use crate::resource::UiResource;

pub const SETTINGS_DEMO_URI: &str = "ui://example/interactive-demo";

const THEMES: [(&str, &str); 4] = [
    ("light", "Light Theme"),
    ("dark", "Dark Theme"),
    ("blue", "Blue Theme"),
    ("green", "Green Theme"),
];

const SPEEDS: [(&str, &str); 3] = [("slow", "Slow"), ("normal", "Normal"), ("fast", "Fast")];

const NOTICES: [(&str, &str, &str); 3] = [
    ("Info", "#3b82f6", "This is an info notification!"),
    ("Success", "#10b981", "This is a success notification!"),
    ("Warning", "#f59e0b", "This is a warning notification!"),
];

const LABEL_STYLE: &str = "display: block; margin-bottom: 0.5rem; font-weight: 500;";
const CHOICE_STYLE: &str = "flex: 1; padding: 0.5rem; border: 2px solid rgba(255,255,255,0.3); \
     border-radius: 6px; background: rgba(255,255,255,0.1); color: white; cursor: pointer; transition: all 0.2s;";

/// The settings demo: theme, font size, animation speed and notification buttons.
pub fn settings_demo() -> UiResource {
    let themes: String = THEMES
        .iter()
        .map(|(value, label)| format!(r#"<option value="{value}">{label}</option>"#))
        .collect();
    let speeds: String = SPEEDS
        .iter()
        .map(|(speed, label)| {
            format!(r#"<button onclick="setAnimationSpeed('{speed}')" style="{CHOICE_STYLE}">{label}</button>"#)
        })
        .collect();
    let notices: String = NOTICES
        .iter()
        .map(|(label, color, message)| {
            format!(
                r#"<button onclick="notify('{message}')" style="flex: 1; padding: 0.75rem; border: none; border-radius: 6px; background: {color}; color: white; cursor: pointer; font-weight: 500; transition: all 0.2s;">{label}</button>"#
            )
        })
        .collect();

    let handlers = format!(
        r#"
  document.getElementById('font-size').addEventListener('input', function () {{
    document.getElementById('font-size-value').textContent = this.value + 'px';
  }});
  function setAnimationSpeed(speed) {{
    {speed}
  }}
  function notify(message) {{
    {notify}
  }}
  function applySettings() {{
    {apply}
  }}
"#,
        speed = tool_call("setAnimationSpeed", "{ speed: speed }"),
        notify = crate::compile::post(ActionType::Notify, "{ message: message }"),
        apply = tool_call(
            "applySettings",
            "{ theme: document.getElementById('theme-select').value, fontSize: document.getElementById('font-size').value }"
        ),
    );

    let markup = format!(
        r#"<div class="widgetry-demo" style="{container}">
  <h2 style="margin-bottom: 1.5rem; text-align: center;">Interactive Demo</h2>
  <div style="margin-bottom: 1.5rem;">
    <label for="theme-select" style="{LABEL_STYLE}">Color Theme:</label>
    <select id="theme-select" style="width: 100%; padding: 0.75rem; border: 2px solid rgba(255,255,255,0.3); border-radius: 8px; background: rgba(255,255,255,0.1); color: white; font-size: 1rem;">{themes}</select>
  </div>
  <div style="margin-bottom: 1.5rem;">
    <label for="font-size" style="{LABEL_STYLE}">Font Size:</label>
    <input type="range" id="font-size" min="12" max="24" value="16" style="width: 100%;">
    <div style="text-align: center; margin-top: 0.5rem; font-size: 0.9rem;">Size: <span id="font-size-value">16px</span></div>
  </div>
  <div style="margin-bottom: 1.5rem;">
    <label style="{LABEL_STYLE}">Animation Speed:</label>
    <div style="display: flex; gap: 0.5rem;">{speeds}</div>
  </div>
  <div style="margin-bottom: 1.5rem;">
    <label style="{LABEL_STYLE}">Notifications:</label>
    <div style="display: flex; gap: 0.5rem;">{notices}</div>
  </div>
  <div style="text-align: center;">
    <button onclick="applySettings()" style="padding: 1rem 2rem; border: none; border-radius: 8px; background: linear-gradient(135deg, #10b981 0%, #059669 100%); color: white; font-size: 1.1rem; font-weight: 600; cursor: pointer;">Apply Settings</button>
  </div>
  {script}
</div>"#,
        container = container_style("500px"),
        script = script_block(&handlers),
    );
    UiResource::html(SETTINGS_DEMO_URI, markup)
}

fn tool_call(tool_name: &str, params_expr: &str) -> String {
    crate::compile::post(
        ActionType::Tool,
        &format!("{{ toolName: {}, params: {} }}", js_string(tool_name), params_expr),
    )
}
