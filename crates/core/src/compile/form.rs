//! Form compiler: one field block per [`FieldSpec`], submit posts a
//! `form-submit` envelope carrying every named control's value.

use std::collections::HashSet;

use crate::action::ActionType;
use crate::error::CompileError;
use crate::model::{ComponentKind, FieldKind, FieldSpec, FormConfig};
use crate::resource::{ComponentId, UiResource};

use super::bridge;
use super::style::{self, attr, js_string, text};

const FORM_STYLES: &str = r#"<style>
  .form-field { margin-bottom: 1.5rem; }
  .form-field label { display: block; margin-bottom: 0.5rem; font-weight: 500; }
  .form-field input, .form-field select, .form-field textarea {
    width: 100%; padding: 0.75rem; border: 2px solid rgba(255,255,255,0.3); border-radius: 8px;
    background: rgba(255,255,255,0.1); color: white; font-size: 1rem; transition: border-color 0.2s;
  }
  .form-field input:focus, .form-field select:focus, .form-field textarea:focus {
    outline: none; border-color: #10b981;
  }
  .form-field textarea { min-height: 100px; resize: vertical; }
</style>"#;

pub fn compile(config: &FormConfig, id: &ComponentId) -> Result<UiResource, CompileError> {
    validate(config)?;
    let markup = render(config, id.as_str());
    tracing::debug!(component_id = %id, fields = config.fields.len(), "compiled form");
    Ok(UiResource::html(id.uri(), markup))
}

fn validate(config: &FormConfig) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for (i, field) in config.fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(CompileError::validation(
                ComponentKind::Form,
                format!("fields[{}].name", i),
                "field name must not be empty",
            ));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(CompileError::validation(
                ComponentKind::Form,
                format!("fields[{}].name", i),
                format!("duplicate field name '{}'", field.name),
            ));
        }
        if field.kind == FieldKind::Select {
            match &field.options {
                Some(options) if !options.is_empty() => {}
                _ => {
                    return Err(CompileError::validation(
                        ComponentKind::Form,
                        format!("fields[{}].options", i),
                        format!("select field '{}' requires options", field.name),
                    ))
                }
            }
        }
    }
    Ok(())
}

fn render(config: &FormConfig, form_id: &str) -> String {
    let fields: String = config.fields.iter().map(render_field).collect();
    let handler = format!(
        r#"
  function handleFormSubmit(event, formId) {{
    event.preventDefault();
    const data = {{}};
    new FormData(event.target).forEach(function (value, key) {{
      data[key] = value;
    }});
    {post}
    alert('Form submitted successfully!');
  }}
"#,
        post = bridge::post(ActionType::FormSubmit, "{ formId: formId, data: data }")
    );

    format!(
        r#"<div class="widgetry-form" style="{container}">
  <h2 style="margin-bottom: 1.5rem; text-align: center;">{title}</h2>
  <form id="{id}" onsubmit="handleFormSubmit(event, {id_js})">
{fields}
    <div style="text-align: center; margin-top: 2rem;">
      <button type="submit" style="{button}">{submit}</button>
    </div>
  </form>
  {script}
  {styles}
</div>"#,
        container = style::container_style("600px"),
        title = text(&config.title),
        id = attr(form_id),
        id_js = attr(&js_string(form_id)),
        fields = fields,
        button = style::button_style(style::GREEN_GRADIENT),
        submit = text(&config.submit_text),
        script = bridge::script_block(&handler),
        styles = FORM_STYLES,
    )
}

fn render_field(field: &FieldSpec) -> String {
    let name = attr(&field.name);
    let label = text(field.display_label());
    let marker = if field.required { " *" } else { "" };
    let required = if field.required { " required" } else { "" };
    let placeholder = attr(field.placeholder.as_deref().unwrap_or(""));

    let control = match field.kind {
        FieldKind::Select => {
            let options: String = field
                .options
                .iter()
                .flatten()
                .map(|opt| {
                    format!(
                        r#"<option value="{}">{}</option>"#,
                        attr(&opt.value),
                        text(&opt.label)
                    )
                })
                .collect();
            format!(
                r#"<select id="{name}" name="{name}"{required}><option value="">Select {label}</option>{options}</select>"#
            )
        }
        FieldKind::Textarea => format!(
            r#"<textarea id="{name}" name="{name}" placeholder="{placeholder}"{required}></textarea>"#
        ),
        kind => format!(
            r#"<input type="{}" id="{name}" name="{name}" placeholder="{placeholder}"{required}>"#,
            kind.input_type()
        ),
    };

    format!(
        r#"    <div class="form-field" data-field="{name}">
      <label for="{name}">{label}{marker}</label>
      {control}
    </div>
"#
    )
}
