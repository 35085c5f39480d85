//! Component configuration types.
//!
//! These are the canonical JSON-shaped configs accepted from callers and the
//! normalized [`ComponentRequirements`] produced by the extractor. Wire names
//! are camelCase; `kind` fields also accept the older `type` spelling.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The four component families a resource can be compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Form,
    Dashboard,
    Chart,
    Custom,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Form,
        ComponentKind::Dashboard,
        ComponentKind::Chart,
        ComponentKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Form => "form",
            ComponentKind::Dashboard => "dashboard",
            ComponentKind::Chart => "chart",
            ComponentKind::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Forms ────────────────────────────────────────────────────────────────────

/// Control type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Url,
    Select,
    Textarea,
}

impl FieldKind {
    /// The `type` attribute for single-line `<input>` controls.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Url => "url",
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
        }
    }
}

/// One `<option>` of a select field.
///
/// Deserializes from `{ "value": .., "label": .. }` or from a bare string, in
/// which case the string is both value and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelectOption")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn same(s: &str) -> Self {
        SelectOption {
            value: s.to_string(),
            label: s.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelectOption {
    Bare(String),
    Full {
        value: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<RawSelectOption> for SelectOption {
    fn from(raw: RawSelectOption) -> Self {
        match raw {
            RawSelectOption::Bare(s) => SelectOption::same(&s),
            RawSelectOption::Full { value, label } => SelectOption {
                label: label.unwrap_or_else(|| value.clone()),
                value,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Control name; unique within one form.
    pub name: String,
    #[serde(alias = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Required iff `kind` is `select`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl FieldSpec {
    /// The label to display, falling back to the control name.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.name
        } else {
            &self.label
        }
    }
}

fn default_submit_text() -> String {
    "Submit".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default = "default_submit_text")]
    pub submit_text: String,
}

// ── Dashboards ───────────────────────────────────────────────────────────────

/// Payload of a metric widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

/// Payload of a list widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub items: Vec<String>,
}

/// Payload of a chart widget, as submitted.
///
/// Callers sometimes hand a metric-shaped payload (`value` + `label`) to a
/// chart widget; [`ChartWidgetData::normalize`] turns whatever arrived into a
/// drawable series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartWidgetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A drawable `{values, labels}` series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

impl Series {
    fn no_data() -> Self {
        Series {
            values: vec![0.0],
            labels: vec!["No Data".to_string()],
        }
    }
}

impl ChartWidgetData {
    pub fn series(values: Vec<f64>, labels: Vec<String>) -> Self {
        ChartWidgetData {
            values: Some(values),
            labels: Some(labels),
            ..Default::default()
        }
    }

    /// Coerce the payload into a series.
    ///
    /// A metric-shaped payload (non-empty `value` and `label`, no `values`)
    /// becomes a single bar. A payload still missing either array, or with no
    /// values at all, becomes the `No Data` placeholder bar. Length mismatches
    /// are left for the compiler to reject.
    pub fn normalize(&self) -> Series {
        if self.values.is_none() {
            if let (Some(value), Some(label)) = (&self.value, &self.label) {
                if !value.is_empty() && !label.is_empty() {
                    return Series {
                        values: vec![parse_metric_value(value)],
                        labels: vec![label.clone()],
                    };
                }
            }
        }
        match (&self.values, &self.labels) {
            (Some(values), Some(labels)) if !values.is_empty() => Series {
                values: values.clone(),
                labels: labels.clone(),
            },
            _ => Series::no_data(),
        }
    }
}

/// Parse a display metric such as `"1,234"` into a number.
///
/// Thousands separators are stripped and the leading integer is read; text
/// with no leading digits (`"$45,678"`, `"n/a"`) yields 0.
pub fn parse_metric_value(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let (sign, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<f64>() {
        Ok(n) => sign * n,
        Err(_) => 0.0,
    }
}

/// One dashboard widget. Closed set; one renderer per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", try_from = "RawWidget")]
pub enum WidgetSpec {
    Metric { title: String, data: MetricData },
    List { title: String, data: ListData },
    Chart { title: String, data: ChartWidgetData },
}

impl WidgetSpec {
    pub fn title(&self) -> &str {
        match self {
            WidgetSpec::Metric { title, .. }
            | WidgetSpec::List { title, .. }
            | WidgetSpec::Chart { title, .. } => title,
        }
    }

    pub fn metric(title: &str, value: &str, label: &str) -> Self {
        WidgetSpec::Metric {
            title: title.to_string(),
            data: MetricData {
                value: value.to_string(),
                label: label.to_string(),
            },
        }
    }

    pub fn list(title: &str, items: &[&str]) -> Self {
        WidgetSpec::List {
            title: title.to_string(),
            data: ListData {
                items: items.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum WidgetKind {
    Metric,
    List,
    Chart,
}

#[derive(Deserialize)]
struct RawWidget {
    #[serde(alias = "type")]
    kind: WidgetKind,
    #[serde(default)]
    title: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl TryFrom<RawWidget> for WidgetSpec {
    type Error = String;

    fn try_from(raw: RawWidget) -> Result<Self, Self::Error> {
        let title = raw.title;
        let data = if raw.data.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            raw.data
        };
        Ok(match raw.kind {
            WidgetKind::Metric => WidgetSpec::Metric {
                data: serde_json::from_value(data)
                    .map_err(|e| format!("metric widget '{}': {}", title, e))?,
                title,
            },
            WidgetKind::List => WidgetSpec::List {
                data: serde_json::from_value(data)
                    .map_err(|e| format!("list widget '{}': {}", title, e))?,
                title,
            },
            WidgetKind::Chart => WidgetSpec::Chart {
                data: serde_json::from_value(data)
                    .map_err(|e| format!("chart widget '{}': {}", title, e))?,
                title,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub title: String,
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
}

// ── Charts ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

/// A standalone chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(alias = "type", default)]
    pub kind: ChartKind,
    pub values: Vec<f64>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Chart data extracted from a description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

// ── Custom ───────────────────────────────────────────────────────────────────

/// Arbitrary caller markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub html: String,
}

// ── Requirements ─────────────────────────────────────────────────────────────

/// The normalized specification of a component, ready to compile.
///
/// Only the parts relevant to `kind` are populated; the others stay empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRequirements {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
    #[serde(default)]
    pub data: ChartData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl ComponentRequirements {
    pub fn form_config(&self) -> FormConfig {
        FormConfig {
            title: self.title.clone(),
            fields: self.fields.clone(),
            submit_text: default_submit_text(),
        }
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            title: self.title.clone(),
            widgets: self.widgets.clone(),
        }
    }

    pub fn chart_spec(&self) -> ChartSpec {
        ChartSpec {
            title: self.title.clone(),
            kind: self.data.kind,
            values: self.data.values.clone(),
            labels: self.data.labels.clone(),
        }
    }

    pub fn custom_config(&self) -> CustomConfig {
        CustomConfig {
            title: Some(self.title.clone()),
            html: self.html.clone().unwrap_or_default(),
        }
    }
}

// ── serde helpers ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
