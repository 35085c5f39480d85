//! RequirementExtractor: free text to [`ComponentRequirements`].
//!
//! Plain keyword matching over the lower-cased description plus one title
//! regex. Deterministic and total: text that matches no category becomes a
//! `custom` component with a canned markup block.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{
    ChartData, ChartKind, ChartWidgetData, ComponentKind, ComponentRequirements, FieldKind,
    FieldSpec, SelectOption, WidgetSpec,
};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title[:\s]+([^,.\n]+)").expect("valid title regex"));

/// Category keywords, checked in priority order. First match wins.
const CATEGORIES: [(ComponentKind, &[&str]); 3] = [
    (ComponentKind::Form, &["form", "input", "submit"]),
    (ComponentKind::Dashboard, &["dashboard", "widget", "metric"]),
    (ComponentKind::Chart, &["chart", "graph", "visualization"]),
];

/// Classify `description` into a component family.
pub fn classify(description: &str) -> ComponentKind {
    let lower = description.to_lowercase();
    CATEGORIES
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(kind, _)| *kind)
        .unwrap_or(ComponentKind::Custom)
}

/// Map free text to a component specification.
pub fn extract(description: &str) -> ComponentRequirements {
    let lower = description.to_lowercase();
    let kind = classify(description);
    let title = extract_title(description).unwrap_or_else(|| default_title(kind).to_string());

    let mut requirements = ComponentRequirements {
        kind,
        title,
        fields: Vec::new(),
        widgets: Vec::new(),
        data: ChartData::default(),
        html: None,
    };
    match kind {
        ComponentKind::Form => requirements.fields = form_fields(&lower),
        ComponentKind::Dashboard => requirements.widgets = dashboard_widgets(&lower),
        ComponentKind::Chart => requirements.data = chart_data(&lower),
        ComponentKind::Custom => requirements.html = Some(custom_markup(&lower).to_string()),
    }
    tracing::debug!(
        kind = %requirements.kind,
        title = %requirements.title,
        fields = requirements.fields.len(),
        widgets = requirements.widgets.len(),
        "extracted requirements"
    );
    requirements
}

/// The trimmed text after `title:` (or `title `), up to the next `,`, `.` or newline.
pub fn extract_title(description: &str) -> Option<String> {
    TITLE_RE
        .captures(description)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn default_title(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Form => "Generated Form",
        ComponentKind::Dashboard => "Generated Dashboard",
        ComponentKind::Chart => "Generated Chart",
        ComponentKind::Custom => "Generated Component",
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// ── Forms ────────────────────────────────────────────────────────────────────

struct FieldTemplate {
    name: &'static str,
    kind: FieldKind,
    label: &'static str,
    required: bool,
    options: &'static [&'static str],
}

const fn field(
    name: &'static str,
    kind: FieldKind,
    label: &'static str,
    required: bool,
) -> FieldTemplate {
    FieldTemplate {
        name,
        kind,
        label,
        required,
        options: &[],
    }
}

/// Keyword dictionary; the keyword is also the field name.
const FIELD_DICTIONARY: [FieldTemplate; 10] = [
    field("name", FieldKind::Text, "Full Name", true),
    field("email", FieldKind::Email, "Email Address", true),
    field("phone", FieldKind::Tel, "Phone Number", false),
    field("message", FieldKind::Textarea, "Message", false),
    field("age", FieldKind::Number, "Age", false),
    FieldTemplate {
        options: &["Male", "Female", "Other"],
        ..field("gender", FieldKind::Select, "Gender", false)
    },
    FieldTemplate {
        options: &["USA", "Canada", "UK", "Other"],
        ..field("country", FieldKind::Select, "Country", false)
    },
    field("subject", FieldKind::Text, "Subject", true),
    field("company", FieldKind::Text, "Company", false),
    field("website", FieldKind::Url, "Website", false),
];

const DEFAULT_FIELDS: [&str; 3] = ["name", "email", "message"];

impl FieldTemplate {
    fn to_spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.name.to_string(),
            kind: self.kind,
            label: self.label.to_string(),
            placeholder: None,
            required: self.required,
            options: (self.kind == FieldKind::Select)
                .then(|| self.options.iter().map(|o| SelectOption::same(o)).collect()),
        }
    }
}

fn form_fields(lower: &str) -> Vec<FieldSpec> {
    let matched: Vec<FieldSpec> = FIELD_DICTIONARY
        .iter()
        .filter(|t| lower.contains(t.name))
        .map(FieldTemplate::to_spec)
        .collect();
    if !matched.is_empty() {
        return matched;
    }
    FIELD_DICTIONARY
        .iter()
        .filter(|t| DEFAULT_FIELDS.contains(&t.name))
        .map(FieldTemplate::to_spec)
        .collect()
}

// ── Dashboards ───────────────────────────────────────────────────────────────

fn users_widget() -> WidgetSpec {
    WidgetSpec::metric("Total Users", "1,234", "Active users")
}

fn activity_widget() -> WidgetSpec {
    WidgetSpec::list(
        "Recent Activities",
        &["User login", "Data update", "Report generated"],
    )
}

fn dashboard_widgets(lower: &str) -> Vec<WidgetSpec> {
    let dictionary: [(&str, fn() -> WidgetSpec); 5] = [
        ("user", users_widget),
        ("sales", || WidgetSpec::metric("Total Sales", "$45,678", "This month")),
        ("revenue", || WidgetSpec::metric("Revenue", "$12,345", "This week")),
        ("activity", activity_widget),
        ("chart", || WidgetSpec::Chart {
            title: "Sales Chart".to_string(),
            data: ChartWidgetData::series(
                vec![100.0, 150.0, 200.0, 175.0],
                strings(&["Q1", "Q2", "Q3", "Q4"]),
            ),
        }),
    ];
    let matched: Vec<WidgetSpec> = dictionary
        .iter()
        .filter(|(keyword, _)| lower.contains(*keyword))
        .map(|(_, make)| make())
        .collect();
    if matched.is_empty() {
        vec![users_widget(), activity_widget()]
    } else {
        matched
    }
}

// ── Charts ───────────────────────────────────────────────────────────────────

fn chart_data(lower: &str) -> ChartData {
    let kind = if contains_any(lower, &["pie", "circle"]) {
        ChartKind::Pie
    } else {
        ChartKind::Bar
    };
    let (values, labels): (&[f64], &[&str]) = if contains_any(lower, &["sales", "revenue"]) {
        (
            &[120.0, 150.0, 180.0, 200.0, 175.0],
            &["Jan", "Feb", "Mar", "Apr", "May"],
        )
    } else if contains_any(lower, &["user", "traffic"]) {
        (
            &[100.0, 120.0, 140.0, 160.0, 180.0],
            &["Mon", "Tue", "Wed", "Thu", "Fri"],
        )
    } else {
        (
            &[50.0, 75.0, 100.0, 125.0, 150.0],
            &["Q1", "Q2", "Q3", "Q4", "Q5"],
        )
    };
    ChartData {
        kind,
        values: values.to_vec(),
        labels: strings(labels),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── Custom ───────────────────────────────────────────────────────────────────

const CARD_STYLE: &str = "padding: 2rem; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; \
background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; border-radius: 12px; \
box-shadow: 0 10px 25px rgba(0,0,0,0.2);";

const PROFILE_CARD: &str = r#"<div class="profile-card" style="__CARD__ max-width: 400px; margin: 0 auto; text-align: center;">
  <div style="width: 80px; height: 80px; border-radius: 50%; background: rgba(255,255,255,0.2); margin: 0 auto 1rem; display: flex; align-items: center; justify-content: center; font-size: 2rem;">&#128100;</div>
  <h2 style="margin-bottom: 0.5rem;">John Doe</h2>
  <p style="margin-bottom: 1rem; opacity: 0.8;">Software Developer</p>
  <div style="display: flex; justify-content: space-around; margin-top: 1.5rem;">
    <div><div style="font-size: 1.5rem; font-weight: bold;">150</div><div style="font-size: 0.9rem; opacity: 0.8;">Projects</div></div>
    <div><div style="font-size: 1.5rem; font-weight: bold;">5+</div><div style="font-size: 0.9rem; opacity: 0.8;">Years</div></div>
    <div><div style="font-size: 1.5rem; font-weight: bold;">4.9</div><div style="font-size: 0.9rem; opacity: 0.8;">Rating</div></div>
  </div>
</div>"#;

const CALL_TO_ACTION: &str = r#"<div class="call-to-action" style="__CARD__ text-align: center;">
  <h2 style="margin-bottom: 1rem;">Call to Action</h2>
  <p style="margin-bottom: 2rem; opacity: 0.9;">Ready to get started? Click the button below!</p>
  <button onclick="postAction('notify', { message: 'Get Started clicked' })" style="padding: 1rem 2rem; border: none; border-radius: 8px; background: linear-gradient(135deg, #10b981 0%, #059669 100%); color: white; font-size: 1.1rem; font-weight: 600; cursor: pointer; transition: all 0.2s; box-shadow: 0 4px 12px rgba(0,0,0,0.2);">Get Started</button>
</div>"#;

const GENERIC_BLOCK: &str = r#"<div class="custom-block" style="__CARD__ text-align: center;">
  <h2 style="margin-bottom: 1rem;">Custom Component</h2>
  <p style="margin-bottom: 1rem; opacity: 0.9;">This is a custom component generated based on your description.</p>
  <div style="display: flex; justify-content: center; gap: 1rem; margin-top: 1.5rem;">
    <button onclick="postAction('notify', { message: 'Action 1' })" style="padding: 0.75rem 1.5rem; border: none; border-radius: 6px; background: rgba(255,255,255,0.2); color: white; cursor: pointer;">Action 1</button>
    <button onclick="postAction('notify', { message: 'Action 2' })" style="padding: 0.75rem 1.5rem; border: none; border-radius: 6px; background: rgba(255,255,255,0.2); color: white; cursor: pointer;">Action 2</button>
  </div>
</div>"#;

fn custom_markup(lower: &str) -> String {
    let block = if contains_any(lower, &["card", "profile"]) {
        PROFILE_CARD
    } else if contains_any(lower, &["button", "cta"]) {
        CALL_TO_ACTION
    } else {
        GENERIC_BLOCK
    };
    block.replace("__CARD__", CARD_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_form_scenario() {
        let req = extract("Create a contact form with name and email");
        assert_eq!(req.kind, ComponentKind::Form);
        assert_eq!(req.title, "Generated Form");
        let fields: Vec<(&str, FieldKind, bool)> = req
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.required))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("name", FieldKind::Text, true),
                ("email", FieldKind::Email, true),
            ]
        );
    }

    #[test]
    fn fields_follow_dictionary_order() {
        let req = extract("form asking for website, country then phone");
        let names: Vec<&str> = req.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["phone", "country", "website"]);
        let country = &req.fields[1];
        assert_eq!(country.options.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn form_without_known_fields_gets_defaults() {
        let req = extract("a feedback form");
        let names: Vec<&str> = req.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "email", "message"]);
        assert_eq!(req.fields[2].kind, FieldKind::Textarea);
    }

    #[test]
    fn category_priority_order() {
        assert_eq!(classify("a dashboard with a submit button"), ComponentKind::Form);
        assert_eq!(classify("dashboard with a chart"), ComponentKind::Dashboard);
        assert_eq!(classify("a GRAPH of things"), ComponentKind::Chart);
        assert_eq!(classify("something nice"), ComponentKind::Custom);
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "Sales dashboard with revenue, user activity and a chart. Title: Weekly";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn title_comes_from_raw_text() {
        let req = extract("Build a form, Title: Join Our Team, with email");
        assert_eq!(req.title, "Join Our Team");
        assert_eq!(extract_title("TITLE Quarterly Numbers.\nmore"), Some("Quarterly Numbers".to_string()));
        assert_eq!(extract_title("no heading here"), None);
    }

    #[test]
    fn dashboard_widgets_from_keywords() {
        let req = extract("dashboard showing revenue and a chart");
        let titles: Vec<&str> = req.widgets.iter().map(|w| w.title()).collect();
        assert_eq!(titles, vec!["Revenue", "Sales Chart"]);

        let fallback = extract("an empty dashboard");
        let titles: Vec<&str> = fallback.widgets.iter().map(|w| w.title()).collect();
        assert_eq!(titles, vec!["Total Users", "Recent Activities"]);
    }

    #[test]
    fn chart_kind_and_dataset() {
        let pie = extract("pie chart of revenue");
        assert_eq!(pie.data.kind, ChartKind::Pie);
        assert_eq!(pie.data.labels[0], "Jan");

        let bar = extract("graph of website traffic");
        assert_eq!(bar.data.kind, ChartKind::Bar);
        assert_eq!(bar.data.values, vec![100.0, 120.0, 140.0, 160.0, 180.0]);

        let generic = extract("a visualization");
        assert_eq!(generic.data.labels, vec!["Q1", "Q2", "Q3", "Q4", "Q5"]);
    }

    #[test]
    fn custom_fallback_picks_a_block() {
        let card = extract("a profile card for Jane");
        assert_eq!(card.kind, ComponentKind::Custom);
        assert!(card.html.as_deref().unwrap_or_default().contains("profile-card"));

        let cta = extract("big CTA");
        assert!(cta.html.as_deref().unwrap_or_default().contains("Get Started"));

        let generic = extract("hello");
        assert!(generic.html.as_deref().unwrap_or_default().contains("Custom Component"));
        assert!(!generic.html.as_deref().unwrap_or_default().contains("__CARD__"));
    }
}
