//! Prompt suggestions and the generator catalog.

use crate::model::ComponentKind;

const SUGGESTION_GROUPS: [(&[&str], [&str; 3]); 4] = [
    (
        &["form", "input"],
        [
            "Contact form with name, email, and message fields",
            "Registration form with username, password, and confirm password",
            "Survey form with multiple choice questions",
        ],
    ),
    (
        &["dashboard", "widget"],
        [
            "Analytics dashboard with user metrics and charts",
            "Sales dashboard with revenue and conversion metrics",
            "Project management dashboard with tasks and progress",
        ],
    ),
    (
        &["chart", "graph"],
        [
            "Bar chart showing monthly sales data",
            "Pie chart displaying user demographics",
            "Line chart tracking website traffic over time",
        ],
    ),
    (
        &["card", "profile"],
        [
            "User profile card with avatar and stats",
            "Product card with image, title, and price",
            "Team member card with role and contact info",
        ],
    ),
];

/// Canned follow-up prompts for a partial description.
///
/// Every matching group contributes all of its suggestions, in group order.
pub fn suggest(description: &str) -> Vec<&'static str> {
    let lower = description.to_lowercase();
    SUGGESTION_GROUPS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .flat_map(|(_, suggestions)| suggestions.iter().copied())
        .collect()
}

/// The available generators with a one-line description each.
pub fn templates() -> [(ComponentKind, &'static str); 4] {
    [
        (ComponentKind::Form, "A form component with customizable fields"),
        (ComponentKind::Dashboard, "A dashboard with widgets and metrics"),
        (ComponentKind::Chart, "A data visualization chart"),
        (ComponentKind::Custom, "A custom HTML component"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_additive() {
        let s = suggest("a Dashboard with a chart");
        assert_eq!(s.len(), 6);
        assert_eq!(s[0], "Analytics dashboard with user metrics and charts");
        assert_eq!(s[3], "Bar chart showing monthly sales data");
    }

    #[test]
    fn no_keywords_no_suggestions() {
        assert!(suggest("something").is_empty());
    }

    #[test]
    fn catalog_lists_every_kind_once() {
        let kinds: Vec<ComponentKind> = templates().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, ComponentKind::ALL.to_vec());
    }
}
