//! Chart compiler: CSS bar charts and conic-gradient pie charts.

use crate::action::ActionType;
use crate::error::CompileError;
use crate::model::{ChartKind, ChartSpec, ComponentKind};
use crate::resource::{ComponentId, UiResource};

use super::bridge;
use super::style::{self, attr, js_string, number, text, PIE_PALETTE};

/// Pixel height of the tallest bar in a standalone chart.
pub const BAR_CHART_HEIGHT: f64 = 200.0;

/// Scale each value linearly against the series maximum.
///
/// `height(v) = v / max * scale`. A non-positive maximum yields all-zero
/// heights, and negative values clamp to zero.
pub fn bar_heights(values: &[f64], scale: f64) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| (v / max * scale).max(0.0))
        .collect()
}

/// One slice of a pie chart, as percentages of the full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub color: &'static str,
    pub start_percent: f64,
    pub end_percent: f64,
}

impl PieSlice {
    pub fn span_degrees(&self) -> f64 {
        (self.end_percent - self.start_percent) * 3.6
    }
}

/// Cumulative slices over the sum of `values`, colored from [`PIE_PALETTE`].
///
/// Callers must ensure the sum is positive; [`compile`] validates this.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().sum();
    let mut start = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let end = start + v / total * 100.0;
            let slice = PieSlice {
                color: PIE_PALETTE[i % PIE_PALETTE.len()],
                start_percent: start,
                end_percent: end,
            };
            start = end;
            slice
        })
        .collect()
}

pub fn compile(spec: &ChartSpec, id: &ComponentId) -> Result<UiResource, CompileError> {
    validate(spec)?;
    let body = match spec.kind {
        ChartKind::Bar => render_bars(spec),
        ChartKind::Pie => render_pie(spec),
    };
    let handler = format!(
        r#"
  function exportChart(chartId) {{
    {post}
  }}
"#,
        post = bridge::post(ActionType::ChartExport, "{ chartId: chartId }")
    );

    let markup = format!(
        r#"<div class="widgetry-chart" style="{container}">
  <h2 style="margin-bottom: 1.5rem; text-align: center;">{title}</h2>
  {body}
  <div style="text-align: center; margin-top: 2rem;">
    <button onclick="exportChart({id_js})" style="{button}">Export Chart</button>
  </div>
  {script}
</div>"#,
        container = style::container_style("600px"),
        title = text(&spec.title),
        id_js = attr(&js_string(id.as_str())),
        button = style::button_style(style::AMBER_GRADIENT),
        script = bridge::script_block(&handler),
    );
    tracing::debug!(component_id = %id, kind = ?spec.kind, points = spec.values.len(), "compiled chart");
    Ok(UiResource::html(id.uri(), markup))
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> Result<(), CompileError> {
    Err(CompileError::validation(ComponentKind::Chart, field, message))
}

fn validate(spec: &ChartSpec) -> Result<(), CompileError> {
    if spec.values.is_empty() {
        return invalid("values", "chart requires at least one value");
    }
    if spec.labels.len() != spec.values.len() {
        return invalid(
            "labels",
            format!(
                "expected {} labels to match values, got {}",
                spec.values.len(),
                spec.labels.len()
            ),
        );
    }
    if let Some(i) = spec.values.iter().position(|v| !v.is_finite()) {
        return invalid(format!("values[{}]", i), "value must be finite");
    }
    if spec.kind == ChartKind::Pie {
        if let Some(i) = spec.values.iter().position(|v| *v < 0.0) {
            return invalid(format!("values[{}]", i), "pie values must not be negative");
        }
        let total = spec.values.iter().sum::<f64>();
        if !total.is_finite() {
            return invalid("values", "pie values must have a finite sum");
        }
        if total <= 0.0 {
            return invalid("values", "pie values must sum to more than 0");
        }
    }
    Ok(())
}

/// Bars plus label row; shared with dashboard chart widgets.
pub(crate) fn bar_markup(values: &[f64], labels: &[String], scale: f64, area: f64) -> String {
    let bars: String = values
        .iter()
        .zip(bar_heights(values, scale))
        .map(|(v, h)| {
            format!(
                r#"
    <div class="bar" style="background: {gradient}; width: 36px; height: {h}px; border-radius: 4px; display: flex; align-items: end; justify-content: center; color: white; font-size: 0.85rem; font-weight: bold;">{v}</div>"#,
                gradient = style::GREEN_GRADIENT,
                h = number(h),
                v = number(*v),
            )
        })
        .collect();
    let label_row: String = labels
        .iter()
        .map(|l| {
            format!(
                r#"<div style="font-size: 0.85rem; opacity: 0.8; text-align: center;">{}</div>"#,
                text(l)
            )
        })
        .collect();
    format!(
        r#"<div style="height: {area}px; display: flex; align-items: end; justify-content: space-around; padding: 1rem;">{bars}
  </div>
  <div style="display: flex; justify-content: space-around; margin-top: 0.5rem;">{label_row}</div>"#,
        area = number(area),
    )
}

fn render_bars(spec: &ChartSpec) -> String {
    bar_markup(&spec.values, &spec.labels, BAR_CHART_HEIGHT, BAR_CHART_HEIGHT + 100.0)
}

fn render_pie(spec: &ChartSpec) -> String {
    let slices = pie_slices(&spec.values);
    let stops = slices
        .iter()
        .map(|s| {
            format!(
                "{} {}% {}%",
                s.color,
                number(s.start_percent),
                number(s.end_percent)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    let legend: String = spec
        .labels
        .iter()
        .zip(&slices)
        .map(|(label, slice)| {
            format!(
                r#"
    <div class="legend-item" style="display: flex; align-items: center; gap: 0.5rem;"><div style="width: 12px; height: 12px; border-radius: 2px; background: {};"></div><span style="font-size: 0.9rem;">{}</span></div>"#,
                slice.color,
                text(label)
            )
        })
        .collect();
    format!(
        r#"<div style="display: flex; align-items: center; justify-content: center; height: 300px;">
    <div class="pie" style="width: 200px; height: 200px; border-radius: 50%; background: conic-gradient({stops});"></div>
  </div>
  <div style="display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; margin-top: 1rem;">{legend}
  </div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: ChartKind, values: &[f64], labels: &[&str]) -> ChartSpec {
        ChartSpec {
            title: "Q".to_string(),
            kind,
            values: values.to_vec(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn id() -> ComponentId {
        ComponentId::new("dynamic", ComponentKind::Chart, "u1", 1)
    }

    #[test]
    fn bar_heights_scale_linearly() {
        let values = [100.0, 150.0, 200.0, 175.0];
        let heights = bar_heights(&values, BAR_CHART_HEIGHT);
        let tallest = heights[2];
        assert_eq!(tallest, BAR_CHART_HEIGHT);
        assert!((heights[0] / tallest - 0.5).abs() < 1e-9);
        for (v, h) in values.iter().zip(&heights) {
            assert!((h / tallest - v / 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_maximum_gives_zero_heights() {
        assert_eq!(bar_heights(&[0.0, 0.0], 200.0), vec![0.0, 0.0]);
        assert_eq!(bar_heights(&[-3.0, -1.0], 200.0), vec![0.0, 0.0]);
        assert!(bar_heights(&[], 200.0).is_empty());
    }

    #[test]
    fn pie_spans_sum_to_full_circle() {
        for values in [
            vec![1.0],
            vec![120.0, 150.0, 180.0, 200.0, 175.0],
            vec![0.1, 0.2, 0.3, 0.0, 7.0, 1e-3, 42.0],
        ] {
            let total: f64 = pie_slices(&values).iter().map(PieSlice::span_degrees).sum();
            assert!((total - 360.0).abs() < 1e-6, "{values:?} -> {total}");
        }
    }

    #[test]
    fn pie_colors_cycle_through_palette() {
        let slices = pie_slices(&[1.0; 7]);
        assert_eq!(slices[0].color, PIE_PALETTE[0]);
        assert_eq!(slices[5].color, PIE_PALETTE[0]);
        assert_eq!(slices[6].color, PIE_PALETTE[1]);
        assert_eq!(slices[1].start_percent, slices[0].end_percent);
    }

    #[test]
    fn bar_chart_markup() {
        let res = compile(
            &spec(ChartKind::Bar, &[100.0, 150.0, 200.0, 175.0], &["Q1", "Q2", "Q3", "Q4"]),
            &id(),
        )
        .unwrap();
        assert_eq!(res.text.matches(r#"class="bar""#).count(), 4);
        assert!(res.text.contains("height: 100px;"));
        assert!(res.text.contains("height: 200px;"));
        assert!(res.text.contains(r#"postAction("chart-export", { chartId: chartId });"#));
        assert!(res.text.contains("exportChart(&quot;chart-u1-1&quot;)"));
    }

    #[test]
    fn pie_chart_markup_has_legend_per_label() {
        let res = compile(&spec(ChartKind::Pie, &[1.0, 3.0], &["a", "b"]), &id()).unwrap();
        assert!(res
            .text
            .contains("conic-gradient(#10b981 0% 25%, #3b82f6 25% 100%)"));
        assert_eq!(res.text.matches(r#"class="legend-item""#).count(), 2);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let cases = [
            (spec(ChartKind::Bar, &[], &[]), "values"),
            (spec(ChartKind::Bar, &[1.0, 2.0], &["a"]), "labels"),
            (spec(ChartKind::Bar, &[f64::NAN], &["a"]), "values[0]"),
            (spec(ChartKind::Pie, &[0.0, 0.0], &["a", "b"]), "values"),
            (spec(ChartKind::Pie, &[2.0, -1.0], &["a", "b"]), "values[1]"),
            (spec(ChartKind::Pie, &[1e308, 1e308], &["a", "b"]), "values"),
        ];
        for (s, field) in cases {
            assert_eq!(compile(&s, &id()).unwrap_err().field(), field, "{s:?}");
        }
    }

    #[test]
    fn huge_bar_values_render_as_numbers() {
        let res = compile(&spec(ChartKind::Bar, &[1e307, 5e306], &["a", "b"]), &id()).unwrap();
        assert!(!res.text.contains("inf"));
        assert!(res.text.contains("height: 200px;"));
        assert!(res.text.contains("height: 100px;"));
    }

    #[test]
    fn all_zero_bar_chart_still_compiles() {
        let res = compile(&spec(ChartKind::Bar, &[0.0, 0.0], &["a", "b"]), &id()).unwrap();
        assert_eq!(res.text.matches("height: 0px;").count(), 2);
    }
}
