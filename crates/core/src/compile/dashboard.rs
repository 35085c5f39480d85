//! Dashboard compiler: a responsive grid of metric, list and chart widgets.

use crate::action::ActionType;
use crate::error::CompileError;
use crate::model::{ChartWidgetData, ComponentKind, DashboardConfig, ListData, MetricData, WidgetSpec};
use crate::resource::{ComponentId, UiResource};

use super::bridge;
use super::chart::bar_markup;
use super::style::{self, attr, js_string, text, WIDGET_STYLE};

/// Pixel height of the tallest bar inside a chart widget.
pub const WIDGET_BAR_HEIGHT: f64 = 150.0;

pub fn compile(config: &DashboardConfig, id: &ComponentId) -> Result<UiResource, CompileError> {
    let widgets = config
        .widgets
        .iter()
        .enumerate()
        .map(|(i, w)| render_widget(i, w))
        .collect::<Result<String, _>>()?;

    let handler = format!(
        r#"
  function refreshDashboard(dashboardId) {{
    {post}
  }}
"#,
        post = bridge::post(ActionType::DashboardRefresh, "{ dashboardId: dashboardId }")
    );

    let markup = format!(
        r#"<div class="widgetry-dashboard" style="{container}">
  <h2 style="margin-bottom: 2rem; text-align: center;">{title}</h2>
  <div class="widget-grid" style="display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 1.5rem;">{widgets}
  </div>
  <div style="text-align: center; margin-top: 2rem;">
    <button onclick="refreshDashboard({id_js})" style="{button}">Refresh Dashboard</button>
  </div>
  {script}
</div>"#,
        container = style::container_style("800px"),
        title = text(&config.title),
        id_js = attr(&js_string(id.as_str())),
        button = style::button_style(style::BLUE_GRADIENT),
        script = bridge::script_block(&handler),
    );
    tracing::debug!(component_id = %id, widgets = config.widgets.len(), "compiled dashboard");
    Ok(UiResource::html(id.uri(), markup))
}

fn render_widget(index: usize, widget: &WidgetSpec) -> Result<String, CompileError> {
    let (class, body) = match widget {
        WidgetSpec::Metric { data, .. } => ("metric-widget", render_metric(data)),
        WidgetSpec::List { data, .. } => ("list-widget", render_list(data)),
        WidgetSpec::Chart { data, .. } => ("chart-widget", render_chart(index, data)?),
    };
    Ok(format!(
        r#"
    <div class="widget {class}" style="{WIDGET_STYLE}">
      <h3 style="margin-bottom: 1rem; font-size: 1.2rem;">{title}</h3>
      {body}
    </div>"#,
        title = text(widget.title()),
    ))
}

fn render_metric(data: &MetricData) -> String {
    format!(
        r#"<div style="text-align: center;"><div style="font-size: 2rem; font-weight: bold; color: #10b981;">{}</div><div style="font-size: 0.9rem; opacity: 0.8;">{}</div></div>"#,
        text(&data.value),
        text(&data.label)
    )
}

fn render_list(data: &ListData) -> String {
    let items: String = data
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li style="padding: 0.5rem 0; border-bottom: 1px solid rgba(255,255,255,0.1);">{}</li>"#,
                text(item)
            )
        })
        .collect();
    format!(r#"<ul style="list-style: none; padding: 0; margin: 0;">{items}</ul>"#)
}

fn render_chart(index: usize, data: &ChartWidgetData) -> Result<String, CompileError> {
    let series = data.normalize();
    if series.labels.len() != series.values.len() {
        return Err(CompileError::validation(
            ComponentKind::Dashboard,
            format!("widgets[{}].data.labels", index),
            format!(
                "expected {} labels to match values, got {}",
                series.values.len(),
                series.labels.len()
            ),
        ));
    }
    if let Some(i) = series.values.iter().position(|v| !v.is_finite()) {
        return Err(CompileError::validation(
            ComponentKind::Dashboard,
            format!("widgets[{}].data.values[{}]", index, i),
            "value must be finite",
        ));
    }
    Ok(bar_markup(
        &series.values,
        &series.labels,
        WIDGET_BAR_HEIGHT,
        WIDGET_BAR_HEIGHT + 50.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ComponentId {
        ComponentId::new("dynamic", ComponentKind::Dashboard, "u1", 1)
    }

    fn dashboard(widgets: Vec<WidgetSpec>) -> DashboardConfig {
        DashboardConfig {
            title: "Ops".to_string(),
            widgets,
        }
    }

    #[test]
    fn one_block_per_widget() {
        let widgets = vec![
            WidgetSpec::metric("Users", "1,234", "Active users"),
            WidgetSpec::list("Recent", &["login", "update"]),
            WidgetSpec::Chart {
                title: "Sales".to_string(),
                data: ChartWidgetData::series(
                    vec![100.0, 150.0],
                    vec!["Q1".to_string(), "Q2".to_string()],
                ),
            },
        ];
        let res = compile(&dashboard(widgets), &id()).unwrap();
        assert_eq!(res.text.matches(r#"<div class="widget "#).count(), 3);
        assert!(res.text.contains("metric-widget"));
        assert!(res.text.contains(r#"<ul style="list-style: none;"#));
        assert_eq!(res.text.matches(r#"class="bar""#).count(), 2);
        assert!(res.text.contains("height: 150px;"));
        assert!(res.text.contains("height: 100px;"));
    }

    #[test]
    fn empty_dashboard_has_no_widget_blocks() {
        let res = compile(&dashboard(vec![]), &id()).unwrap();
        assert_eq!(res.text.matches(r#"<div class="widget "#).count(), 0);
        assert!(res.text.contains(">Refresh Dashboard</button>"));
    }

    #[test]
    fn metric_shaped_chart_widget_renders_single_bar() {
        let widget: WidgetSpec = serde_json::from_value(serde_json::json!({
            "kind": "chart", "title": "Users", "data": {"value": "1,234", "label": "Users"}
        }))
        .unwrap();
        let res = compile(&dashboard(vec![widget]), &id()).unwrap();
        assert_eq!(res.text.matches(r#"class="bar""#).count(), 1);
        assert!(res.text.contains(">1234</div>"));
        assert!(res.text.contains(">Users</div>"));
    }

    #[test]
    fn empty_chart_widget_renders_no_data_bar() {
        let widget = WidgetSpec::Chart {
            title: "Empty".to_string(),
            data: ChartWidgetData::default(),
        };
        let res = compile(&dashboard(vec![widget]), &id()).unwrap();
        assert!(res.text.contains(">No Data</div>"));
        assert!(res.text.contains("height: 0px;"));
    }

    #[test]
    fn mismatched_chart_widget_is_rejected() {
        let widget = WidgetSpec::Chart {
            title: "Bad".to_string(),
            data: ChartWidgetData::series(vec![1.0, 2.0], vec!["a".to_string()]),
        };
        let err = compile(&dashboard(vec![WidgetSpec::list("x", &[]), widget]), &id()).unwrap_err();
        assert_eq!(err.field(), "widgets[1].data.labels");
    }

    #[test]
    fn refresh_posts_dashboard_refresh() {
        let res = compile(&dashboard(vec![]), &id()).unwrap();
        assert!(res
            .text
            .contains(r#"postAction("dashboard-refresh", { dashboardId: dashboardId });"#));
        assert!(res.text.contains("refreshDashboard(&quot;dashboard-u1-1&quot;)"));
    }
}
