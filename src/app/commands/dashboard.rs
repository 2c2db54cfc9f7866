use comfy_table::Cell;

use crate::app::state::AppState;
use crate::domain::dashboard::{DashboardCharts, DashboardKpi, StockLevel, SystemLog};
use crate::engine::fetch_state::FetchState;
use crate::i18n::{t, t_with_args};
use crate::report::render::{create_standard_table, header_cell};

use super::common::{map_api_error, to_json};

// ==========================================
// 仪表盘命令
// ==========================================

/// 加载四个面板；retry 为真时对失败面板各重试一次
pub async fn dashboard(state: &AppState, retry: bool, json: bool) -> Result<String, String> {
    let mut view = state.dashboard_api.load().await;

    if retry {
        for panel in view.failed_panels() {
            state
                .dashboard_api
                .retry(&mut view, panel)
                .await
                .map_err(map_api_error)?;
        }
    }

    if json {
        return to_json(&serde_json::json!({
            "kpi": view.kpi.data(),
            "charts": view.charts.data(),
            "stock_levels": view.stock_levels.data(),
            "system_logs": view.system_logs.data(),
            "failed_panels": view
                .failed_panels()
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>(),
        }));
    }

    let sections = [
        panel_text(&view.kpi, render_kpi),
        panel_text(&view.charts, render_charts),
        panel_text(&view.stock_levels, |levels| render_stock_levels(levels)),
        panel_text(&view.system_logs, |logs| render_logs(logs)),
    ];
    Ok(sections.join("\n\n"))
}

fn panel_text<T>(state: &FetchState<T>, render: impl Fn(&T) -> String) -> String {
    match state {
        FetchState::Ready(data) => render(data),
        FetchState::Failed(message) => {
            t_with_args("status.failed", &[("message", message.as_str())])
        }
        _ => t("status.loading"),
    }
}

fn render_kpi(kpi: &DashboardKpi) -> String {
    let mut table = create_standard_table();
    table.set_header(vec![header_cell("KPI"), header_cell("Value"), header_cell("Trend")]);
    for (key, value, trend) in kpi.cards() {
        table.add_row(vec![
            Cell::new(t(key)),
            Cell::new(value),
            Cell::new(trend.unwrap_or_default()),
        ]);
    }
    table.to_string()
}

fn render_charts(charts: &DashboardCharts) -> String {
    if charts.is_empty() {
        return t("dashboard.charts.empty");
    }
    let mut table = create_standard_table();
    table.set_header(vec![header_cell("Chart"), header_cell("Name"), header_cell("Value")]);
    let series = [
        ("dashboard.charts.sales_last_7_days", &charts.rice_sales_last_7_days),
        ("dashboard.charts.forecasted_demand", &charts.forecasted_demand),
        ("dashboard.charts.stock_movement", &charts.stock_movement),
    ];
    for (key, points) in series {
        let label = t(key);
        for point in points {
            table.add_row(vec![
                Cell::new(&label),
                Cell::new(&point.name),
                Cell::new(point.value),
            ]);
        }
    }
    table.to_string()
}

fn render_stock_levels(levels: &[StockLevel]) -> String {
    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Rice Type"),
        header_cell("Current"),
        header_cell("Capacity"),
        header_cell("Fill %"),
    ]);
    for level in levels {
        table.add_row(vec![
            Cell::new(&level.rice_type),
            Cell::new(level.current),
            Cell::new(level.capacity),
            Cell::new(format!("{:.1}", level.fill_percent())),
        ]);
    }
    table.to_string()
}

fn render_logs(logs: &[SystemLog]) -> String {
    if logs.is_empty() {
        return t("dashboard.logs.empty");
    }
    let mut table = create_standard_table();
    table.set_header(vec![header_cell("Time"), header_cell("Event")]);
    for log in logs {
        table.add_row(vec![Cell::new(&log.timestamp), Cell::new(&log.description)]);
    }
    table.to_string()
}
