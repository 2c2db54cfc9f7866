// ==========================================
// 米厂报表客户端 - 仪表盘 API
// ==========================================
// 职责: 并发获取 KPI/图表/库存水位/系统日志四个面板
// 约定:
// - 四个请求全部结束后才清除页面级 loading
// - 单个面板失败只影响该面板，不中断其它请求
// ==========================================

use std::fmt;
use std::str::FromStr;

use crate::api::error::{ApiError, ApiResult};
use crate::client::{ClientResult, DashboardClient};
use crate::domain::dashboard::{DashboardCharts, DashboardKpi, StockLevel, SystemLog};
use crate::engine::fetch_state::FetchState;

/// 仪表盘面板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPanel {
    Kpi,
    Charts,
    StockLevels,
    SystemLogs,
}

impl DashboardPanel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardPanel::Kpi => "kpi",
            DashboardPanel::Charts => "charts",
            DashboardPanel::StockLevels => "stock-levels",
            DashboardPanel::SystemLogs => "system-logs",
        }
    }
}

impl fmt::Display for DashboardPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardPanel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "kpi" => Ok(DashboardPanel::Kpi),
            "charts" => Ok(DashboardPanel::Charts),
            "stock-levels" | "stock" => Ok(DashboardPanel::StockLevels),
            "system-logs" | "logs" => Ok(DashboardPanel::SystemLogs),
            other => Err(ApiError::InvalidInput(format!("未知面板: {}", other))),
        }
    }
}

/// 仪表盘页面状态
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    /// 页面级 loading
    pub loading: bool,
    pub kpi: FetchState<DashboardKpi>,
    pub charts: FetchState<DashboardCharts>,
    pub stock_levels: FetchState<Vec<StockLevel>>,
    pub system_logs: FetchState<Vec<SystemLog>>,
}

impl DashboardView {
    pub fn failed_panels(&self) -> Vec<DashboardPanel> {
        let mut failed = Vec::new();
        if self.kpi.is_failed() {
            failed.push(DashboardPanel::Kpi);
        }
        if self.charts.is_failed() {
            failed.push(DashboardPanel::Charts);
        }
        if self.stock_levels.is_failed() {
            failed.push(DashboardPanel::StockLevels);
        }
        if self.system_logs.is_failed() {
            failed.push(DashboardPanel::SystemLogs);
        }
        failed
    }
}

fn settle<T>(panel: DashboardPanel, state: &mut FetchState<T>, result: ClientResult<T>) {
    if let Err(e) = &result {
        tracing::warn!(panel = %panel, error = %e, "仪表盘面板获取失败");
    }
    if let Err(e) = state.resolve(result) {
        tracing::debug!(panel = %panel, error = %e, "忽略状态转换");
    }
}

fn start<T>(panel: DashboardPanel, state: &mut FetchState<T>) {
    let result = if state.is_failed() {
        state.retry()
    } else {
        state.begin()
    };
    if let Err(e) = result {
        tracing::debug!(panel = %panel, error = %e, "忽略状态转换");
    }
}

pub struct DashboardApi {
    client: DashboardClient,
}

impl DashboardApi {
    pub fn new(client: DashboardClient) -> Self {
        Self { client }
    }

    /// 并发加载四个面板
    pub async fn load(&self) -> DashboardView {
        let mut view = DashboardView {
            loading: true,
            ..DashboardView::default()
        };
        start(DashboardPanel::Kpi, &mut view.kpi);
        start(DashboardPanel::Charts, &mut view.charts);
        start(DashboardPanel::StockLevels, &mut view.stock_levels);
        start(DashboardPanel::SystemLogs, &mut view.system_logs);

        let (kpi, charts, stock, logs) = tokio::join!(
            self.client.fetch_kpi(),
            self.client.fetch_charts(),
            self.client.fetch_stock_levels(),
            self.client.fetch_system_logs(),
        );

        settle(DashboardPanel::Kpi, &mut view.kpi, kpi);
        settle(DashboardPanel::Charts, &mut view.charts, charts);
        settle(
            DashboardPanel::StockLevels,
            &mut view.stock_levels,
            stock.map(|r| r.stock_levels),
        );
        settle(
            DashboardPanel::SystemLogs,
            &mut view.system_logs,
            logs.map(|r| r.logs),
        );
        view.loading = false;

        tracing::info!(failed = view.failed_panels().len(), "仪表盘加载完成");
        view
    }

    /// 重试单个失败面板（仅 Failed 状态允许）
    pub async fn retry(&self, view: &mut DashboardView, panel: DashboardPanel) -> ApiResult<()> {
        match panel {
            DashboardPanel::Kpi => {
                view.kpi.retry()?;
                let result = self.client.fetch_kpi().await;
                settle(panel, &mut view.kpi, result);
            }
            DashboardPanel::Charts => {
                view.charts.retry()?;
                let result = self.client.fetch_charts().await;
                settle(panel, &mut view.charts, result);
            }
            DashboardPanel::StockLevels => {
                view.stock_levels.retry()?;
                let result = self.client.fetch_stock_levels().await.map(|r| r.stock_levels);
                settle(panel, &mut view.stock_levels, result);
            }
            DashboardPanel::SystemLogs => {
                view.system_logs.retry()?;
                let result = self.client.fetch_system_logs().await.map(|r| r.logs);
                settle(panel, &mut view.system_logs, result);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_parse() {
        assert_eq!("stock_levels".parse::<DashboardPanel>().unwrap(), DashboardPanel::StockLevels);
        assert_eq!("KPI".parse::<DashboardPanel>().unwrap(), DashboardPanel::Kpi);
        assert!("weather".parse::<DashboardPanel>().is_err());
    }

    #[test]
    fn test_failed_panels() {
        let view = DashboardView {
            charts: FetchState::Failed("500".to_string()),
            ..DashboardView::default()
        };
        assert_eq!(view.failed_panels(), vec![DashboardPanel::Charts]);
    }
}
