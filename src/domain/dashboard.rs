// ==========================================
// 米厂报表客户端 - 仪表盘领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// KPI 卡片 (GET /user/dashboard/kpi)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardKpi {
    pub todays_sales: f64,
    pub forecast_next_30_days: f64,
    pub total_stock_remaining: f64,
    pub understock_count: u32,
    pub todays_sales_trend: Option<String>,
    pub forecast_trend: Option<String>,
    pub stock_trend: Option<String>,
    pub understock_trend: Option<String>,
}

impl DashboardKpi {
    /// (标签 i18n 键, 值, 趋势) 四张卡片
    pub fn cards(&self) -> Vec<(&'static str, String, Option<String>)> {
        vec![
            (
                "dashboard.kpi.todays_sales",
                format!("{} KG", self.todays_sales),
                self.todays_sales_trend.clone(),
            ),
            (
                "dashboard.kpi.forecast_next_30_days",
                format!("{} KG", self.forecast_next_30_days),
                self.forecast_trend.clone(),
            ),
            (
                "dashboard.kpi.total_stock_remaining",
                format!("{} KG", self.total_stock_remaining),
                self.stock_trend.clone(),
            ),
            (
                "dashboard.kpi.understock_count",
                self.understock_count.to_string(),
                self.understock_trend.clone(),
            ),
        ]
    }
}

// ==========================================
// 图表 (GET /user/dashboard/charts)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardCharts {
    pub rice_sales_last_7_days: Vec<ChartPoint>,
    pub forecasted_demand: Vec<ChartPoint>,
    pub stock_movement: Vec<ChartPoint>,
}

impl DashboardCharts {
    pub fn is_empty(&self) -> bool {
        self.rice_sales_last_7_days.is_empty()
            && self.forecasted_demand.is_empty()
            && self.stock_movement.is_empty()
    }
}

// ==========================================
// 库存水位 (GET /user/dashboard/current-stock-levels)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    #[serde(rename = "type")]
    pub rice_type: String,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub capacity: f64,
}

impl StockLevel {
    /// 占用百分比（容量为 0 时返回 0）
    pub fn fill_percent(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        (self.current / self.capacity * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLevelsResponse {
    #[serde(default)]
    pub stock_levels: Vec<StockLevel>,
}

// ==========================================
// 系统日志 (GET /user/dashboard/system-logs)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemLog {
    #[serde(default)]
    pub icon: String,
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemLogsResponse {
    #[serde(default)]
    pub logs: Vec<SystemLog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_camel_case() {
        let kpi: DashboardKpi = serde_json::from_str(
            r#"{"todaysSales":120,"forecastNext30Days":3400,"totalStockRemaining":900,"understockCount":2,"stockTrend":"-4%"}"#,
        )
        .unwrap();
        assert_eq!(kpi.understock_count, 2);
        assert_eq!(kpi.stock_trend.as_deref(), Some("-4%"));
        assert_eq!(kpi.cards().len(), 4);
    }

    #[test]
    fn test_fill_percent_zero_capacity() {
        let level = StockLevel {
            rice_type: "R".to_string(),
            current: 50.0,
            capacity: 0.0,
        };
        assert_eq!(level.fill_percent(), 0.0);
    }
}
