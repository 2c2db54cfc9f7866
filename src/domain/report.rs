// ==========================================
// 米厂报表客户端 - 报表领域模型
// ==========================================
// 职责: 汇总概览、米种分解
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::row::{format_fixed2, format_grouped, FieldAccess, FieldValue, TabularRow};

fn not_available() -> String {
    "N/A".to_string()
}

// ==========================================
// 汇总概览 (GET /report-summary)
// ==========================================

/// 汇总覆盖的日期区间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default = "not_available")]
    pub from: String,
    #[serde(default = "not_available")]
    pub to: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            from: not_available(),
            to: not_available(),
        }
    }
}

/// 后端缺失的字段按 N/A 处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_sales_kg: Option<f64>,
    #[serde(default)]
    pub total_revenue: Option<f64>,
    #[serde(default = "not_available")]
    pub most_sold: String,
    #[serde(default = "not_available")]
    pub least_sold: String,
    #[serde(default)]
    pub avg_per_day: Option<f64>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl Default for ReportSummary {
    fn default() -> Self {
        Self {
            total_sales_kg: None,
            total_revenue: None,
            most_sold: not_available(),
            least_sold: not_available(),
            avg_per_day: None,
            date_range: DateRange::default(),
        }
    }
}

impl ReportSummary {
    /// 六个带标签字段，顺序固定
    ///
    /// # 返回
    /// (标签 i18n 键, 值) 列表
    pub fn labeled_fields(&self) -> Vec<(&'static str, String)> {
        let or_na = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_else(not_available);
        let revenue = self
            .total_revenue
            .map(|r| format!("Rs. {}", format_grouped(r)))
            .unwrap_or_else(not_available);

        vec![
            ("report.summary.fields.total_sales", or_na(self.total_sales_kg)),
            ("report.summary.fields.total_revenue", revenue),
            ("report.summary.fields.most_sold", self.most_sold.clone()),
            ("report.summary.fields.least_sold", self.least_sold.clone()),
            ("report.summary.fields.avg_daily_sales", or_na(self.avg_per_day)),
            (
                "report.summary.fields.date_range",
                format!("{} to {}", self.date_range.from, self.date_range.to),
            ),
        ]
    }
}

// ==========================================
// 米种分解 (GET /rice-breakdown)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiceBreakdownRow {
    pub rice_type: String,
    #[serde(default)]
    pub total_quantity: f64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub avg_price_per_kg: f64,
}

impl FieldAccess for RiceBreakdownRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "rice_type" => Some(FieldValue::Text(self.rice_type.clone())),
            "total_quantity" => Some(FieldValue::Number(self.total_quantity)),
            "total_revenue" => Some(FieldValue::Number(self.total_revenue)),
            "avg_price_per_kg" => Some(FieldValue::Number(self.avg_price_per_kg)),
            _ => None,
        }
    }
}

impl TabularRow for RiceBreakdownRow {
    fn headers() -> &'static [&'static str] {
        &["Rice Type", "Total Sold (KG)", "Revenue (Rs.)", "Avg Price (Rs.)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rice_type.clone(),
            self.total_quantity.to_string(),
            format!("Rs. {}", format_grouped(self.total_revenue)),
            format!("Rs. {}", format_fixed2(self.avg_price_per_kg)),
        ]
    }
}

/// 分解响应，附带数据的最早/最晚日期（用于初始化日期过滤器）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiceBreakdown {
    #[serde(default)]
    pub data: Vec<RiceBreakdownRow>,
    #[serde(default)]
    pub earliest_date: Option<String>,
    #[serde(default)]
    pub latest_date: Option<String>,
}
