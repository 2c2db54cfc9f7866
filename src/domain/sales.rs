// ==========================================
// 米厂报表客户端 - 销售领域模型
// ==========================================
// 生命周期: 按页/按过滤条件拉取，不跨会话缓存
// 修改只能通过显式的 update 调用往返后端
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::row::{FieldAccess, FieldValue, TabularRow};
use crate::domain::types::{is_unconstrained, ClosedFilter, SortDirection};

// ==========================================
// SalesRecord - 销售记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: String,
    pub rice_type: String,
    #[serde(default)]
    pub quantity_kg: f64,
    #[serde(default)]
    pub gross_amount: f64,
    #[serde(default)]
    pub price_per_kg: f64,
    #[serde(default)]
    pub closed: bool,
}

/// 销售表可排序字段（与后端 sort_field 参数一致）
pub const SALES_SORT_FIELDS: [&str; 6] = [
    "date",
    "rice_type",
    "quantity_kg",
    "gross_amount",
    "price_per_kg",
    "closed",
];

impl FieldAccess for SalesRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "date" => Some(FieldValue::date_or_text(&self.date)),
            "rice_type" => Some(FieldValue::Text(self.rice_type.clone())),
            "quantity_kg" => Some(FieldValue::Number(self.quantity_kg)),
            "gross_amount" => Some(FieldValue::Number(self.gross_amount)),
            "price_per_kg" => Some(FieldValue::Number(self.price_per_kg)),
            "closed" => Some(FieldValue::Bool(self.closed)),
            _ => None,
        }
    }
}

impl TabularRow for SalesRecord {
    fn headers() -> &'static [&'static str] {
        &[
            "Date",
            "Rice Type",
            "Quantity Kg",
            "Gross Amount",
            "Price Per Kg",
            "Closed",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.rice_type.clone(),
            self.quantity_kg.to_string(),
            self.gross_amount.to_string(),
            self.price_per_kg.to_string(),
            if self.closed { "✅" } else { "❌" }.to_string(),
        ]
    }
}

/// 管理端销售表的行视图（列名与用户端不同）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdminSalesRow<'a>(pub &'a SalesRecord);

impl<'a> AdminSalesRow<'a> {
    pub fn wrap_all(records: &'a [SalesRecord]) -> Vec<AdminSalesRow<'a>> {
        records.iter().map(AdminSalesRow).collect()
    }
}

impl TabularRow for AdminSalesRow<'_> {
    fn headers() -> &'static [&'static str] {
        &[
            "Date",
            "Rice Type",
            "Qty (KG)",
            "Gross Amount",
            "Price/KG",
            "Closed",
        ]
    }

    fn cells(&self) -> Vec<String> {
        self.0.cells()
    }
}

// ==========================================
// 销售表响应
// ==========================================

/// 用户端分页销售表 `{ data, total, page, pages }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesTablePage {
    #[serde(default)]
    pub data: Vec<SalesRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
}

/// 管理端销售表 `{ data }`（服务端不分页）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesTableData {
    #[serde(default)]
    pub data: Vec<SalesRecord>,
}

// ==========================================
// SalesQuery - 销售表过滤状态
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SalesQuery {
    pub rice_type: String,
    pub from_date: String,
    pub to_date: String,
    pub price: String,
    pub closed: ClosedFilter,
    pub sort_field: String,
    pub sort_order: SortDirection,
    pub page: u32,
    pub limit: u32,
}

impl Default for SalesQuery {
    fn default() -> Self {
        Self {
            rice_type: "All".to_string(),
            from_date: String::new(),
            to_date: String::new(),
            price: String::new(),
            closed: ClosedFilter::All,
            sort_field: "date".to_string(),
            sort_order: SortDirection::Asc,
            page: 1,
            limit: 8,
        }
    }
}

impl SalesQuery {
    /// 表头点击: 同字段翻转方向，新字段重置为升序
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field.to_string();
            self.sort_order = SortDirection::Asc;
        }
    }

    /// 过滤条件（不含排序/分页），空白与 All 不下发
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !is_unconstrained(&self.rice_type) {
            pairs.push(("rice_type".to_string(), self.rice_type.trim().to_string()));
        }
        if !self.from_date.trim().is_empty() {
            pairs.push(("from_date".to_string(), self.from_date.trim().to_string()));
        }
        if !self.to_date.trim().is_empty() {
            pairs.push(("to_date".to_string(), self.to_date.trim().to_string()));
        }
        if !self.price.trim().is_empty() {
            pairs.push(("price".to_string(), self.price.trim().to_string()));
        }
        if let Some(closed) = self.closed.as_query_value() {
            pairs.push(("closed".to_string(), closed.to_string()));
        }
        pairs
    }

    /// 完整查询参数（用户端分页表）
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filter_pairs();
        pairs.push(("sort_field".to_string(), self.sort_field.clone()));
        pairs.push(("sort_order".to_string(), self.sort_order.as_str().to_string()));
        pairs.push(("page".to_string(), self.page.max(1).to_string()));
        pairs.push(("limit".to_string(), self.limit.max(1).to_string()));
        pairs
    }
}

// ==========================================
// 写入载荷
// ==========================================

/// 管理端销售记录更新（仅允许三个数值字段）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecordUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<f64>,
}

impl SalesRecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.quantity_kg.is_none() && self.gross_amount.is_none() && self.price_per_kg.is_none()
    }
}

/// 手工录入的一条销售
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub date: String,
    pub rice_type: String,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    #[serde(default)]
    pub closed: bool,
}

// ==========================================
// 数据检索 (Search Data)
// ==========================================

/// 检索结果行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDataRow {
    pub date: String,
    pub rice_type: String,
    #[serde(default)]
    pub quantity_kg: f64,
    #[serde(default)]
    pub price_per_kg: f64,
}

impl TabularRow for SearchDataRow {
    fn headers() -> &'static [&'static str] {
        &["Date", "Rice Type", "Quantity (KG)", "Amount per 1KG (Rs)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.rice_type.clone(),
            self.quantity_kg.to_string(),
            self.price_per_kg.to_string(),
        ]
    }
}

/// 检索请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDataRequest {
    pub rice_type: String,
    pub from_date: String,
    pub to_date: String,
}

/// 可用数据区间
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    #[serde(default)]
    pub min_date: String,
    #[serde(default)]
    pub max_date: String,
}
