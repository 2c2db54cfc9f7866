// ==========================================
// 米厂报表客户端 - 库存领域模型
// ==========================================
// 生命周期: 与销售记录相同；修改后重新拉取，不做乐观更新
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::row::{FieldAccess, FieldValue, TabularRow};

// ==========================================
// InventoryBatch - 库存批次
// ==========================================
// 用户端返回 `_id`，管理端返回 `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryBatch {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "riceType", default = "not_available")]
    pub rice_type: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default = "not_available")]
    pub warehouse: String,
    #[serde(rename = "batchNo", default = "not_available")]
    pub batch_no: String,
    #[serde(rename = "dateReceived", default = "not_available")]
    pub date_received: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

impl FieldAccess for InventoryBatch {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "rice_type" => Some(FieldValue::Text(self.rice_type.clone())),
            "quantity" => Some(FieldValue::Number(self.quantity)),
            "warehouse" => Some(FieldValue::Text(self.warehouse.clone())),
            "batch_no" => Some(FieldValue::Text(self.batch_no.clone())),
            "date_received" => Some(FieldValue::date_or_text(&self.date_received)),
            _ => None,
        }
    }
}

impl TabularRow for InventoryBatch {
    fn headers() -> &'static [&'static str] {
        &["Rice Type", "Batch No", "Warehouse", "Quantity", "Received Date"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rice_type.clone(),
            self.batch_no.clone(),
            self.warehouse.clone(),
            self.quantity.to_string(),
            self.date_received.clone(),
        ]
    }
}

/// 管理端库存列表 `{ data }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryList {
    #[serde(default)]
    pub data: Vec<InventoryBatch>,
}

// ==========================================
// InventoryRecordInput - 新增/更新载荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecordInput {
    #[serde(rename = "riceType")]
    pub rice_type: String,
    pub quantity: i64,
    pub warehouse: String,
    #[serde(rename = "batchNo")]
    pub batch_no: String,
    #[serde(rename = "dateReceived")]
    pub date_received: String,
}

// ==========================================
// InventoryImpactRow - 预测对库存的影响
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryImpactRow {
    #[serde(rename = "riceType")]
    pub rice_type: String,
    #[serde(default)]
    pub current_stock_kg: f64,
    #[serde(default)]
    pub forecast_30_days_qty: f64,
    #[serde(default)]
    pub post_forecast_stock_kg: f64,
    #[serde(default = "unknown_status")]
    pub status: String,
}

fn unknown_status() -> String {
    "⚠️ Unknown".to_string()
}

impl FieldAccess for InventoryImpactRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "rice_type" => Some(FieldValue::Text(self.rice_type.clone())),
            "current_stock_kg" => Some(FieldValue::Number(self.current_stock_kg)),
            "forecast_30_days_qty" => Some(FieldValue::Number(self.forecast_30_days_qty)),
            "post_forecast_stock_kg" => Some(FieldValue::Number(self.post_forecast_stock_kg)),
            "status" => Some(FieldValue::Text(self.status.clone())),
            _ => None,
        }
    }
}

impl TabularRow for InventoryImpactRow {
    fn headers() -> &'static [&'static str] {
        &["Rice Type", "Current Stock", "Forecast Qty", "Post Forecast", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rice_type.clone(),
            format!("{} KG", self.current_stock_kg),
            format!("{} KG", self.forecast_30_days_qty),
            format!("{} KG", self.post_forecast_stock_kg),
            self.status.clone(),
        ]
    }
}

/// 去重后的取值列表（保持首次出现顺序），用于 "All + 选项" 下拉
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|existing| existing == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_batch_accepts_both_id_spellings() {
        let user: InventoryBatch = serde_json::from_str(
            r#"{"_id":"a1","riceType":"R","quantity":10,"warehouse":"W1","batchNo":"B1","dateReceived":"2025-01-01"}"#,
        )
        .unwrap();
        let admin: InventoryBatch = serde_json::from_str(
            r#"{"id":"a2","riceType":"R","quantity":10,"warehouse":"W1","batchNo":"B1","dateReceived":"2025-01-01"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_deref(), Some("a1"));
        assert_eq!(admin.id.as_deref(), Some("a2"));
    }

    #[test]
    fn test_inventory_batch_missing_fields_default_to_na() {
        let batch: InventoryBatch = serde_json::from_str(r#"{"quantity":3}"#).unwrap();
        assert_eq!(batch.warehouse, "N/A");
        assert_eq!(batch.batch_no, "N/A");
    }

    #[test]
    fn test_impact_cells_have_kg_suffix() {
        let row = InventoryImpactRow {
            rice_type: "R".to_string(),
            current_stock_kg: 120.5,
            forecast_30_days_qty: 80.0,
            post_forecast_stock_kg: 40.5,
            status: "🟢 Healthy".to_string(),
        };
        assert_eq!(row.cells()[1], "120.5 KG");
        assert_eq!(row.cells()[2], "80 KG");
    }

    #[test]
    fn test_distinct_values_keeps_first_order() {
        let values = distinct_values(vec!["W2", "W1", "W2", "W3"]);
        assert_eq!(values, vec!["W2", "W1", "W3"]);
    }
}
