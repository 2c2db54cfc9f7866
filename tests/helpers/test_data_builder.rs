// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 构建后端 JSON 响应体
// ==========================================

use serde_json::{json, Value};

// ==========================================
// 销售记录构建器
// ==========================================

pub struct SalesRecordBuilder {
    id: String,
    date: String,
    rice_type: String,
    quantity_kg: f64,
    price_per_kg: f64,
    closed: bool,
}

impl SalesRecordBuilder {
    pub fn new(id: &str, date: &str) -> Self {
        Self {
            id: id.to_string(),
            date: date.to_string(),
            rice_type: "SIERRA RED RAW RICE -5KG".to_string(),
            quantity_kg: 10.0,
            price_per_kg: 250.0,
            closed: false,
        }
    }

    pub fn rice_type(mut self, rice_type: &str) -> Self {
        self.rice_type = rice_type.to_string();
        self
    }

    pub fn quantity(mut self, quantity_kg: f64) -> Self {
        self.quantity_kg = quantity_kg;
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn build(self) -> Value {
        json!({
            "_id": self.id,
            "date": self.date,
            "rice_type": self.rice_type,
            "quantity_kg": self.quantity_kg,
            "gross_amount": self.quantity_kg * self.price_per_kg,
            "price_per_kg": self.price_per_kg,
            "closed": self.closed,
        })
    }
}

// ==========================================
// 库存批次构建器
// ==========================================

pub struct InventoryBatchBuilder {
    id: String,
    batch_no: String,
    rice_type: String,
    warehouse: String,
    quantity: f64,
    date_received: String,
}

impl InventoryBatchBuilder {
    pub fn new(id: &str, batch_no: &str) -> Self {
        Self {
            id: id.to_string(),
            batch_no: batch_no.to_string(),
            rice_type: "SIERRA WHITE BASMATHI RICE -5KG".to_string(),
            warehouse: "Main".to_string(),
            quantity: 100.0,
            date_received: "2025-04-01".to_string(),
        }
    }

    pub fn warehouse(mut self, warehouse: &str) -> Self {
        self.warehouse = warehouse.to_string();
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn received(mut self, date: &str) -> Self {
        self.date_received = date.to_string();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "id": self.id,
            "riceType": self.rice_type,
            "quantity": self.quantity,
            "warehouse": self.warehouse,
            "batchNo": self.batch_no,
            "dateReceived": self.date_received,
        })
    }
}

// ==========================================
// 报表响应
// ==========================================

pub fn report_summary() -> Value {
    json!({
        "total_sales_kg": 1500.0,
        "total_revenue": 375000.0,
        "most_sold": "SIERRA RED RAW RICE -5KG",
        "least_sold": "SIERRA KEERI SAMBA RICE -5KG",
        "avg_per_day": 50.0,
        "date_range": { "from": "2025-01-01", "to": "2025-01-30" }
    })
}

pub fn model_info() -> Value {
    json!({
        "model_name": "prophet",
        "training_date": "2025-05-01",
        "forecast_horizon_days": 30,
        "total_rice_types_modeled": 2,
        "total_records_used": 1200,
        "per_rice_type_metrics": [
            { "rice_type": "SIERRA RED RAW RICE -5KG", "mae": 3.25, "r2_score": 0.91 },
            { "rice_type": "SIERRA WHITE BASMATHI RICE -5KG", "mae": 4.5, "r2_score": 0.87 }
        ]
    })
}

pub fn forecast_points() -> Value {
    json!([
        { "date": "2025-06-01", "rice_type": "SIERRA RED RAW RICE -5KG", "forecast": 12.5 },
        { "date": "2025-06-02", "rice_type": "SIERRA RED RAW RICE -5KG", "forecast": 13.0 },
        { "date": "2025-06-01", "rice_type": "SIERRA WHITE BASMATHI RICE -5KG", "forecast": 8.0 }
    ])
}

pub fn inventory_impact() -> Value {
    json!([
        {
            "riceType": "SIERRA RED RAW RICE -5KG",
            "current_stock_kg": 100.0,
            "forecast_30_days_qty": 150.0,
            "post_forecast_stock_kg": -50.0,
            "status": "Understock"
        },
        {
            "riceType": "SIERRA WHITE BASMATHI RICE -5KG",
            "current_stock_kg": 400.0,
            "forecast_30_days_qty": 90.0,
            "post_forecast_stock_kg": 310.0,
            "status": "Sufficient"
        }
    ])
}

pub fn rice_breakdown() -> Value {
    json!({
        "data": [
            {
                "rice_type": "SIERRA RED RAW RICE -5KG",
                "total_quantity": 900.0,
                "total_revenue": 225000.0,
                "avg_price_per_kg": 250.0
            }
        ],
        "earliest_date": "2025-01-01",
        "latest_date": "2025-01-30"
    })
}

pub fn inventory_distribution() -> Value {
    json!([
        InventoryBatchBuilder::new("1", "B-100").warehouse("North").build(),
        InventoryBatchBuilder::new("2", "B-200")
            .warehouse("South")
            .quantity(40.0)
            .received("2025-05-10")
            .build(),
    ])
}
