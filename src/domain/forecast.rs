// ==========================================
// 米厂报表客户端 - 预测领域模型
// ==========================================
// 只读: 由后端模型输出派生，客户端不做任何预测计算
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::row::{format_fixed2, format_metric, FieldAccess, FieldValue, TabularRow};

// ==========================================
// ForecastPoint - 报表用预测点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub rice_type: String,
    #[serde(default)]
    pub forecast: f64,
}

impl FieldAccess for ForecastPoint {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "date" => Some(FieldValue::date_or_text(&self.date)),
            "rice_type" => Some(FieldValue::Text(self.rice_type.clone())),
            "forecast" => Some(FieldValue::Number(self.forecast)),
            _ => None,
        }
    }
}

impl TabularRow for ForecastPoint {
    fn headers() -> &'static [&'static str] {
        &["Date", "Rice Type", "Forecast (KG)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.rice_type.clone(),
            self.forecast.to_string(),
        ]
    }
}

// ==========================================
// 单米种预测 (GET /forecast?riceType=)
// ==========================================

/// 单日预测量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastQuantity {
    pub date: String,
    #[serde(default)]
    pub quantity: f64,
}

impl TabularRow for ForecastQuantity {
    fn headers() -> &'static [&'static str] {
        &["Date", "Predicted Quantity (KG)"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.date.clone(), format_fixed2(self.quantity)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiceForecast {
    pub rice_type: String,
    #[serde(default)]
    pub forecasts: Vec<ForecastQuantity>,
}

impl RiceForecast {
    /// 导出文件名: 空白替换为下划线
    pub fn export_file_name(&self) -> String {
        let stem: Vec<&str> = self.rice_type.split_whitespace().collect();
        format!("{}_forecast.csv", stem.join("_"))
    }

    pub fn total_quantity(&self) -> f64 {
        self.forecasts.iter().map(|f| f.quantity).sum()
    }
}

// ==========================================
// AccuracyMetric - 预测精度
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetric {
    pub rice_type: String,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub r2_score: Option<f64>,
}

impl FieldAccess for AccuracyMetric {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "rice_type" => Some(FieldValue::Text(self.rice_type.clone())),
            "mae" => self.mae.map(FieldValue::Number),
            "r2_score" => self.r2_score.map(FieldValue::Number),
            _ => None,
        }
    }
}

impl TabularRow for AccuracyMetric {
    fn headers() -> &'static [&'static str] {
        &["Rice Type", "MAE (KG)", "R² Score"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.rice_type.clone(),
            format_metric(self.mae),
            format_metric(self.r2_score),
        ]
    }
}

/// 最近一次训练的模型信息 (GET /model-info)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub training_date: String,
    #[serde(default)]
    pub forecast_horizon_days: u32,
    #[serde(default)]
    pub total_rice_types_modeled: u32,
    #[serde(default)]
    pub total_records_used: u64,
    #[serde(default)]
    pub per_rice_type_metrics: Vec<AccuracyMetric>,
}
