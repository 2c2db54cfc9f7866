// ==========================================
// 米厂报表客户端 - 报表分区数据获取
// ==========================================
// 每个分区对应一个资源，一次调用一次请求
// ==========================================

use crate::client::error::ClientResult;
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::forecast::{ForecastPoint, ModelInfo};
use crate::domain::inventory::{InventoryBatch, InventoryImpactRow};
use crate::domain::report::{ReportSummary, RiceBreakdown};
use crate::domain::types::Role;

#[derive(Clone)]
pub struct ReportClient {
    session: ApiSession,
}

impl ReportClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    /// GET /report-summary
    pub async fn fetch_summary(&self) -> ClientResult<ReportSummary> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/report-summary"))
            .await
    }

    /// GET /model-info（含每个米种的 MAE / R²）
    pub async fn fetch_model_info(&self) -> ClientResult<ModelInfo> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/model-info"))
            .await
    }

    /// GET /forecast-data
    pub async fn fetch_forecast_points(&self) -> ClientResult<Vec<ForecastPoint>> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/forecast-data"))
            .await
    }

    /// GET /inventory-impact
    pub async fn fetch_inventory_impact(&self) -> ClientResult<Vec<InventoryImpactRow>> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/inventory-impact"))
            .await
    }

    /// GET /rice-breakdown?from_date=&to_date=
    ///
    /// # 参数
    /// - 空白日期不下发
    pub async fn fetch_rice_breakdown(&self, from_date: &str, to_date: &str) -> ClientResult<RiceBreakdown> {
        let mut query = Vec::new();
        if !from_date.trim().is_empty() {
            query.push(("from_date".to_string(), from_date.trim().to_string()));
        }
        if !to_date.trim().is_empty() {
            query.push(("to_date".to_string(), to_date.trim().to_string()));
        }
        self.session
            .fetch_as(Role::User, ApiRequest::get("/rice-breakdown").query(query))
            .await
    }

    /// GET /inventory-distribution
    pub async fn fetch_inventory_distribution(&self) -> ClientResult<Vec<InventoryBatch>> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/inventory-distribution"))
            .await
    }
}
