// ==========================================
// 米厂报表客户端 - 仪表盘数据获取
// ==========================================

use crate::client::error::ClientResult;
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::dashboard::{DashboardCharts, DashboardKpi, StockLevelsResponse, SystemLogsResponse};
use crate::domain::types::Role;

#[derive(Clone)]
pub struct DashboardClient {
    session: ApiSession,
}

impl DashboardClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    pub async fn fetch_kpi(&self) -> ClientResult<DashboardKpi> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/user/dashboard/kpi"))
            .await
    }

    pub async fn fetch_charts(&self) -> ClientResult<DashboardCharts> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/user/dashboard/charts"))
            .await
    }

    pub async fn fetch_stock_levels(&self) -> ClientResult<StockLevelsResponse> {
        self.session
            .fetch_as(
                Role::User,
                ApiRequest::get("/user/dashboard/current-stock-levels"),
            )
            .await
    }

    pub async fn fetch_system_logs(&self) -> ClientResult<SystemLogsResponse> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/user/dashboard/system-logs"))
            .await
    }
}
