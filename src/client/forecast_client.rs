// ==========================================
// 米厂报表客户端 - 单米种预测获取
// ==========================================

use crate::client::error::ClientResult;
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::forecast::RiceForecast;
use crate::domain::types::Role;

#[derive(Clone)]
pub struct ForecastClient {
    session: ApiSession,
}

impl ForecastClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    /// GET /forecast?riceType=
    pub async fn fetch_forecast(&self, rice_type: &str) -> ClientResult<RiceForecast> {
        let request = ApiRequest::get("/forecast")
            .query(vec![("riceType".to_string(), rice_type.to_string())]);
        let mut forecast: RiceForecast = self.session.fetch_as(Role::User, request).await?;
        if forecast.rice_type.trim().is_empty() {
            forecast.rice_type = rice_type.to_string();
        }
        Ok(forecast)
    }
}
