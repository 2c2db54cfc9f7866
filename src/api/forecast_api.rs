// ==========================================
// 米厂报表客户端 - 预测 API
// ==========================================
// 职责: 单个米种的预测序列与 CSV 导出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::validate_rice_type;
use crate::client::ForecastClient;
use crate::domain::forecast::RiceForecast;
use crate::export::csv_export;

pub struct ForecastApi {
    client: ForecastClient,
}

impl ForecastApi {
    pub fn new(client: ForecastClient) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, rice_type: &str) -> ApiResult<RiceForecast> {
        validate_rice_type(rice_type)?;
        let forecast = self.client.fetch_forecast(rice_type.trim()).await?;
        tracing::debug!(
            rice_type = %forecast.rice_type,
            points = forecast.forecasts.len(),
            "预测序列"
        );
        Ok(forecast)
    }

    /// 导出 CSV
    ///
    /// # 返回
    /// (文件名, CSV 字节)；空序列为校验错误
    pub fn export_csv(&self, forecast: &RiceForecast) -> ApiResult<(String, Vec<u8>)> {
        if forecast.forecasts.is_empty() {
            return Err(ApiError::ValidationError(format!(
                "{} 没有可导出的预测数据",
                forecast.rice_type
            )));
        }
        let bytes = csv_export::write_table(&forecast.forecasts)?;
        Ok((forecast.export_file_name(), bytes))
    }
}
