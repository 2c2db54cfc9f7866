use crate::app::state::AppState;
use crate::report::render::TableView;

use super::common::{map_api_error, to_json, write_export};

// ==========================================
// 预测命令
// ==========================================

pub async fn forecast(
    state: &AppState,
    rice_type: &str,
    export: bool,
    json: bool,
) -> Result<String, String> {
    let forecast = state
        .forecast_api
        .fetch(rice_type)
        .await
        .map_err(map_api_error)?;

    let mut out = if json {
        to_json(&forecast)?
    } else {
        format!(
            "{}\n{}\nTotal: {:.2} KG",
            forecast.rice_type,
            TableView::from_rows(&forecast.forecasts, 1, 1).render(),
            forecast.total_quantity()
        )
    };

    if export {
        let (file_name, bytes) = state
            .forecast_api
            .export_csv(&forecast)
            .map_err(map_api_error)?;
        let path = write_export(&state.config.output_dir(), &file_name, &bytes)?;
        out.push_str(&format!("\nExported {}", path.display()));
    }
    Ok(out)
}
