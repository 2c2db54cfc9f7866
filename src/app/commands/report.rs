use crate::api::ReportApi;
use crate::app::cli::ReportArgs;
use crate::app::state::AppState;
use crate::report::render::render_section;
use crate::report::sections::{DistributionFilter, ForecastFilter};

use super::common::map_api_error;

// ==========================================
// 报表命令
// ==========================================

/// 挂载全部分区 -> 应用过滤 -> 预览或导出
pub async fn report(state: &AppState, args: ReportArgs) -> Result<String, String> {
    let mut api = state.report_api();
    api.mount_all().await;
    apply_filters(&mut api, &args).await?;

    if args.sections.is_empty() {
        api.composer_mut().select_all(true);
    } else {
        for key in &args.sections {
            api.composer_mut().set(*key, true);
        }
    }

    if args.preview {
        let selected = api.composer().selected();
        let views: Vec<String> = api
            .views()
            .iter()
            .filter(|v| selected.contains(&v.key))
            .map(render_section)
            .collect();
        return Ok(views.join("\n\n"));
    }

    let path = api
        .export_to(
            args.format,
            &state.config.output_dir(),
            args.file_name.as_deref(),
        )
        .map_err(map_api_error)?;
    Ok(format!("Report written to {}", path.display()))
}

async fn apply_filters(api: &mut ReportApi, args: &ReportArgs) -> Result<(), String> {
    api.set_forecast_filter(ForecastFilter {
        from_date: args.forecast_from.clone(),
        to_date: args.forecast_to.clone(),
        rice_type: args.forecast_rice_type.clone(),
    })
    .map_err(map_api_error)?;

    api.set_impact_status(&args.impact_status);

    // 任一端给出即重新获取，缺失的一端不下发
    if args.breakdown_from.is_some() || args.breakdown_to.is_some() {
        api.set_breakdown_range(
            args.breakdown_from.as_deref().unwrap_or(""),
            args.breakdown_to.as_deref().unwrap_or(""),
        )
        .await
        .map_err(map_api_error)?;
    }

    api.set_distribution_filter(DistributionFilter {
        from_date: args.distribution_from.clone(),
        to_date: args.distribution_to.clone(),
        warehouse: args.warehouse.clone(),
    })
    .map_err(map_api_error)?;
    Ok(())
}
