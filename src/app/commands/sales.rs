use crate::api::sales_api::{ADMIN_SALES_EXPORT_FILE_NAME, SEARCH_EXPORT_FILE_NAME};
use crate::app::cli::{SalesCommands, SalesFilterArgs};
use crate::app::state::AppState;
use crate::domain::sales::{ManualEntry, SalesQuery, SalesRecordUpdate, SearchDataRequest};
use crate::report::render::TableView;

use super::common::{map_api_error, to_json, write_export};

// ==========================================
// 销售相关命令
// ==========================================

/// 过滤参数 -> 查询状态
fn build_query(filter: &SalesFilterArgs, page_size: u32) -> SalesQuery {
    SalesQuery {
        rice_type: filter.rice_type.clone(),
        from_date: filter.from.clone(),
        to_date: filter.to.clone(),
        price: filter.price.clone(),
        closed: filter.closed,
        limit: page_size,
        ..SalesQuery::default()
    }
}

fn table_output(view: &TableView, json: bool) -> Result<String, String> {
    if json {
        to_json(view)
    } else {
        Ok(view.render())
    }
}

pub async fn run(state: &AppState, command: SalesCommands, json: bool) -> Result<String, String> {
    let page_size = state.config.sales_page_size();
    match command {
        SalesCommands::Table {
            filter,
            sort_field,
            sort_order,
            page,
        } => {
            let mut query = build_query(&filter, page_size);
            query.sort_field = sort_field;
            query.sort_order = sort_order;
            query.page = page;
            let view = state
                .sales_api
                .user_table(&query)
                .await
                .map_err(map_api_error)?;
            table_output(&view, json)
        }

        SalesCommands::Admin {
            filter,
            page,
            export,
        } => {
            let query = build_query(&filter, page_size);
            let table = state
                .sales_api
                .admin_table(&query, page)
                .await
                .map_err(map_api_error)?;
            let mut out = table_output(&table.view(), json)?;
            if export {
                let bytes = state
                    .sales_api
                    .export_admin_csv(&query)
                    .await
                    .map_err(map_api_error)?;
                let path = write_export(&state.config.output_dir(), ADMIN_SALES_EXPORT_FILE_NAME, &bytes)?;
                out.push_str(&format!("\nExported {}", path.display()));
            }
            Ok(out)
        }

        SalesCommands::Update {
            id,
            quantity_kg,
            gross_amount,
            price_per_kg,
        } => {
            let update = SalesRecordUpdate {
                quantity_kg,
                gross_amount,
                price_per_kg,
            };
            let records = state
                .sales_api
                .update_record(&id, &update, &SalesQuery::default())
                .await
                .map_err(map_api_error)?;
            Ok(format!("Record {} updated ({} records)", id, records.len()))
        }

        SalesCommands::Entry {
            date,
            rice_type,
            quantity_kg,
            price_per_kg,
        } => {
            let entry = ManualEntry {
                date,
                rice_type,
                quantity_kg,
                price_per_kg,
                closed: false,
            };
            let resp = state
                .sales_api
                .submit_manual_entries(std::slice::from_ref(&entry))
                .await
                .map_err(map_api_error)?;
            if json {
                to_json(&resp)
            } else {
                Ok("Entry submitted".to_string())
            }
        }

        SalesCommands::ShopClosed { date } => {
            state
                .sales_api
                .mark_shop_closed(&date)
                .await
                .map_err(map_api_error)?;
            Ok(format!("{} marked as shop closed", date.trim()))
        }

        SalesCommands::Search {
            rice_type,
            from,
            to,
            export,
        } => {
            let request = SearchDataRequest {
                rice_type,
                from_date: from,
                to_date: to,
            };
            let rows = state
                .sales_api
                .search(&request)
                .await
                .map_err(map_api_error)?;
            let view = TableView::from_rows(&rows, 1, 1);
            let mut out = table_output(&view, json)?;
            if export {
                let bytes = state
                    .sales_api
                    .export_search_csv(&rows)
                    .map_err(map_api_error)?;
                let path = write_export(&state.config.output_dir(), SEARCH_EXPORT_FILE_NAME, &bytes)?;
                out.push_str(&format!("\nExported {}", path.display()));
            }
            Ok(out)
        }
    }
}
