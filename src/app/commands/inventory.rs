use crate::api::inventory_api::InventoryRecordsQuery;
use crate::app::cli::{InventoryCommands, InventoryRecordArgs};
use crate::app::state::AppState;
use crate::domain::inventory::InventoryRecordInput;
use crate::report::render::TableView;

use super::common::{map_api_error, to_json};

// ==========================================
// 库存相关命令
// ==========================================

fn to_input(args: InventoryRecordArgs) -> InventoryRecordInput {
    InventoryRecordInput {
        rice_type: args.rice_type,
        quantity: args.quantity,
        warehouse: args.warehouse,
        batch_no: args.batch_no,
        date_received: args.date_received,
    }
}

pub async fn run(state: &AppState, command: InventoryCommands, json: bool) -> Result<String, String> {
    match command {
        InventoryCommands::List => {
            let batches = state.inventory_api.list().await.map_err(map_api_error)?;
            if json {
                return to_json(&batches);
            }
            Ok(TableView::from_rows(&batches, 1, 1).render())
        }

        InventoryCommands::Records {
            batch,
            warehouse,
            rice_type,
            sort,
            page,
        } => {
            let query = InventoryRecordsQuery {
                batch_search: batch,
                warehouse,
                rice_type,
                quantity_order: sort,
                page,
            };
            let view = state
                .inventory_api
                .records_view(&query)
                .await
                .map_err(map_api_error)?;
            let table = TableView::from_page(&view.page);
            if json {
                return to_json(&table);
            }
            Ok(format!(
                "Warehouses: {}\n{}",
                view.warehouse_options.join(", "),
                table.render()
            ))
        }

        InventoryCommands::Add(args) => {
            let records = state
                .inventory_api
                .add(&to_input(args))
                .await
                .map_err(map_api_error)?;
            Ok(format!("Record added ({} records)", records.len()))
        }

        InventoryCommands::Update { id, record } => {
            let records = state
                .inventory_api
                .update(&id, &to_input(record))
                .await
                .map_err(map_api_error)?;
            Ok(format!("Record {} updated ({} records)", id, records.len()))
        }

        InventoryCommands::Delete { id } => {
            let records = state
                .inventory_api
                .delete(&id)
                .await
                .map_err(map_api_error)?;
            Ok(format!("Record {} deleted ({} records)", id, records.len()))
        }
    }
}
