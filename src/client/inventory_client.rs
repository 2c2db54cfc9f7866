// ==========================================
// 米厂报表客户端 - 库存数据获取
// ==========================================

use crate::client::error::{ClientError, ClientResult};
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::inventory::{InventoryBatch, InventoryList, InventoryRecordInput};
use crate::domain::types::Role;
use serde_json::Value;

#[derive(Clone)]
pub struct InventoryClient {
    session: ApiSession,
}

impl InventoryClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    /// GET /inventory/all（用户端，返回裸数组）
    pub async fn fetch_user_inventory(&self) -> ClientResult<Vec<InventoryBatch>> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/inventory/all"))
            .await
    }

    /// GET /admin/inventory/all
    pub async fn fetch_admin_inventory(&self) -> ClientResult<InventoryList> {
        self.session
            .fetch_as(Role::Admin, ApiRequest::get("/admin/inventory/all"))
            .await
    }

    /// POST /admin/inventory/add
    pub async fn add_record(&self, input: &InventoryRecordInput) -> ClientResult<Value> {
        let request = ApiRequest::post("/admin/inventory/add").body(to_body(input)?);
        self.session.send_as(Role::Admin, request).await
    }

    /// PUT /admin/inventory/update/{id}
    pub async fn update_record(&self, id: &str, input: &InventoryRecordInput) -> ClientResult<Value> {
        let request =
            ApiRequest::put(format!("/admin/inventory/update/{}", id)).body(to_body(input)?);
        self.session.send_as(Role::Admin, request).await
    }

    /// DELETE /admin/inventory/delete/{id}
    pub async fn delete_record(&self, id: &str) -> ClientResult<Value> {
        let request = ApiRequest::delete(format!("/admin/inventory/delete/{}", id));
        self.session.send_as(Role::Admin, request).await
    }
}

fn to_body(input: &InventoryRecordInput) -> ClientResult<Value> {
    serde_json::to_value(input).map_err(|e| ClientError::InvalidRequest(e.to_string()))
}
