// ==========================================
// 米厂报表客户端 - 账户管理接口
// ==========================================
// 全部以管理员凭证调用；新增/更新按表单提交
// ==========================================

use crate::client::error::ClientResult;
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::account::{add_path, collection_path, delete_path, update_path, Account, AccountInput};
use crate::domain::types::Role;
use serde_json::Value;

#[derive(Clone)]
pub struct AccountClient {
    session: ApiSession,
}

impl AccountClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    /// GET /users 或 /admins（裸数组，不含密码）
    pub async fn fetch_accounts(&self, kind: Role) -> ClientResult<Vec<Account>> {
        self.session
            .fetch_as(Role::Admin, ApiRequest::get(collection_path(kind)))
            .await
    }

    /// POST /add-user 或 /add-admin
    pub async fn add_account(&self, kind: Role, input: &AccountInput) -> ClientResult<Value> {
        let request = ApiRequest::post(add_path(kind)).form(input.form_fields(kind, false));
        self.session.send_as(Role::Admin, request).await
    }

    /// PUT /update-user/{id} 或 /update-admin/{id}
    pub async fn update_account(&self, kind: Role, id: &str, input: &AccountInput) -> ClientResult<Value> {
        let request = ApiRequest::put(update_path(kind, id)).form(input.form_fields(kind, true));
        self.session.send_as(Role::Admin, request).await
    }

    /// DELETE /delete-user/{id} 或 /delete-admin/{id}
    pub async fn delete_account(&self, kind: Role, id: &str) -> ClientResult<Value> {
        let request = ApiRequest::delete(delete_path(kind, id));
        self.session.send_as(Role::Admin, request).await
    }
}
