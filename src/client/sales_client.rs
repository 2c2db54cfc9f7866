// ==========================================
// 米厂报表客户端 - 销售数据获取
// ==========================================

use crate::client::error::{ClientError, ClientResult};
use crate::client::session::ApiSession;
use crate::client::transport::ApiRequest;
use crate::domain::sales::{
    DataRange, ManualEntry, SalesQuery, SalesRecordUpdate, SalesTableData, SalesTablePage,
    SearchDataRequest, SearchDataRow,
};
use crate::domain::types::Role;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct SalesClient {
    session: ApiSession,
}

impl SalesClient {
    pub fn new(session: ApiSession) -> Self {
        Self { session }
    }

    /// GET /user/sales/table（服务端过滤/排序/分页）
    pub async fn fetch_user_table(&self, query: &SalesQuery) -> ClientResult<SalesTablePage> {
        let request = ApiRequest::get("/user/sales/table").query(query.to_query_pairs());
        self.session.fetch_as(Role::User, request).await
    }

    /// GET /admin/sales/table（服务端只过滤）
    pub async fn fetch_admin_table(&self, query: &SalesQuery) -> ClientResult<SalesTableData> {
        let mut pairs = query.filter_pairs();
        pairs.push(("sort_field".to_string(), query.sort_field.clone()));
        pairs.push(("sort_order".to_string(), query.sort_order.as_str().to_string()));
        let request = ApiRequest::get("/admin/sales/table").query(pairs);
        self.session.fetch_as(Role::Admin, request).await
    }

    /// PUT /admin/sales/update/{id}
    pub async fn update_record(&self, id: &str, update: &SalesRecordUpdate) -> ClientResult<Value> {
        let body = serde_json::to_value(update)
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let request = ApiRequest::put(format!("/admin/sales/update/{}", id)).body(body);
        self.session.send_as(Role::Admin, request).await
    }

    /// POST /manual-entry（后端接收数组）
    pub async fn submit_manual_entry(&self, entries: &[ManualEntry]) -> ClientResult<Value> {
        let body = serde_json::to_value(entries)
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        self.session
            .send_as(Role::User, ApiRequest::post("/manual-entry").body(body))
            .await
    }

    /// POST /shop-closed
    pub async fn mark_shop_closed(&self, date: &str) -> ClientResult<Value> {
        self.session
            .send_as(
                Role::User,
                ApiRequest::post("/shop-closed").body(json!({ "date": date })),
            )
            .await
    }

    /// POST /search-data
    pub async fn search_data(&self, request: &SearchDataRequest) -> ClientResult<Vec<SearchDataRow>> {
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        self.session
            .fetch_as(Role::User, ApiRequest::post("/search-data").body(body))
            .await
    }

    /// GET /data-range
    pub async fn fetch_data_range(&self) -> ClientResult<DataRange> {
        self.session
            .fetch_as(Role::User, ApiRequest::get("/data-range"))
            .await
    }
}
