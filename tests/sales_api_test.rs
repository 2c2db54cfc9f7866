// ==========================================
// SalesApi 集成测试
// ==========================================
// 测试范围:
// 1. 用户端销售表: 查询参数、pages 归一化
// 2. 管理端销售表: 客户端分页、CSV 导出、更新后重新获取
// 3. 手工录入 / 闭店 / 数据检索的本地校验
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::SalesRecordBuilder;
use pretty_assertions::assert_eq;
use rice_mill_report::api::ApiError;
use rice_mill_report::client::HttpMethod;
use rice_mill_report::domain::sales::{ManualEntry, SalesQuery, SalesRecordUpdate, SearchDataRequest};
use rice_mill_report::domain::types::{ClosedFilter, SortDirection};
use rice_mill_report::export::csv_export;
use serde_json::json;

fn admin_rows() -> serde_json::Value {
    json!({
        "data": [
            SalesRecordBuilder::new("s1", "2025-01-01").build(),
            SalesRecordBuilder::new("s2", "2025-01-02").quantity(20.0).build(),
            SalesRecordBuilder::new("s3", "2025-01-03").closed().build(),
        ]
    })
}

// ==========================================
// 用户端
// ==========================================

#[tokio::test]
async fn test_user_table_sends_filters_and_normalizes_pages() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond_json(
        HttpMethod::Get,
        "/user/sales/table",
        json!({ "data": [], "total": 0, "page": 1, "pages": 0 }),
    );

    let mut query = SalesQuery {
        rice_type: "All".to_string(),
        from_date: "2025-01-01".to_string(),
        closed: ClosedFilter::Closed,
        limit: 8,
        ..SalesQuery::default()
    };
    query.toggle_sort("quantity_kg");
    query.toggle_sort("quantity_kg");

    let view = env.state.sales_api.user_table(&query).await.expect("查询失败");
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.page, 1);
    assert_eq!(view.pager_label(), "Page 1 of 1");
    assert_eq!(
        view.empty_message().as_deref(),
        Some("No records found with selected filters")
    );

    let request = env
        .transport
        .last_request(HttpMethod::Get, "/user/sales/table")
        .unwrap();
    let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec!["from_date", "closed", "sort_field", "sort_order", "page", "limit"]
    );
    assert!(request
        .query
        .contains(&("sort_order".to_string(), SortDirection::Desc.as_str().to_string())));
    assert!(request
        .query
        .contains(&("closed".to_string(), "Closed".to_string())));
}

#[tokio::test]
async fn test_user_table_inverted_range_is_local_error() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    let query = SalesQuery {
        from_date: "2025-02-01".to_string(),
        to_date: "2025-01-01".to_string(),
        ..SalesQuery::default()
    };

    let err = env.state.sales_api.user_table(&query).await.unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(env.transport.requests().is_empty());
}

// ==========================================
// 管理端
// ==========================================

#[tokio::test]
async fn test_admin_table_paginates_client_side() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport
        .respond_json(HttpMethod::Get, "/admin/sales/table", admin_rows());

    // 测试环境分页大小为 2
    let table = env
        .state
        .sales_api
        .admin_table(&SalesQuery::default(), 2)
        .await
        .expect("查询失败");
    assert_eq!(table.records.len(), 3);
    assert_eq!(table.page.total_pages, 2);
    assert_eq!(table.page.items.len(), 1);
    let view = table.view();
    assert_eq!(view.pager_label(), "Page 2 of 2");
    assert_eq!(view.headers[2], "Qty (KG)");
    assert_eq!(view.headers[4], "Price/KG");
    assert_eq!(view.rows.len(), 1);

    let request = env
        .transport
        .last_request(HttpMethod::Get, "/admin/sales/table")
        .unwrap();
    assert_eq!(request.bearer.as_deref(), Some("admin-token"));
    assert!(!request.query.iter().any(|(k, _)| k == "page"));
}

#[tokio::test]
async fn test_admin_csv_has_visible_columns() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport
        .respond_json(HttpMethod::Get, "/admin/sales/table", admin_rows());

    let bytes = env
        .state
        .sales_api
        .export_admin_csv(&SalesQuery::default())
        .await
        .expect("导出失败");
    let (headers, rows) = csv_export::read_back(&bytes).unwrap();
    assert_eq!(
        headers,
        vec!["Date", "Rice Type", "Qty (KG)", "Gross Amount", "Price/KG", "Closed"]
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][2], "20");
}

#[tokio::test]
async fn test_update_record_refetches_table() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport
        .respond_json(HttpMethod::Put, "/admin/sales/update/s2", json!({ "ok": true }));
    env.transport
        .respond_json(HttpMethod::Get, "/admin/sales/table", admin_rows());

    let update = SalesRecordUpdate {
        quantity_kg: Some(25.0),
        ..SalesRecordUpdate::default()
    };
    let records = env
        .state
        .sales_api
        .update_record("s2", &update, &SalesQuery::default())
        .await
        .expect("更新失败");
    assert_eq!(records.len(), 3);

    let put = env
        .transport
        .last_request(HttpMethod::Put, "/admin/sales/update/s2")
        .unwrap();
    assert_eq!(put.body, Some(json!({ "quantity_kg": 25.0 })));
    assert_eq!(env.transport.count(HttpMethod::Get, "/admin/sales/table"), 1);
}

#[tokio::test]
async fn test_update_record_rejects_empty_and_negative() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");

    let err = env
        .state
        .sales_api
        .update_record("s1", &SalesRecordUpdate::default(), &SalesQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    let negative = SalesRecordUpdate {
        price_per_kg: Some(-1.0),
        ..SalesRecordUpdate::default()
    };
    let err = env
        .state
        .sales_api
        .update_record("s1", &negative, &SalesQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(env.transport.requests().is_empty());
}

// ==========================================
// 录入与检索
// ==========================================

#[tokio::test]
async fn test_manual_entry_validation_and_submit() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport
        .respond_json(HttpMethod::Post, "/manual-entry", json!({ "message": "saved" }));

    let mut entry = ManualEntry {
        date: "2025-03-01".to_string(),
        rice_type: "Unknown Rice".to_string(),
        quantity_kg: 5.0,
        price_per_kg: 240.0,
        closed: false,
    };
    let err = env
        .state
        .sales_api
        .submit_manual_entries(std::slice::from_ref(&entry))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    entry.rice_type = "SIERRA RED RAW RICE -5KG".to_string();
    let resp = env
        .state
        .sales_api
        .submit_manual_entries(std::slice::from_ref(&entry))
        .await
        .expect("提交失败");
    assert_eq!(resp["message"], "saved");

    let request = env
        .transport
        .last_request(HttpMethod::Post, "/manual-entry")
        .unwrap();
    assert!(request.body.unwrap().is_array());
}

#[tokio::test]
async fn test_shop_closed_requires_iso_date() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport
        .respond_json(HttpMethod::Post, "/shop-closed", json!({ "message": "ok" }));

    let err = env
        .state
        .sales_api
        .mark_shop_closed("01/03/2025")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    env.state
        .sales_api
        .mark_shop_closed("2025-03-01")
        .await
        .expect("登记失败");
    let request = env
        .transport
        .last_request(HttpMethod::Post, "/shop-closed")
        .unwrap();
    assert_eq!(request.body, Some(json!({ "date": "2025-03-01" })));
}

#[tokio::test]
async fn test_search_export_header() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond_json(
        HttpMethod::Post,
        "/search-data",
        json!([
            { "date": "2025-01-01", "rice_type": "SIERRA RED RAW RICE -5KG", "quantity_kg": 12.0, "price_per_kg": 250.0 }
        ]),
    );

    let request = SearchDataRequest {
        rice_type: "SIERRA RED RAW RICE -5KG".to_string(),
        from_date: "2025-01-01".to_string(),
        to_date: "2025-01-31".to_string(),
    };
    let rows = env.state.sales_api.search(&request).await.expect("检索失败");
    let bytes = env.state.sales_api.export_search_csv(&rows).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("Date,Rice Type,Quantity (KG),Amount per 1KG (Rs)")
    );
}

#[tokio::test]
async fn test_server_detail_surfaces_as_http_status() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond(
        HttpMethod::Get,
        "/data-range",
        helpers::mock_transport::MockResponse::Status(503, "Service Unavailable".to_string()),
    );

    let err = env.state.sales_api.data_range().await.unwrap_err();
    match &err {
        ApiError::HttpStatus { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(err.is_retryable());
}
