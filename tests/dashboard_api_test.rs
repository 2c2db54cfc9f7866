// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试范围:
// 1. 四个面板并发加载，单个失败不影响其它
// 2. 仅失败面板允许重试
// ==========================================

mod helpers;

use helpers::api_test_helper::ApiTestEnv;
use helpers::mock_transport::{MockResponse, MockTransport};
use pretty_assertions::assert_eq;
use rice_mill_report::api::{ApiError, DashboardPanel};
use rice_mill_report::client::HttpMethod;
use serde_json::json;

fn script_dashboard_routes(transport: &MockTransport) {
    transport.respond_json(
        HttpMethod::Get,
        "/user/dashboard/kpi",
        json!({ "todaysSales": 120.5, "understockCount": 2, "stockTrend": "-5%" }),
    );
    transport.respond_json(
        HttpMethod::Get,
        "/user/dashboard/charts",
        json!({
            "rice_sales_last_7_days": [{ "name": "Mon", "value": 40.0 }],
            "forecasted_demand": [],
            "stock_movement": []
        }),
    );
    transport.respond_json(
        HttpMethod::Get,
        "/user/dashboard/current-stock-levels",
        json!({ "stock_levels": [{ "type": "SIERRA RED RAW RICE -5KG", "current": 80.0, "capacity": 200.0 }] }),
    );
    transport.respond_json(
        HttpMethod::Get,
        "/user/dashboard/system-logs",
        json!({ "logs": [{ "icon": "info", "description": "Model retrained", "timestamp": "2025-05-01 10:00" }] }),
    );
}

#[tokio::test]
async fn test_load_all_panels() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    script_dashboard_routes(&env.transport);

    let view = env.state.dashboard_api.load().await;
    assert!(!view.loading);
    assert!(view.failed_panels().is_empty());

    let kpi = view.kpi.data().unwrap();
    assert_eq!(kpi.todays_sales, 120.5);
    assert_eq!(kpi.understock_count, 2);
    assert_eq!(kpi.stock_trend.as_deref(), Some("-5%"));
    assert_eq!(view.stock_levels.data().unwrap().len(), 1);
    assert_eq!(view.system_logs.data().unwrap()[0].description, "Model retrained");

    let request = env
        .transport
        .last_request(HttpMethod::Get, "/user/dashboard/kpi")
        .unwrap();
    assert_eq!(request.bearer.as_deref(), Some("user-token"));
}

#[tokio::test]
async fn test_one_failed_panel_does_not_block_others() {
    let env = ApiTestEnv::logged_in().expect("无法创建测试环境");
    env.transport.respond(
        HttpMethod::Get,
        "/user/dashboard/charts",
        MockResponse::Status(500, "Internal Server Error".to_string()),
    );
    script_dashboard_routes(&env.transport);

    let mut view = env.state.dashboard_api.load().await;
    assert!(!view.loading);
    assert_eq!(view.failed_panels(), vec![DashboardPanel::Charts]);
    assert!(view.kpi.data().is_some());
    assert!(view.system_logs.data().is_some());

    env.state
        .dashboard_api
        .retry(&mut view, DashboardPanel::Charts)
        .await
        .expect("重试失败");
    assert!(view.failed_panels().is_empty());
    assert_eq!(
        view.charts.data().unwrap().rice_sales_last_7_days[0].name,
        "Mon"
    );
    assert_eq!(env.transport.count(HttpMethod::Get, "/user/dashboard/charts"), 2);

    // Ready 面板不允许重试
    let err = env
        .state
        .dashboard_api
        .retry(&mut view, DashboardPanel::Kpi)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidStateTransition { .. }));
    assert_eq!(env.transport.count(HttpMethod::Get, "/user/dashboard/kpi"), 1);
}

#[tokio::test]
async fn test_logged_out_marks_every_panel_failed() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    script_dashboard_routes(&env.transport);

    let view = env.state.dashboard_api.load().await;
    assert_eq!(view.failed_panels().len(), 4);
    assert!(env.transport.requests().is_empty());
}
