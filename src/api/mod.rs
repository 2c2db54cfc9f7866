// ==========================================
// 米厂报表客户端 - API 层
// ==========================================
// 职责: 用例层，供命令行命令调用
// 约定: 错误在产生它的用例边界内转换为 ApiError，不再向上冒泡为技术错误
// ==========================================

pub mod account_api;
pub mod auth_api;
pub mod dashboard_api;
pub mod error;
pub mod forecast_api;
pub mod inventory_api;
pub mod report_api;
pub mod sales_api;
pub mod validator;

// 重导出核心类型
pub use account_api::{AccountApi, AccountsQuery, AccountsView};
pub use auth_api::{AuthApi, AuthStatus};
pub use dashboard_api::{DashboardApi, DashboardPanel, DashboardView};
pub use error::{ApiError, ApiResult};
pub use forecast_api::ForecastApi;
pub use inventory_api::{InventoryApi, InventoryRecordsQuery, InventoryRecordsView};
pub use report_api::ReportApi;
pub use sales_api::{AdminSalesTable, SalesApi};
