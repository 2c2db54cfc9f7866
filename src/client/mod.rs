// ==========================================
// 米厂报表客户端 - 数据获取层
// ==========================================
// 职责: 每个操作一次带凭证的 REST 调用，返回解析后的 JSON 或结构化错误
// 红线: 不自动重试,不缓存
// ==========================================

pub mod account_client;
pub mod auth_client;
pub mod dashboard_client;
pub mod error;
pub mod forecast_client;
pub mod inventory_client;
pub mod report_client;
pub mod sales_client;
pub mod session;
pub mod transport;

pub use account_client::AccountClient;
pub use auth_client::{AuthClient, LoginResponse};
pub use dashboard_client::DashboardClient;
pub use error::{ClientError, ClientResult};
pub use forecast_client::ForecastClient;
pub use inventory_client::InventoryClient;
pub use report_client::ReportClient;
pub use sales_client::SalesClient;
pub use session::ApiSession;
pub use transport::{ApiRequest, ApiTransport, HttpMethod, HttpTransport};
