// ==========================================
// 米厂报表客户端 - 应用状态
// ==========================================
// 职责: 由配置装配本地存储、HTTP 传输、各数据获取器与 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AccountApi, AuthApi, DashboardApi, ForecastApi, InventoryApi, ReportApi, SalesApi};
use crate::client::{
    AccountClient, ApiSession, ApiTransport, AuthClient, DashboardClient, ForecastClient, HttpTransport,
    InventoryClient, ReportClient, SalesClient,
};
use crate::config::config_manager::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::repository::CredentialRepository;

/// 应用状态
///
/// 命令处理函数共享的 API 实例与配置
pub struct AppState {
    pub config: ConfigManager,

    /// 本地凭证存储路径
    pub db_path: String,

    pub credentials: Arc<CredentialRepository>,

    pub auth_api: AuthApi,
    pub sales_api: SalesApi,
    pub inventory_api: InventoryApi,
    pub dashboard_api: DashboardApi,
    pub forecast_api: ForecastApi,
    pub account_api: AccountApi,

    /// 报表客户端（ReportApi 按次创建，持有分区状态）
    report_client: ReportClient,
}

impl AppState {
    /// 按配置创建 AppState（HTTP 传输）
    ///
    /// # 返回
    /// - Err(String): 本地存储或 HTTP 客户端初始化失败
    pub fn new(config: ConfigManager) -> Result<Self, String> {
        let base_url = config.api_base_url();
        let timeout = config.request_timeout();
        let transport = HttpTransport::new(base_url.clone(), timeout)
            .map_err(|e| format!("HTTP 客户端初始化失败: {}", e))?;
        tracing::info!(base_url = %base_url, timeout_secs = timeout.as_secs(), "HTTP 传输就绪");
        Self::with_transport(config, Arc::new(transport))
    }

    /// 使用给定传输创建 AppState（测试注入 mock）
    pub fn with_transport(
        config: ConfigManager,
        transport: Arc<dyn ApiTransport>,
    ) -> Result<Self, String> {
        let db_path = config.db_path();
        tracing::info!("初始化AppState，本地存储路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开本地存储: {}", e))?;
        let credentials = Arc::new(CredentialRepository::new(Arc::new(Mutex::new(conn))));

        let session = ApiSession::new(transport, Arc::clone(&credentials));
        let page_size = config.sales_page_size() as usize;

        let state = Self {
            auth_api: AuthApi::new(AuthClient::new(session.clone()), Arc::clone(&credentials)),
            sales_api: SalesApi::new(SalesClient::new(session.clone()), page_size),
            inventory_api: InventoryApi::new(InventoryClient::new(session.clone()), page_size),
            dashboard_api: DashboardApi::new(DashboardClient::new(session.clone())),
            forecast_api: ForecastApi::new(ForecastClient::new(session.clone())),
            account_api: AccountApi::new(AccountClient::new(session.clone()), page_size),
            report_client: ReportClient::new(session),
            credentials,
            db_path,
            config,
        };
        tracing::info!("AppState初始化成功");
        Ok(state)
    }

    /// 新的报表页面（全部分区未挂载，勾选全部为空）
    pub fn report_api(&self) -> ReportApi {
        ReportApi::new(self.report_client.clone(), &self.config.locale())
    }
}
