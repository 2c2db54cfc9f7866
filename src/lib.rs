// ==========================================
// 米厂报表客户端 - 核心库
// ==========================================
// 技术栈: Rust + reqwest + SQLite（本地凭证）
// 系统定位: 销售/库存/预测数据的查看、过滤与报表导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 视图模型与类型
pub mod domain;

// 数据仓储层 - 本地凭证
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 引擎层 - 过滤/排序/分页与获取状态机
pub mod engine;

// 数据获取层 - REST 客户端
pub mod client;

// 报表层 - 分区、组合器、终端渲染
pub mod report;

// 导出层 - CSV / PDF
pub mod export;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 请求计时
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - 命令行
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ClosedFilter, ExportFormat, Role, SectionKey, SortDirection};

// 引擎
pub use engine::{filter_rows, paginate, sort_rows, FetchState, FilterSet, Page, Predicate};

// API
pub use api::{AuthApi, DashboardApi, ForecastApi, InventoryApi, ReportApi, SalesApi};

// 报表
pub use report::{FilteredSubsetStore, ReportComposer, ReportDocument};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Rice Mill Report";
