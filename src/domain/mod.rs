// ==========================================
// 米厂报表客户端 - 领域模型层
// ==========================================
// 职责: 定义请求级视图模型、枚举与行访问接口
// 红线: 不含网络访问,不含持久化逻辑
// ==========================================

pub mod account;
pub mod dashboard;
pub mod forecast;
pub mod inventory;
pub mod report;
pub mod row;
pub mod sales;
pub mod types;

// 重导出核心类型
pub use account::{Account, AccountInput};
pub use dashboard::{
    ChartPoint, DashboardCharts, DashboardKpi, StockLevel, StockLevelsResponse, SystemLog,
    SystemLogsResponse,
};
pub use forecast::{AccuracyMetric, ForecastPoint, ForecastQuantity, ModelInfo, RiceForecast};
pub use inventory::{InventoryBatch, InventoryImpactRow, InventoryList, InventoryRecordInput};
pub use report::{DateRange, ReportSummary, RiceBreakdown, RiceBreakdownRow};
pub use row::{FieldAccess, FieldValue, TabularRow};
pub use sales::{
    DataRange, ManualEntry, SalesQuery, SalesRecord, SalesRecordUpdate, SalesTableData,
    SalesTablePage, SearchDataRequest, SearchDataRow,
};
pub use types::{ClosedFilter, ExportFormat, Role, SectionKey, SortDirection, RICE_TYPES};
