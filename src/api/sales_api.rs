// ==========================================
// 米厂报表客户端 - 销售 API
// ==========================================
// 职责:
// - 用户端销售表（服务端过滤/排序/分页）
// - 管理端销售表（服务端过滤，客户端分页，CSV 导出，更新后重新获取）
// - 手工录入、闭店登记、数据检索
// ==========================================

use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    validate_date_range, validate_iso_date, validate_manual_entry, validate_non_blank,
    validate_sales_update,
};
use crate::client::SalesClient;
use crate::domain::sales::{
    AdminSalesRow, DataRange, ManualEntry, SalesQuery, SalesRecord, SalesRecordUpdate, SearchDataRequest,
    SearchDataRow,
};
use crate::engine::table_query::{normalize_total_pages, paginate, Page};
use crate::export::csv_export;
use crate::perf::PerfGuard;
use crate::report::render::TableView;

/// 检索结果导出文件名
pub const SEARCH_EXPORT_FILE_NAME: &str = "filtered_sales_data.csv";
/// 管理端销售表导出文件名
pub const ADMIN_SALES_EXPORT_FILE_NAME: &str = "sales_data.csv";

/// 管理端销售表: 全量过滤结果 + 当前页
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSalesTable {
    pub records: Vec<SalesRecord>,
    pub page: Page<SalesRecord>,
}

impl AdminSalesTable {
    pub fn view(&self) -> TableView {
        let rows = AdminSalesRow::wrap_all(&self.page.items);
        TableView::from_rows(&rows, self.page.page, self.page.total_pages)
    }
}

pub struct SalesApi {
    client: SalesClient,
    page_size: usize,
}

impl SalesApi {
    /// # 参数
    /// - page_size: 管理端客户端分页大小
    pub fn new(client: SalesClient, page_size: usize) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ==========================================
    // 用户端
    // ==========================================

    /// 用户端销售表一页
    ///
    /// # 返回
    /// 服务端返回 pages=0 时按 1 页处理
    pub async fn user_table(&self, query: &SalesQuery) -> ApiResult<TableView> {
        validate_date_range(&query.from_date, &query.to_date)?;
        let _perf = PerfGuard::new("sales_api.user_table");

        let resp = self.client.fetch_user_table(query).await?;
        let pages = normalize_total_pages(resp.pages) as usize;
        tracing::debug!(rows = resp.data.len(), pages, "用户端销售表");
        let page = (query.page.max(1) as usize).min(pages);
        Ok(TableView::from_rows(&resp.data, page, pages))
    }

    // ==========================================
    // 管理端
    // ==========================================

    pub async fn admin_records(&self, query: &SalesQuery) -> ApiResult<Vec<SalesRecord>> {
        validate_date_range(&query.from_date, &query.to_date)?;
        let resp = self.client.fetch_admin_table(query).await?;
        Ok(resp.data)
    }

    /// 管理端销售表，在客户端切出第 page 页
    pub async fn admin_table(&self, query: &SalesQuery, page: usize) -> ApiResult<AdminSalesTable> {
        let _perf = PerfGuard::new("sales_api.admin_table");
        let records = self.admin_records(query).await?;
        let page = paginate(&records, self.page_size, page);
        Ok(AdminSalesTable { records, page })
    }

    /// 管理端销售表 CSV（全部过滤结果，可见列）
    pub async fn export_admin_csv(&self, query: &SalesQuery) -> ApiResult<Vec<u8>> {
        let records = self.admin_records(query).await?;
        Ok(csv_export::write_table(&AdminSalesRow::wrap_all(&records))?)
    }

    /// 更新一条记录后重新获取整表
    pub async fn update_record(
        &self,
        id: &str,
        update: &SalesRecordUpdate,
        query: &SalesQuery,
    ) -> ApiResult<Vec<SalesRecord>> {
        validate_non_blank("id", id)?;
        validate_sales_update(update)?;

        self.client.update_record(id.trim(), update).await?;
        tracing::info!(id, "销售记录已更新");
        self.admin_records(query).await
    }

    // ==========================================
    // 录入
    // ==========================================

    pub async fn submit_manual_entries(&self, entries: &[ManualEntry]) -> ApiResult<Value> {
        if entries.is_empty() {
            return Err(ApiError::ValidationError("没有可提交的记录".to_string()));
        }
        for entry in entries {
            validate_manual_entry(entry)?;
        }
        let resp = self.client.submit_manual_entry(entries).await?;
        tracing::info!(count = entries.len(), "手工录入已提交");
        Ok(resp)
    }

    pub async fn mark_shop_closed(&self, date: &str) -> ApiResult<Value> {
        validate_iso_date("date", date)?;
        let resp = self.client.mark_shop_closed(date.trim()).await?;
        tracing::info!(date, "闭店已登记");
        Ok(resp)
    }

    // ==========================================
    // 数据检索
    // ==========================================

    pub async fn search(&self, request: &SearchDataRequest) -> ApiResult<Vec<SearchDataRow>> {
        validate_non_blank("rice_type", &request.rice_type)?;
        validate_date_range(&request.from_date, &request.to_date)?;
        Ok(self.client.search_data(request).await?)
    }

    /// 检索结果 CSV（filtered_sales_data.csv）
    pub fn export_search_csv(&self, rows: &[SearchDataRow]) -> ApiResult<Vec<u8>> {
        Ok(csv_export::write_table(rows)?)
    }

    pub async fn data_range(&self) -> ApiResult<DataRange> {
        Ok(self.client.fetch_data_range().await?)
    }
}
