// ==========================================
// 米厂报表客户端 - 库存 API
// ==========================================
// 职责: 用户端库存列表；管理端记录表（客户端过滤/排序/分页）与增删改
// 约定: 单行变更后重新获取整个集合，不在本地打补丁
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{validate_inventory_input, validate_non_blank};
use crate::client::InventoryClient;
use crate::domain::inventory::{distinct_values, InventoryBatch, InventoryRecordInput};
use crate::domain::types::SortDirection;
use crate::engine::table_query::{filter_rows, paginate, sort_rows, FilterSet, Page, Predicate};

/// 管理端库存记录表的过滤状态
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecordsQuery {
    /// 批次号子串（忽略大小写）
    pub batch_search: String,
    pub warehouse: String,
    pub rice_type: String,
    /// 按数量排序；None 保持服务端顺序
    pub quantity_order: Option<SortDirection>,
    pub page: usize,
}

impl Default for InventoryRecordsQuery {
    fn default() -> Self {
        Self {
            batch_search: String::new(),
            warehouse: "All".to_string(),
            rice_type: "All".to_string(),
            quantity_order: None,
            page: 1,
        }
    }
}

impl InventoryRecordsQuery {
    pub fn filter_set(&self) -> FilterSet {
        FilterSet::new()
            .with(Predicate::contains("batch_no", &self.batch_search))
            .with(Predicate::equals("warehouse", &self.warehouse))
            .with(Predicate::equals("rice_type", &self.rice_type))
    }

    /// 过滤 -> 排序 -> 分页
    pub fn apply(&self, records: &[InventoryBatch], page_size: usize) -> Page<InventoryBatch> {
        let filtered = filter_rows(records, &self.filter_set());
        let ordered = match self.quantity_order {
            Some(direction) => sort_rows(&filtered, "quantity", direction),
            None => filtered,
        };
        paginate(&ordered, page_size, self.page)
    }
}

/// 管理端记录表: 全量 + 当前页 + 下拉选项
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecordsView {
    pub records: Vec<InventoryBatch>,
    pub page: Page<InventoryBatch>,
    pub warehouse_options: Vec<String>,
}

pub struct InventoryApi {
    client: InventoryClient,
    page_size: usize,
}

impl InventoryApi {
    pub fn new(client: InventoryClient, page_size: usize) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
        }
    }

    /// 用户端库存列表
    pub async fn list(&self) -> ApiResult<Vec<InventoryBatch>> {
        Ok(self.client.fetch_user_inventory().await?)
    }

    pub async fn admin_records(&self) -> ApiResult<Vec<InventoryBatch>> {
        Ok(self.client.fetch_admin_inventory().await?.data)
    }

    /// 管理端记录表
    pub async fn records_view(&self, query: &InventoryRecordsQuery) -> ApiResult<InventoryRecordsView> {
        let records = self.admin_records().await?;
        Ok(self.build_view(records, query))
    }

    pub fn build_view(&self, records: Vec<InventoryBatch>, query: &InventoryRecordsQuery) -> InventoryRecordsView {
        let page = query.apply(&records, self.page_size);
        let mut warehouse_options = vec!["All".to_string()];
        warehouse_options.extend(distinct_values(records.iter().map(|r| r.warehouse.as_str())));
        InventoryRecordsView {
            records,
            page,
            warehouse_options,
        }
    }

    // ==========================================
    // 变更（成功后重新获取）
    // ==========================================

    pub async fn add(&self, input: &InventoryRecordInput) -> ApiResult<Vec<InventoryBatch>> {
        validate_inventory_input(input)?;
        self.client.add_record(input).await?;
        tracing::info!(batch_no = %input.batch_no, "库存记录已新增");
        self.admin_records().await
    }

    pub async fn update(&self, id: &str, input: &InventoryRecordInput) -> ApiResult<Vec<InventoryBatch>> {
        validate_non_blank("id", id)?;
        validate_inventory_input(input)?;
        self.client.update_record(id.trim(), input).await?;
        tracing::info!(id, "库存记录已更新");
        self.admin_records().await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<Vec<InventoryBatch>> {
        validate_non_blank("id", id)?;
        self.client.delete_record(id.trim()).await?;
        tracing::info!(id, "库存记录已删除");
        self.admin_records().await
    }
}
