// ==========================================
// 米厂报表客户端 - 账户管理 API
// ==========================================
// 职责: 用户账户与管理员账户的列表（客户端过滤/分页）与增删改
// 约定: 单行变更后重新获取整个集合，不在本地打补丁
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{validate_account_input, validate_non_blank};
use crate::client::AccountClient;
use crate::domain::account::{Account, AccountInput};
use crate::domain::inventory::distinct_values;
use crate::domain::types::Role;
use crate::engine::table_query::{filter_rows, paginate, FilterSet, Page, Predicate};

/// 账户表的过滤状态
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsQuery {
    /// 用户名子串（忽略大小写）
    pub search: String,
    /// 岗位；"All" 不限
    pub role: String,
    pub page: usize,
}

impl Default for AccountsQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            role: "All".to_string(),
            page: 1,
        }
    }
}

impl AccountsQuery {
    pub fn filter_set(&self) -> FilterSet {
        FilterSet::new()
            .with(Predicate::contains("username", &self.search))
            .with(Predicate::equals("role", &self.role))
    }

    pub fn apply(&self, accounts: &[Account], page_size: usize) -> Page<Account> {
        let filtered = filter_rows(accounts, &self.filter_set());
        paginate(&filtered, page_size, self.page)
    }
}

/// 账户表: 全量 + 当前页 + 岗位下拉
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsView {
    pub kind: Role,
    pub accounts: Vec<Account>,
    pub page: Page<Account>,
    pub role_options: Vec<String>,
}

pub struct AccountApi {
    client: AccountClient,
    page_size: usize,
}

impl AccountApi {
    pub fn new(client: AccountClient, page_size: usize) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
        }
    }

    /// # 参数
    /// - kind: Role::User 为用户账户，Role::Admin 为管理员账户
    pub async fn list(&self, kind: Role) -> ApiResult<Vec<Account>> {
        Ok(self.client.fetch_accounts(kind).await?)
    }

    pub async fn accounts_view(&self, kind: Role, query: &AccountsQuery) -> ApiResult<AccountsView> {
        let accounts = self.list(kind).await?;
        let page = query.apply(&accounts, self.page_size);
        let mut role_options = vec!["All".to_string()];
        role_options.extend(distinct_values(accounts.iter().map(|a| a.role.as_str())));
        Ok(AccountsView {
            kind,
            accounts,
            page,
            role_options,
        })
    }

    // ==========================================
    // 变更（成功后重新获取）
    // ==========================================

    pub async fn add(&self, kind: Role, input: &AccountInput) -> ApiResult<Vec<Account>> {
        validate_account_input(input, false)?;
        self.client.add_account(kind, input).await?;
        tracing::info!(kind = %kind, username = %input.username.trim(), "账户已新增");
        self.list(kind).await
    }

    pub async fn update(&self, kind: Role, id: &str, input: &AccountInput) -> ApiResult<Vec<Account>> {
        validate_non_blank("id", id)?;
        validate_account_input(input, true)?;
        self.client.update_account(kind, id.trim(), input).await?;
        tracing::info!(kind = %kind, id, "账户已更新");
        self.list(kind).await
    }

    pub async fn delete(&self, kind: Role, id: &str) -> ApiResult<Vec<Account>> {
        validate_non_blank("id", id)?;
        self.client.delete_account(kind, id.trim()).await?;
        tracing::info!(kind = %kind, id, "账户已删除");
        self.list(kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, role: &str) -> Account {
        Account {
            id: Some(format!("id-{}", username)),
            full_name: username.to_uppercase(),
            email: format!("{}@mill.lk", username),
            username: username.to_string(),
            role: role.to_string(),
            phone: String::new(),
            bio: String::new(),
            profile_pic: String::new(),
        }
    }

    #[test]
    fn test_query_filters_by_username_and_role() {
        let accounts = vec![
            account("nimal", "Staff"),
            account("Nimali", "Manager"),
            account("kamal", "Staff"),
        ];
        let query = AccountsQuery {
            search: "NIMAL".to_string(),
            role: "Staff".to_string(),
            ..AccountsQuery::default()
        };
        let page = query.apply(&accounts, 10);
        assert_eq!(page.items, vec![account("nimal", "Staff")]);
    }

    #[test]
    fn test_default_query_is_identity() {
        let accounts = vec![account("a", "Staff"), account("b", "Admin")];
        let page = AccountsQuery::default().apply(&accounts, 10);
        assert_eq!(page.items, accounts);
    }
}
