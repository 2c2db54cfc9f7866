use crate::api::account_api::AccountsQuery;
use crate::app::cli::{AccountArgs, AccountCommands};
use crate::app::state::AppState;
use crate::domain::account::{AccountInput, ADMIN_ROLES, DEFAULT_USER_ROLE};
use crate::domain::types::Role;
use crate::report::render::TableView;

use super::common::{map_api_error, to_json};

// ==========================================
// 账户管理命令
// ==========================================

/// 新增时未给岗位则按集合取默认值；更新时必须显式给出
fn to_input(kind: Role, args: AccountArgs, adding: bool) -> AccountInput {
    let role = match args.role {
        Some(role) => role,
        None if adding => match kind {
            Role::User => DEFAULT_USER_ROLE.to_string(),
            Role::Admin => ADMIN_ROLES[0].to_string(),
        },
        None => String::new(),
    };
    AccountInput {
        full_name: args.full_name,
        email: args.email,
        username: args.username,
        password: args.password,
        confirm_password: args.confirm_password,
        role,
        phone: args.phone,
        bio: args.bio,
    }
}

pub async fn run(
    state: &AppState,
    kind: Role,
    command: AccountCommands,
    json: bool,
) -> Result<String, String> {
    match command {
        AccountCommands::List { search, role, page } => {
            let query = AccountsQuery { search, role, page };
            let view = state
                .account_api
                .accounts_view(kind, &query)
                .await
                .map_err(map_api_error)?;
            let table = TableView::from_page(&view.page);
            if json {
                return to_json(&table);
            }
            Ok(format!(
                "Roles: {}\n{}",
                view.role_options.join(", "),
                table.render()
            ))
        }

        AccountCommands::Add(args) => {
            let accounts = state
                .account_api
                .add(kind, &to_input(kind, args, true))
                .await
                .map_err(map_api_error)?;
            Ok(format!("Account added ({} {} accounts)", accounts.len(), kind))
        }

        AccountCommands::Update { id, account } => {
            let accounts = state
                .account_api
                .update(kind, &id, &to_input(kind, account, false))
                .await
                .map_err(map_api_error)?;
            Ok(format!("Account {} updated ({} {} accounts)", id, accounts.len(), kind))
        }

        AccountCommands::Delete { id } => {
            let accounts = state
                .account_api
                .delete(kind, &id)
                .await
                .map_err(map_api_error)?;
            Ok(format!("Account {} deleted ({} {} accounts)", id, accounts.len(), kind))
        }
    }
}
