// ==========================================
// 米厂报表客户端 - 命令处理（按域拆分）
// ==========================================
// 职责: 解析后的命令 -> API 调用 -> 终端文本或 JSON
// 约定: 处理函数返回 Result<String, String>，错误为 ErrorResponse JSON
// ==========================================

mod accounts;
mod auth;
mod common;
mod config;
mod dashboard;
mod forecast;
mod inventory;
mod report;
mod sales;

pub use common::{map_api_error, ErrorResponse};

use crate::app::cli::Commands;
use crate::app::state::AppState;

/// 分发一条命令
pub async fn dispatch(state: &AppState, command: Commands, json: bool) -> Result<String, String> {
    tracing::debug!(json, "分发命令");
    match command {
        Commands::Login {
            role,
            username,
            password,
        } => auth::login(state, role, &username, &password).await,
        Commands::Logout { role } => auth::logout(state, role),
        Commands::Whoami => auth::whoami(state, json),
        Commands::ForgotPassword { role, username } => {
            auth::forgot_password(state, role, &username).await
        }
        Commands::ResetPassword {
            role,
            token,
            password,
            confirm,
        } => auth::reset_password(state, role, &token, &password, &confirm).await,
        Commands::Dashboard { retry } => dashboard::dashboard(state, retry, json).await,
        Commands::Sales { command } => sales::run(state, command, json).await,
        Commands::Inventory { command } => inventory::run(state, command, json).await,
        Commands::Forecast { rice_type, export } => {
            forecast::forecast(state, &rice_type, export, json).await
        }
        Commands::Accounts { kind, command } => accounts::run(state, kind, command, json).await,
        Commands::Report(args) => report::report(state, args).await,
        Commands::Config { command } => config::run(state, command),
    }
}
