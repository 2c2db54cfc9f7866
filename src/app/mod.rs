// ==========================================
// 米厂报表客户端 - 应用层
// ==========================================
// 职责: 命令行定义、应用状态装配、命令分发
// ==========================================

pub mod cli;
pub mod commands;
pub mod state;

// 重导出
pub use cli::{Cli, Commands};
pub use commands::{dispatch, map_api_error, ErrorResponse};
pub use state::AppState;
