// ==========================================
// 米厂报表客户端 - 配置层
// ==========================================
// 职责: 客户端配置管理,支持多级覆写
// 来源: 内置默认值 / RICE_MILL_* 环境变量 / 命令行参数
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, default_db_path, ConfigLayer, ConfigManager};
