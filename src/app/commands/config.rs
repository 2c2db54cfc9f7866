use crate::app::cli::ConfigCommands;
use crate::app::state::AppState;

use super::common::to_json;

// ==========================================
// 配置命令
// ==========================================

pub fn run(state: &AppState, command: ConfigCommands) -> Result<String, String> {
    match command {
        ConfigCommands::Show => to_json(&state.config.get_config_snapshot()),
    }
}
