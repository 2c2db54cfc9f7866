// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 临时本地存储 + 脚本化传输 -> AppState
// ==========================================

use std::sync::Arc;

use tempfile::{NamedTempFile, TempDir};

use rice_mill_report::app::AppState;
use rice_mill_report::config::ConfigManager;
use rice_mill_report::domain::types::Role;

use super::mock_transport::MockTransport;

/// API测试环境
pub struct ApiTestEnv {
    pub state: AppState,
    pub transport: Arc<MockTransport>,
    pub output_dir: TempDir,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_file = NamedTempFile::new()?;
        let output_dir = tempfile::tempdir()?;
        let db_path = temp_file.path().to_string_lossy().into_owned();

        let config = ConfigManager::from_vars([
            ("RICE_MILL_DB_PATH", db_path),
            ("RICE_MILL_SALES_PAGE_SIZE", "2".to_string()),
            ("RICE_MILL_LOCALE", "en".to_string()),
            (
                "RICE_MILL_OUTPUT_DIR",
                output_dir.path().to_string_lossy().into_owned(),
            ),
        ]);

        let transport = Arc::new(MockTransport::new());
        let state = AppState::with_transport(config, transport.clone())?;

        Ok(Self {
            state,
            transport,
            output_dir,
            _temp_file: temp_file,
        })
    }

    /// 预先写入两个角色的凭证
    pub fn logged_in() -> Result<Self, Box<dyn std::error::Error>> {
        let env = Self::new()?;
        env.state.credentials.set(Role::User, "user-token")?;
        env.state.credentials.set(Role::Admin, "admin-token")?;
        Ok(env)
    }
}
