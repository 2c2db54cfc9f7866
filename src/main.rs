// ==========================================
// 米厂报表客户端 - 命令行主入口
// ==========================================
// 流程: 解析参数 -> 日志 -> 配置分层 -> AppState -> 分发命令
// ==========================================

use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;

use rice_mill_report::app::{self, AppState, Cli};
use rice_mill_report::config::{config_keys, ConfigManager};
use rice_mill_report::{i18n, logging, perf};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_with_default(logging::level_for_verbosity(cli.verbose));
    perf::install_http_tracing();

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    tracing::debug!("{} v{}", rice_mill_report::APP_NAME, rice_mill_report::VERSION);

    let mut config = ConfigManager::from_env();
    if let Some(url) = cli.api_url {
        config.set_override(config_keys::API_BASE_URL, url);
    }
    if let Some(locale) = cli.locale {
        config.set_override(config_keys::LOCALE, locale);
    }
    if let Some(dir) = cli.output_dir {
        config.set_override(config_keys::OUTPUT_DIR, dir.to_string_lossy().into_owned());
    }
    if let Some(db_path) = cli.db_path {
        config.set_override(config_keys::DB_PATH, db_path);
    }

    i18n::set_locale(&config.locale());

    let state = AppState::new(config).map_err(|e| anyhow!(e))?;
    app::dispatch(&state, cli.command, cli.json)
        .await
        .map_err(|e| anyhow!(e))
}
