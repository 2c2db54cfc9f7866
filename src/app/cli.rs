// ==========================================
// 米厂报表客户端 - 命令行定义
// ==========================================
// 职责: clap 派生的命令树与全局参数
// ==========================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::types::{ClosedFilter, ExportFormat, Role, SectionKey, SortDirection};

#[derive(Parser)]
#[command(name = "rice-mill-report")]
#[command(version, about = "Rice mill sales, inventory and forecast report client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// REST backend base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output language (en, zh-CN)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Directory for exported files
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Local credential store path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the bearer token for a role
    Login {
        /// user or admin
        #[arg(long, default_value = "user")]
        role: Role,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Remove the stored token for a role
    Logout {
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// Show which roles hold a stored token
    Whoami,

    /// Ask the backend to email a password reset link
    ForgotPassword {
        #[arg(long, default_value = "user")]
        role: Role,

        #[arg(short, long)]
        username: String,
    },

    /// Set a new password with an emailed reset token
    ResetPassword {
        #[arg(long, default_value = "user")]
        role: Role,

        #[arg(long)]
        token: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm: String,
    },

    /// Load the dashboard panels
    Dashboard {
        /// Retry failed panels once
        #[arg(long)]
        retry: bool,
    },

    /// Sales tables, entry and search
    Sales {
        #[command(subcommand)]
        command: SalesCommands,
    },

    /// Inventory list and admin records
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },

    /// Forecast series for one rice type
    Forecast {
        #[arg(long)]
        rice_type: String,

        /// Write <RICE_TYPE>_forecast.csv to the output directory
        #[arg(long)]
        export: bool,
    },

    /// User and admin account management (admin token)
    Accounts {
        /// user accounts or admin accounts
        #[arg(long, default_value = "user")]
        kind: Role,

        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Compose the sales and forecasting report
    Report(ReportArgs),

    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// 销售表共用过滤参数
#[derive(Args, Clone, Default)]
pub struct SalesFilterArgs {
    #[arg(long, default_value = "All")]
    pub rice_type: String,

    #[arg(long, default_value = "")]
    pub from: String,

    #[arg(long, default_value = "")]
    pub to: String,

    #[arg(long, default_value = "")]
    pub price: String,

    /// all, open or closed
    #[arg(long, default_value = "all")]
    pub closed: ClosedFilter,
}

#[derive(Subcommand)]
pub enum SalesCommands {
    /// User sales table (server-side paging)
    Table {
        #[command(flatten)]
        filter: SalesFilterArgs,

        #[arg(long, default_value = "date")]
        sort_field: String,

        #[arg(long, default_value = "asc")]
        sort_order: SortDirection,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Admin sales table (client-side paging)
    Admin {
        #[command(flatten)]
        filter: SalesFilterArgs,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Write sales_data.csv to the output directory
        #[arg(long)]
        export: bool,
    },

    /// Update quantity, gross amount or price of one record
    Update {
        id: String,

        #[arg(long)]
        quantity_kg: Option<f64>,

        #[arg(long)]
        gross_amount: Option<f64>,

        #[arg(long)]
        price_per_kg: Option<f64>,
    },

    /// Submit one manual sales entry
    Entry {
        #[arg(long)]
        date: String,

        #[arg(long)]
        rice_type: String,

        #[arg(long)]
        quantity_kg: f64,

        #[arg(long)]
        price_per_kg: f64,
    },

    /// Register a shop-closed day
    ShopClosed {
        #[arg(long)]
        date: String,
    },

    /// Search sales by rice type and date range
    Search {
        #[arg(long)]
        rice_type: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Write filtered_sales_data.csv to the output directory
        #[arg(long)]
        export: bool,
    },
}

/// 库存记录字段
#[derive(Args, Clone)]
pub struct InventoryRecordArgs {
    #[arg(long)]
    pub rice_type: String,

    #[arg(long)]
    pub quantity: i64,

    #[arg(long)]
    pub warehouse: String,

    #[arg(long)]
    pub batch_no: String,

    #[arg(long)]
    pub date_received: String,
}

#[derive(Subcommand)]
pub enum InventoryCommands {
    /// Current stock batches
    List,

    /// Admin inventory records (client-side filter, sort and paging)
    Records {
        /// Batch number substring
        #[arg(long, default_value = "")]
        batch: String,

        #[arg(long, default_value = "All")]
        warehouse: String,

        #[arg(long, default_value = "All")]
        rice_type: String,

        /// Sort by quantity (asc or desc)
        #[arg(long)]
        sort: Option<SortDirection>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Add an inventory record
    Add(InventoryRecordArgs),

    /// Update an inventory record
    Update {
        id: String,

        #[command(flatten)]
        record: InventoryRecordArgs,
    },

    /// Delete an inventory record
    Delete { id: String },
}

/// 账户表单字段
#[derive(Args, Clone)]
pub struct AccountArgs {
    #[arg(long)]
    pub full_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub username: String,

    /// Leave empty on update to keep the current password
    #[arg(long, default_value = "")]
    pub password: String,

    #[arg(long, default_value = "")]
    pub confirm_password: String,

    /// Job title, e.g. Staff, Admin, Super Admin, Moderator
    #[arg(long)]
    pub role: Option<String>,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub bio: String,
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List accounts (client-side filter and paging)
    List {
        /// Username substring
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, default_value = "All")]
        role: String,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Add an account
    Add(AccountArgs),

    /// Update an account
    Update {
        id: String,

        #[command(flatten)]
        account: AccountArgs,
    },

    /// Delete an account
    Delete { id: String },
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Sections to include (comma separated); defaults to all
    #[arg(long, value_delimiter = ',')]
    pub sections: Vec<SectionKey>,

    #[arg(long, default_value = "pdf")]
    pub format: ExportFormat,

    /// File name inside the output directory
    #[arg(long)]
    pub file_name: Option<String>,

    /// Only print the sections, do not export
    #[arg(long)]
    pub preview: bool,

    #[arg(long, default_value = "")]
    pub forecast_from: String,

    #[arg(long, default_value = "")]
    pub forecast_to: String,

    #[arg(long, default_value = "All")]
    pub forecast_rice_type: String,

    #[arg(long, default_value = "All")]
    pub impact_status: String,

    #[arg(long)]
    pub breakdown_from: Option<String>,

    #[arg(long)]
    pub breakdown_to: Option<String>,

    #[arg(long, default_value = "")]
    pub distribution_from: String,

    #[arg(long, default_value = "")]
    pub distribution_to: String,

    #[arg(long, default_value = "All")]
    pub warehouse: String,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_sections() {
        let cli = Cli::parse_from([
            "rice-mill-report",
            "report",
            "--sections",
            "summary,riceBreakdown",
            "--format",
            "csv",
        ]);
        match cli.command {
            Commands::Report(args) => {
                assert_eq!(
                    args.sections,
                    vec![SectionKey::Summary, SectionKey::RiceBreakdown]
                );
                assert_eq!(args.format, ExportFormat::Csv);
                assert!(!args.preview);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_parse_account_update() {
        let cli = Cli::parse_from([
            "rice-mill-report",
            "accounts",
            "--kind",
            "admin",
            "update",
            "a1",
            "--full-name",
            "Kamal",
            "--email",
            "kamal@mill.lk",
            "--username",
            "kamal",
        ]);
        match cli.command {
            Commands::Accounts {
                kind,
                command: AccountCommands::Update { id, account },
            } => {
                assert_eq!(kind, Role::Admin);
                assert_eq!(id, "a1");
                assert_eq!(account.password, "");
                assert_eq!(account.role, None);
            }
            _ => panic!("expected accounts update command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["rice-mill-report", "whoami", "-vv", "--locale", "zh-CN"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.locale.as_deref(), Some("zh-CN"));
    }
}
