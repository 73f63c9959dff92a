use super::{
    DEFAULT_MENU_ENDPOINT, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};
use crate::core::classifier::DEFAULT_STAFF_MARKER;
use crate::core::export::OutputFormat;
use crate::core::table::DEFAULT_TABLE_INDEX;
use crate::core::ConfigProvider;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "smu-bab")]
#[command(about = "Fetches and normalizes the SMU cafeteria weekly menu")]
pub struct CliConfig {
    /// Reference date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Only output the menus of the reference date
    #[arg(long)]
    pub today: bool,

    #[arg(long, visible_alias = "endpoint", default_value = DEFAULT_MENU_ENDPOINT)]
    pub menu_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value_t = DEFAULT_RETRY_ATTEMPTS)]
    pub retry_attempts: u32,

    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Position of the menu grid among the page's tables (0-based)
    #[arg(long, default_value_t = DEFAULT_TABLE_INDEX)]
    pub table_index: usize,

    #[arg(long, default_value = DEFAULT_STAFF_MARKER)]
    pub staff_marker: String,

    /// Additional segmentation keywords, comma separated
    #[arg(long, value_delimiter = ',')]
    pub extra_keywords: Vec<String>,

    /// TOML configuration file; replaces the source/parser flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per pipeline phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn menu_endpoint(&self) -> &str {
        &self.menu_endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn table_index(&self) -> usize {
        self.table_index
    }

    fn staff_marker(&self) -> &str {
        &self.staff_marker
    }

    fn extra_keywords(&self) -> &[String] {
        &self.extra_keywords
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        super::validate_provider(self)?;
        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}
