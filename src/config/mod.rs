#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_keywords, validate_non_empty_string, validate_range, validate_url,
};

pub const DEFAULT_MENU_ENDPOINT: &str = "https://www.smu.ac.kr/kor/life/restaurantView.do";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1500;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

/// 所有設定來源共用的檢查
pub fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validate_url("menu_endpoint", config.menu_endpoint())?;

    validate_range("timeout_seconds", config.timeout_seconds(), 1, 120)?;
    validate_range("retry_attempts", config.retry_attempts(), 1, 10)?;
    validate_range("retry_delay_ms", config.retry_delay_ms(), 0, 30_000)?;

    validate_non_empty_string("user_agent", config.user_agent())?;
    validate_range("table_index", config.table_index(), 0, 20)?;
    validate_keywords("extra_keywords", config.extra_keywords())?;

    Ok(())
}
