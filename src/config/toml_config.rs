use super::{
    DEFAULT_MENU_ENDPOINT, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};
use crate::core::classifier::DEFAULT_STAFF_MARKER;
use crate::core::table::DEFAULT_TABLE_INDEX;
use crate::core::ConfigProvider;
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub source: SourceConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MENU_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub table_index: usize,
    pub staff_marker: String,
    pub extra_keywords: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            table_index: DEFAULT_TABLE_INDEX,
            staff_marker: DEFAULT_STAFF_MARKER.to_string(),
            extra_keywords: Vec::new(),
        }
    }
}

impl MenuConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MenuError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// 替換環境變數 (例如 ${MENU_ENDPOINT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for MenuConfig {
    fn menu_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.source.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.source.retry_delay_ms
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn table_index(&self) -> usize {
        self.parser.table_index
    }

    fn staff_marker(&self) -> &str {
        &self.parser.staff_marker
    }

    fn extra_keywords(&self) -> &[String] {
        &self.parser.extra_keywords
    }
}

impl Validate for MenuConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)?;
        tracing::info!("✅ TOML configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = MenuConfig::from_toml_str(
            r#"
[source]
endpoint = "http://localhost:9000/menu"
timeout_seconds = 5
retry_attempts = 2
retry_delay_ms = 100

[parser]
table_index = 0
staff_marker = "교직원"
extra_keywords = ["닭갈비", "떡볶이"]
"#,
        )
        .unwrap();

        assert_eq!(config.menu_endpoint(), "http://localhost:9000/menu");
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.retry_attempts(), 2);
        assert_eq!(config.retry_delay_ms(), 100);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.table_index(), 0);
        assert_eq!(config.extra_keywords().len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = MenuConfig::from_toml_str("").unwrap();

        assert_eq!(config.menu_endpoint(), DEFAULT_MENU_ENDPOINT);
        assert_eq!(config.table_index(), DEFAULT_TABLE_INDEX);
        assert_eq!(config.staff_marker(), DEFAULT_STAFF_MARKER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unset_env_var_is_kept_and_fails_validation() {
        let config = MenuConfig::from_toml_str(
            r#"
[source]
endpoint = "${SMU_BAB_TEST_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();

        assert_eq!(config.menu_endpoint(), "${SMU_BAB_TEST_SURELY_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = MenuConfig::from_toml_str("[source\nendpoint = 1").unwrap_err();
        assert!(matches!(err, MenuError::TomlError(_)));
    }

    #[test]
    fn test_out_of_range_timeout_fails_validation() {
        let config = MenuConfig::from_toml_str("[source]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
