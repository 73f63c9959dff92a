use super::{
    DEFAULT_MENU_ENDPOINT, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT,
};
use crate::core::classifier::DEFAULT_STAFF_MARKER;
use crate::core::table::DEFAULT_TABLE_INDEX;
use crate::core::ConfigProvider;
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::Validate;
use std::str::FromStr;

/// Serverless configuration, read from `MENU_*` environment variables.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub menu_endpoint: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
    pub table_index: usize,
    pub staff_marker: String,
    pub extra_keywords: Vec<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            menu_endpoint: lookup("MENU_ENDPOINT").unwrap_or_else(|| DEFAULT_MENU_ENDPOINT.to_string()),
            timeout_seconds: parse_var(&lookup, "MENU_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?,
            retry_attempts: parse_var(&lookup, "MENU_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS)?,
            retry_delay_ms: parse_var(&lookup, "MENU_RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?,
            user_agent: lookup("MENU_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            table_index: parse_var(&lookup, "MENU_TABLE_INDEX", DEFAULT_TABLE_INDEX)?,
            staff_marker: lookup("MENU_STAFF_MARKER").unwrap_or_else(|| DEFAULT_STAFF_MARKER.to_string()),
            extra_keywords: lookup("MENU_EXTRA_KEYWORDS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|k| !k.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| MenuError::InvalidConfigValueError {
            field: key.to_string(),
            value: raw.clone(),
            reason: "Not a valid number".to_string(),
        }),
    }
}

impl ConfigProvider for LambdaConfig {
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

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = LambdaConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config.menu_endpoint(), DEFAULT_MENU_ENDPOINT);
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert!(config.extra_keywords().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = LambdaConfig::from_lookup(lookup_from(&[
            ("MENU_ENDPOINT", "http://localhost:3000/menu"),
            ("MENU_TIMEOUT_SECONDS", "7"),
            ("MENU_EXTRA_KEYWORDS", "닭갈비, ,떡볶이"),
        ]))
        .unwrap();

        assert_eq!(config.menu_endpoint(), "http://localhost:3000/menu");
        assert_eq!(config.timeout_seconds(), 7);
        assert_eq!(config.extra_keywords(), ["닭갈비".to_string(), "떡볶이".to_string()]);
    }

    #[test]
    fn test_non_numeric_env_is_rejected() {
        let err = LambdaConfig::from_lookup(lookup_from(&[("MENU_RETRY_ATTEMPTS", "many")])).unwrap_err();
        assert!(matches!(err, MenuError::InvalidConfigValueError { .. }));
    }
}
