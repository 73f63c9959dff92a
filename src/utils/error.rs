use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Menu source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Menu source timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Menu table not found: {reason}")]
    StructureNotFound { reason: String },

    #[error("Weekly assembly failed: {message}")]
    AssemblyFailure { message: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Structure,
    Assembly,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MenuError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MenuError::Http(_) | MenuError::SourceUnavailable { .. } | MenuError::Timeout { .. } => {
                ErrorCategory::Network
            }
            MenuError::StructureNotFound { .. } => ErrorCategory::Structure,
            MenuError::AssemblyFailure { .. } => ErrorCategory::Assembly,
            MenuError::InvalidDate { .. } => ErrorCategory::Input,
            MenuError::InvalidConfigValueError { .. }
            | MenuError::MissingConfigError { .. }
            | MenuError::TomlError(_) => ErrorCategory::Configuration,
            MenuError::CsvError(_) | MenuError::IoError(_) | MenuError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路與結構錯誤會被樣本資料吸收
            ErrorCategory::Network | ErrorCategory::Structure => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Assembly => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 可由備援資料恢復的錯誤
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Structure
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MenuError::Http(_) | MenuError::SourceUnavailable { .. } => {
                "Could not reach the cafeteria menu page".to_string()
            }
            MenuError::Timeout { seconds } => {
                format!("The cafeteria menu page did not respond within {}s", seconds)
            }
            MenuError::StructureNotFound { .. } => {
                "The cafeteria menu page layout was not recognised".to_string()
            }
            MenuError::AssemblyFailure { message } => {
                format!("Internal error while building the weekly menu: {}", message)
            }
            MenuError::InvalidDate { value } => {
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", value)
            }
            MenuError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            MenuError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity or raise --timeout-seconds",
            ErrorCategory::Structure => {
                "The upstream layout may have changed; adjust table_index in the parser config"
            }
            ErrorCategory::Assembly => "This is a bug in the sample generator; please report it",
            ErrorCategory::Input => "Pass the date as YYYY-MM-DD, e.g. 2025-03-03",
            ErrorCategory::Configuration => "Review the configuration file and CLI arguments",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
