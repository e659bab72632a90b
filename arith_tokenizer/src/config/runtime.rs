//! Runtime preferences
//!
//! Read from `ARITH_*` environment variables when defaulted; callers such as
//! the CLI override individual fields afterwards.

use serde::{Deserialize, Serialize};
use std::env;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn env_text(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerPreferences {
    /// Count tokens per kind in `TokenizerMetrics`
    pub collect_detailed_metrics: bool,

    /// Emit a debug event for every token produced
    pub log_token_stream: bool,

    /// Attached to every token location and log event
    pub source_name: Option<String>,
}

impl Default for TokenizerPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::TOKENIZER_DETAILED_METRICS, true),
            log_token_stream: env_flag(env_vars::TOKENIZER_LOG_TOKENS, false),
            source_name: env_text(env_vars::TOKENIZER_SOURCE_NAME),
        }
    }
}

impl TokenizerPreferences {
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// JSON lines instead of text when console output is enabled
    pub use_structured_logging: bool,

    /// Library users get no console output unless they ask for it
    pub enable_console_logging: bool,

    /// Preferred level; the build profile may raise it
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env_text(env_vars::LOGGING_MIN_LEVEL)
                .and_then(|level| parse_log_level(&level))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Accepts level names (any case, `warn` included) or their numbers 0-3
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Every runtime preference, as assembled by the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub tokenizer: TokenizerPreferences,
    pub logging: LoggingPreferences,
}

pub mod env_vars {
    pub const TOKENIZER_DETAILED_METRICS: &str = "ARITH_TOKENIZER_DETAILED_METRICS";
    pub const TOKENIZER_LOG_TOKENS: &str = "ARITH_TOKENIZER_LOG_TOKENS";
    pub const TOKENIZER_SOURCE_NAME: &str = "ARITH_TOKENIZER_SOURCE_NAME";

    pub const LOGGING_USE_STRUCTURED: &str = "ARITH_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "ARITH_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "ARITH_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level(" WARN "), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("Debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("loud"), None);
        assert_eq!(parse_log_level(""), None);
    }

    #[test]
    fn test_level_order() {
        assert!(LogLevel::Error < LogLevel::Debug);
        assert_eq!(LogLevel::Warning.as_str(), "warning");
    }

    #[test]
    fn test_unset_variables_use_defaults() {
        assert!(env_flag("ARITH_TEST_UNSET_FLAG", true));
        assert!(!env_flag("ARITH_TEST_UNSET_FLAG", false));
        assert!(env_text("ARITH_TEST_UNSET_TEXT").is_none());
    }

    #[test]
    fn test_with_source_name() {
        let preferences = TokenizerPreferences::default().with_source_name("query");
        assert_eq!(preferences.source_name.as_deref(), Some("query"));
    }
}
