//! Effective logging settings
//!
//! Buffer sizes and the level floor are fixed at build time. Console output
//! and the preferred level come from `LoggingPreferences`, stored once at
//! startup (or read from the environment when never stored).

use super::events::LogLevel;
use super::service::ConsoleFormat;
use super::LoggingError;
use crate::config::compile_time::logging::{
    LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH, SECURITY_MIN_LOG_LEVEL,
};
use crate::config::runtime::{self, LoggingPreferences};
use std::sync::OnceLock;

static PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Store the preferences used by `LoggingSettings::current`; only the first
/// call wins
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), LoggingError> {
    PREFERENCES
        .set(preferences)
        .map_err(|_| LoggingError::AlreadyInitialized("runtime preferences"))
}

fn preferences() -> LoggingPreferences {
    PREFERENCES.get().cloned().unwrap_or_default()
}

/// Quietest level a build allows; preferences cannot go below it
pub fn floor_level() -> LogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        _ => LogLevel::Info,
    }
}

pub fn max_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

pub fn buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

fn to_event_level(level: runtime::LogLevel) -> LogLevel {
    match level {
        runtime::LogLevel::Error => LogLevel::Error,
        runtime::LogLevel::Warning => LogLevel::Warning,
        runtime::LogLevel::Info => LogLevel::Info,
        runtime::LogLevel::Debug => LogLevel::Debug,
    }
}

/// Settings the global logging service is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub min_level: LogLevel,
    /// `None` keeps events off the console entirely
    pub console: Option<ConsoleFormat>,
    pub buffer_size: usize,
}

impl LoggingSettings {
    pub fn resolve(preferences: &LoggingPreferences) -> Self {
        let console = preferences.enable_console_logging.then(|| {
            if preferences.use_structured_logging {
                ConsoleFormat::Json
            } else {
                ConsoleFormat::Text
            }
        });

        Self {
            min_level: to_event_level(preferences.min_log_level).max(floor_level()),
            console,
            buffer_size: LOG_BUFFER_SIZE,
        }
    }

    pub fn current() -> Self {
        Self::resolve(&preferences())
    }

    pub fn summary(&self) -> String {
        let console = match self.console {
            Some(ConsoleFormat::Text) => "text",
            Some(ConsoleFormat::Json) => "json",
            None => "off",
        };

        format!(
            "level={} (floor {}) console={} buffer={} max_message={}",
            self.min_level,
            floor_level(),
            console,
            self.buffer_size,
            MAX_LOG_MESSAGE_LENGTH
        )
    }
}

/// Reject build profiles whose limits make logging unusable
pub fn validate_limits() -> Result<(), LoggingError> {
    if !(100..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(LoggingError::InvalidLimit {
            name: "log_buffer_size",
            value: LOG_BUFFER_SIZE,
        });
    }

    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(LoggingError::InvalidLimit {
            name: "max_log_message_length",
            value: MAX_LOG_MESSAGE_LENGTH,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferences(level: runtime::LogLevel, console: bool, structured: bool) -> LoggingPreferences {
        LoggingPreferences {
            use_structured_logging: structured,
            enable_console_logging: console,
            min_log_level: level,
        }
    }

    #[test]
    fn test_build_limits_are_valid() {
        assert!(validate_limits().is_ok());
    }

    #[test]
    fn test_floor_is_applied() {
        let settings = LoggingSettings::resolve(&preferences(runtime::LogLevel::Error, false, false));
        assert!(settings.min_level >= floor_level());

        let settings = LoggingSettings::resolve(&preferences(runtime::LogLevel::Debug, false, false));
        assert_eq!(settings.min_level, LogLevel::Debug);
    }

    #[test]
    fn test_console_format() {
        let off = LoggingSettings::resolve(&preferences(runtime::LogLevel::Info, false, true));
        assert_eq!(off.console, None);

        let json = LoggingSettings::resolve(&preferences(runtime::LogLevel::Info, true, true));
        assert_eq!(json.console, Some(ConsoleFormat::Json));

        let text = LoggingSettings::resolve(&preferences(runtime::LogLevel::Info, true, false));
        assert_eq!(text.console, Some(ConsoleFormat::Text));
        assert!(text.summary().contains("console=text"));
    }
}
