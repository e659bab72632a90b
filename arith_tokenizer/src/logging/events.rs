//! Log events
//!
//! A `LogEvent` is a timestamped message with an optional registered code,
//! an optional source location and free-form `key=value` context.

use super::codes::{Category, Code};
use super::config;
use crate::utils::Location;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Event level; lower is more severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LogLevel {
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "WARN")]
    Warning,
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "DEBUG")]
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

/// Cut `message` to at most `limit` bytes on a char boundary, marking the cut
fn truncate_message(message: &str, limit: usize) -> String {
    if message.len() <= limit {
        return message.to_string();
    }

    let mut cut = limit;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &message[..cut])
}

impl LogEvent {
    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code: None,
            message: truncate_message(message, config::max_message_length()),
            location: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, message).with_code(code)
    }

    /// Info event carrying a success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, message).with_code(code)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, message)
    }

    pub fn with_code(mut self, code: Code) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Add a context entry; an existing entry with the same key is replaced
    pub fn with_context(mut self, key: &str, value: impl ToString) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn has_code(&self, code: Code) -> bool {
        self.code == Some(code)
    }

    pub fn category(&self) -> Option<Category> {
        self.code.map(|code| code.category())
    }

    /// Events without a code never block processing
    pub fn is_recoverable(&self) -> bool {
        self.code.map_or(true, |code| code.is_recoverable())
    }

    /// Single-line text form: `LEVEL [code] message at line:col key=value`
    pub fn format(&self) -> String {
        let mut output = format!("{:<5}", self.level.as_str());

        if let Some(code) = self.code {
            output.push_str(&format!(" [{}]", code));
        }
        output.push(' ');
        output.push_str(&self.message);

        if let Some(location) = &self.location {
            output.push_str(&format!(" at {}", location.start));
        }
        for (key, value) in &self.context {
            output.push_str(&format!(" {}={}", key, value));
        }

        output
    }

    /// JSON-lines form, with the code's category and recommended action
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_value(self)?;

        if let (Some(code), Some(object)) = (self.code, json.as_object_mut()) {
            object.insert("category".to_string(), code.category().as_str().into());
            if self.is_error() {
                object.insert("recoverable".to_string(), code.is_recoverable().into());
                if let Some(action) = code.action() {
                    object.insert("action".to_string(), action.into());
                }
            }
        }

        serde_json::to_string(&json)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_error_event() {
        let event = LogEvent::error(codes::keys::UNKNOWN_TOKEN_KIND, "Unknown kind");

        assert!(event.is_error());
        assert!(event.has_code(codes::keys::UNKNOWN_TOKEN_KIND));
        assert_eq!(event.category(), Some(Category::Keys));
        assert!(!event.is_recoverable());
    }

    #[test]
    fn test_uncoded_events() {
        let event = LogEvent::warning("Expression truncated");

        assert_eq!(event.level, LogLevel::Warning);
        assert!(event.code.is_none());
        assert!(event.category().is_none());
        assert!(event.is_recoverable());
    }

    #[test]
    fn test_text_format() {
        let location = Location::new(Position::new(2, 1, 3), Position::new(3, 1, 4));
        let event = LogEvent::error(codes::conversion::UNKNOWN_OPERATOR, "Bad operator")
            .with_location(location)
            .with_context("symbol", '%');

        assert_eq!(event.format(), "ERROR [E021] Bad operator at 1:3 symbol=%");
        assert_eq!(LogEvent::info("Tokenizing").format(), "INFO  Tokenizing");
    }

    #[test]
    fn test_long_messages_are_truncated() {
        assert_eq!(truncate_message("abcdef", 3), "abc...");
        assert_eq!(truncate_message("abc", 3), "abc");
        assert_eq!(truncate_message("aé", 2), "a...");

        let limit = config::max_message_length();
        let event = LogEvent::info(&"x".repeat(limit + 10));
        assert_eq!(event.message.len(), limit + 3);
    }

    #[test]
    fn test_json_format() {
        let event = LogEvent::error(codes::keys::MALFORMED_TOKEN_KEY, "Malformed key")
            .with_context("key", "literal");

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["code"], "E031");
        assert_eq!(json["category"], "keys");
        assert_eq!(json["recoverable"], false);
        assert_eq!(json["context"]["key"], "literal");
        assert!(json.get("location").is_none());
    }
}
