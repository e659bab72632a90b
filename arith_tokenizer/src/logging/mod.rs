//! Global logging for the arithmetic tokenizer
//!
//! One `LoggingService` is installed per process. Until then every logging
//! macro is a no-op, so the library can be used without any setup. Events
//! are tagged with the expression source active on the emitting thread.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::log_success;
use std::cell::RefCell;
use std::sync::OnceLock;
use thiserror::Error;

pub use codes::{Category, Code, Severity};
pub use config::LoggingSettings;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleFormat, ConsoleLogger, EventSummary, Logger, LoggingService, MemoryLogger,
    MultiLogger, NullLogger,
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("{0} already initialized")]
    AlreadyInitialized(&'static str),

    #[error("build limit {name} = {value} is out of range")]
    InvalidLimit { name: &'static str, value: usize },

    #[error("log code {0} is not registered")]
    UnregisteredCode(Code),
}

impl LoggingError {
    pub fn error_code(&self) -> Code {
        codes::system::INITIALIZATION_FAILURE
    }
}

static GLOBAL_SERVICE: OnceLock<LoggingService> = OnceLock::new();

thread_local! {
    static SOURCE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Install a service built from the current `LoggingSettings`
pub fn init_global_logging() -> Result<(), LoggingError> {
    config::validate_limits()?;

    for code in [
        codes::system::INTERNAL_ERROR,
        codes::conversion::UNKNOWN_OPERATOR,
        codes::keys::UNKNOWN_TOKEN_KIND,
        codes::validation::MISSING_OPERAND,
        codes::success::TOKENIZATION_COMPLETE,
    ] {
        if !code.is_registered() {
            return Err(LoggingError::UnregisteredCode(code));
        }
    }

    let settings = LoggingSettings::current();
    install(LoggingService::from_settings(&settings))?;

    log_success!(codes::success::LOGGING_INITIALIZED, "Logging initialized",
        "settings" => settings.summary()
    );
    Ok(())
}

/// Install a caller-built service, e.g. one recording into a `MemoryLogger`
pub fn install(service: LoggingService) -> Result<(), LoggingError> {
    GLOBAL_SERVICE
        .set(service)
        .map_err(|_| LoggingError::AlreadyInitialized("global logger"))
}

pub fn is_initialized() -> bool {
    GLOBAL_SERVICE.get().is_some()
}

pub fn global_service() -> Option<&'static LoggingService> {
    GLOBAL_SERVICE.get()
}

/// Whether an event of `level` would reach the installed service
pub fn enabled(level: LogLevel) -> bool {
    global_service().is_some_and(|service| service.should_log(level))
}

pub fn debug_enabled() -> bool {
    enabled(LogLevel::Debug)
}

pub fn set_source_context(source: &str) {
    SOURCE.with(|current| *current.borrow_mut() = Some(source.to_string()));
}

pub fn clear_source_context() {
    SOURCE.with(|current| *current.borrow_mut() = None);
}

/// Name of the expression source being processed on this thread
pub fn current_source_context() -> Option<String> {
    SOURCE.with(|current| current.borrow().clone())
}

/// Run `f` with `source` as the source context, then restore the previous one
pub fn with_source_context<F, R>(source: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = current_source_context();
    set_source_context(source);
    let result = f();
    match previous {
        Some(previous) => set_source_context(&previous),
        None => clear_source_context(),
    }
    result
}

/// Backs the logging macros: add context and the source tag, then log
pub fn emit(event: LogEvent, context: &[(&str, String)]) {
    let Some(service) = global_service() else {
        return;
    };
    if !service.should_log(event.level) {
        return;
    }

    let mut event = context
        .iter()
        .fold(event, |event, (key, value)| event.with_context(key, value));
    if let Some(source) = current_source_context() {
        event = event.with_context("source", source);
    }

    service.log_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_context() {
        assert!(current_source_context().is_none());

        set_source_context("dashboard");
        assert_eq!(current_source_context().as_deref(), Some("dashboard"));

        clear_source_context();
        assert!(current_source_context().is_none());
    }

    #[test]
    fn test_with_source_context_restores_previous() {
        set_source_context("outer");

        let result = with_source_context("inner", || {
            assert_eq!(current_source_context().as_deref(), Some("inner"));
            42
        });

        assert_eq!(result, 42);
        assert_eq!(current_source_context().as_deref(), Some("outer"));
        clear_source_context();
    }

    #[test]
    fn test_emit_without_service_is_silent() {
        if !is_initialized() {
            assert!(!debug_enabled());
        }
        emit(LogEvent::info("nobody listens"), &[("key", "value".to_string())]);
    }

    #[test]
    fn test_error_messages() {
        let error = LoggingError::InvalidLimit {
            name: "log_buffer_size",
            value: 5,
        };
        assert_eq!(error.to_string(), "build limit log_buffer_size = 5 is out of range");
        assert_eq!(error.error_code(), codes::system::INITIALIZATION_FAILURE);
    }
}
