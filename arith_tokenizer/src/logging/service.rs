//! Logging service and logger backends
//!
//! Console output always goes to stderr so that token streams printed on
//! stdout stay machine readable.

use super::codes::Code;
use super::config::{self, LoggingSettings};
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of one logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Service for the given settings; without console output events are dropped
    pub fn from_settings(settings: &LoggingSettings) -> Self {
        let logger: Arc<dyn Logger> = match settings.console {
            Some(format) => Arc::new(ConsoleLogger::new(format)),
            None => Arc::new(NullLogger),
        };

        Self::new(logger, settings.min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    Text,
    Json,
}

/// Writes one line per event to stderr
pub struct ConsoleLogger {
    format: ConsoleFormat,
}

impl ConsoleLogger {
    pub fn new(format: ConsoleFormat) -> Self {
        Self { format }
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.format {
            ConsoleFormat::Text => event.format(),
            // An event that cannot be serialized still gets reported
            ConsoleFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        let line = self.render(event);
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Ring buffer of the most recent events
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    /// Buffer sized from the build profile
    pub fn new() -> Self {
        Self::with_capacity(config::buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|event| event.is_error()).cloned().collect()
    }

    pub fn with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|event| event.has_code(code))
            .cloned()
            .collect()
    }

    pub fn contains(&self, code: Code) -> bool {
        self.lock().iter().any(|event| event.has_code(code))
    }

    pub fn summary(&self) -> EventSummary {
        self.lock()
            .iter()
            .fold(EventSummary::default(), |mut summary, event| {
                summary.total += 1;
                match event.level {
                    LogLevel::Error => summary.errors += 1,
                    LogLevel::Warning => summary.warnings += 1,
                    LogLevel::Info => summary.info += 1,
                    LogLevel::Debug => summary.debug += 1,
                }
                if event.is_error() && !event.is_recoverable() {
                    summary.unrecoverable += 1;
                }
                summary
            })
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

/// Counts of the events held by a `MemoryLogger`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub debug: usize,
    pub unrecoverable: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Sends every event to each of its loggers
#[derive(Default)]
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl MultiLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, logger: Arc<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        for logger in &self.loggers {
            logger.log(event);
        }
    }
}

/// Service that records into memory as well as following the current settings
pub fn create_recording_service(min_level: LogLevel) -> (LoggingService, Arc<MemoryLogger>) {
    let settings = LoggingSettings::current();
    let memory = Arc::new(MemoryLogger::new());

    let mut multi = MultiLogger::new().with(memory.clone());
    if let Some(format) = settings.console {
        multi = multi.with(Arc::new(ConsoleLogger::new(format)));
    }

    (LoggingService::new(Arc::new(multi), min_level), memory)
}
