//! Logging macros
//!
//! Context is given as `"key" => value` pairs where the value is any
//! `Display` type. `log_error!` additionally accepts `location = expr` before
//! the context.

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, location = $location:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::error($code, $message).with_location($location),
            &[$(($key, ::std::format!("{}", $value))),*],
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::error($code, $message),
            &[$(($key, ::std::format!("{}", $value))),*],
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::success($code, $message),
            &[$(($key, ::std::format!("{}", $value))),*],
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::info($message),
            &[$(($key, ::std::format!("{}", $value))),*],
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit(
            $crate::logging::LogEvent::warning($message),
            &[$(($key, ::std::format!("{}", $value))),*],
        )
    };
}

/// Context values are only formatted when debug events are enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::emit(
                $crate::logging::LogEvent::debug($message),
                &[$(($key, ::std::format!("{}", $value))),*],
            )
        }
    };
}
