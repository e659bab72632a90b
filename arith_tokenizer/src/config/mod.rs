//! Tokenizer configuration
//!
//! `compile_time` holds the limits generated by `build.rs` from
//! `config/<profile>.toml`; `runtime` holds the preferences read at startup.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{LoggingPreferences, RuntimeConfig, TokenizerPreferences};

/// Where the compile-time limits came from
pub mod build_info {
    pub fn profile() -> &'static str {
        env!("ARITH_CONFIG_PROFILE")
    }

    pub fn config_source() -> &'static str {
        env!("ARITH_CONFIG_SOURCE")
    }
}

/// Reject limits the tokenizer cannot work with
pub fn validate_limits() -> Result<(), String> {
    use compile_time::tokenizer::{MAX_EXPRESSION_LENGTH, MAX_FUNCTION_ARGUMENTS};

    match (MAX_EXPRESSION_LENGTH, MAX_FUNCTION_ARGUMENTS) {
        (0, _) => Err("max_expression_length is zero".to_string()),
        (_, 0) => Err("max_function_arguments is zero".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits() {
        assert!(validate_limits().is_ok());
        assert!(compile_time::logging::LOG_BUFFER_SIZE > 0);
        assert!(compile_time::logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_build_info() {
        assert!(!build_info::profile().is_empty());
        assert!(build_info::config_source().ends_with(".toml"));
    }
}
