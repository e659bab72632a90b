//! Expression tokenization entry points
//!
//! `tokenize_expression` is the main API: raw text in, normalized and keyed
//! tokens out. It fails only on internal contract violations, never on bad
//! user input.

pub mod analyzer;
pub mod normalizer;

use crate::config::compile_time::tokenizer::*;
use crate::config::runtime::TokenizerPreferences;
use crate::logging::codes;
use crate::tokens::{ArithmeticError, Token, TokenStream};

pub use analyzer::{ExpressionTokenizer, TokenizerMetrics};
pub use normalizer::{
    assign_keys, normalize_tokens, normalize_tokens_with_stats, space, NormalizationStats,
};

/// Tokenize with the preferences read from the environment
pub fn tokenize_expression(expression: &str) -> Result<Vec<Token>, ArithmeticError> {
    tokenize_stream(expression).map(TokenStream::into_tokens)
}

pub fn tokenize_expression_with_preferences(
    expression: &str,
    preferences: TokenizerPreferences,
) -> Result<Vec<Token>, ArithmeticError> {
    ExpressionTokenizer::with_preferences(preferences)
        .tokenize(expression)
        .map(TokenStream::into_tokens)
}

/// Tokenize into a `TokenStream` for key-based lookups
pub fn tokenize_stream(expression: &str) -> Result<TokenStream, ArithmeticError> {
    ExpressionTokenizer::new().tokenize(expression)
}

pub fn create_tokenizer() -> ExpressionTokenizer {
    ExpressionTokenizer::new()
}

pub fn create_tokenizer_with_preferences(preferences: TokenizerPreferences) -> ExpressionTokenizer {
    ExpressionTokenizer::with_preferences(preferences)
}

/// Check that tokenizer error codes are registered and limits are usable
pub fn validate_tokenization() -> Result<(), String> {
    let error_codes = [
        codes::conversion::UNKNOWN_PARENTHESIS,
        codes::conversion::UNKNOWN_OPERATOR,
        codes::keys::UNKNOWN_TOKEN_KIND,
        codes::keys::MALFORMED_TOKEN_KEY,
        codes::success::TOKENIZATION_COMPLETE,
    ];

    for code in &error_codes {
        if !code.is_registered() {
            return Err(format!(
                "Tokenizer code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::config::validate_limits()?;

    crate::log_debug!("Tokenizer limits validated",
        "max_expression_length" => MAX_EXPRESSION_LENGTH,
        "max_function_arguments" => MAX_FUNCTION_ARGUMENTS
    );

    Ok(())
}
