//! Expression tokenizer: grammar, conversion and normalization in one pass
//!
//! Runs with explicit runtime preferences and reports through the global
//! logging system.

use super::normalizer::{normalize_tokens_with_stats, NormalizationStats};
use crate::config::compile_time::tokenizer::*;
use crate::config::runtime::TokenizerPreferences;
use crate::grammar::GrammarParser;
use crate::logging::{self, codes};
use crate::tokens::{ArithmeticError, Token, TokenConverter, TokenKind, TokenStream};
use crate::{log_debug, log_error, log_success};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Metrics of the last tokenization
#[derive(Debug, Default, Clone)]
pub struct TokenizerMetrics {
    pub expression_bytes: usize,
    pub production_count: usize,
    pub total_tokens: usize,
    pub structural_tokens: usize,
    pub free_text_tokens: usize,
    pub function_arguments: usize,
    pub truncated: bool,
    pub normalization: NormalizationStats,
    pub duration: Duration,

    // Only filled when detailed metrics are enabled
    pub tokens_by_kind: BTreeMap<TokenKind, usize>,
}

impl TokenizerMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &TokenizerPreferences) {
        self.total_tokens += 1;

        match token {
            Token::FreeText(_) => self.free_text_tokens += 1,
            Token::Function(function) => {
                self.structural_tokens += 1;
                self.function_arguments += function.arguments.len();
            }
            _ => self.structural_tokens += 1,
        }

        if preferences.collect_detailed_metrics {
            *self.tokens_by_kind.entry(token.kind()).or_insert(0) += 1;
        }
    }
}

/// Tokenizer with preferences and metrics
pub struct ExpressionTokenizer {
    metrics: TokenizerMetrics,
    preferences: TokenizerPreferences,
    converter: TokenConverter,
}

impl ExpressionTokenizer {
    pub fn new() -> Self {
        Self::with_preferences(TokenizerPreferences::default())
    }

    pub fn with_preferences(preferences: TokenizerPreferences) -> Self {
        Self {
            metrics: TokenizerMetrics::default(),
            preferences,
            converter: TokenConverter::new(),
        }
    }

    /// Tokenize one expression into a normalized, keyed stream
    pub fn tokenize(&mut self, expression: &str) -> Result<TokenStream, ArithmeticError> {
        self.metrics = TokenizerMetrics::default();

        match self.preferences.source_name.clone() {
            Some(source) => logging::with_source_context(&source, || self.run(expression)),
            None => self.run(expression),
        }
    }

    fn run(&mut self, expression: &str) -> Result<TokenStream, ArithmeticError> {
        let started = Instant::now();
        self.metrics.expression_bytes = expression.len();
        self.metrics.truncated = expression.len() > MAX_EXPRESSION_LENGTH;

        log_debug!("Starting tokenization",
            "expression_bytes" => expression.len(),
            "max_expression_length" => MAX_EXPRESSION_LENGTH,
            "max_function_arguments" => MAX_FUNCTION_ARGUMENTS
        );

        let productions = GrammarParser::new(expression)
            .with_source(self.preferences.source_name.clone())
            .parse();
        self.metrics.production_count = productions.len();

        let mut converted = Vec::with_capacity(productions.len());
        for production in &productions {
            match self.converter.convert(production) {
                Ok(token) => converted.push(token),
                Err(error) => {
                    log_error!(error.error_code(), &error.to_string(),
                        location = production.location().clone(),
                        "rule" => production.rule_name(),
                        "expression_bytes" => expression.len()
                    );
                    return Err(error);
                }
            }
        }

        let (tokens, stats) = normalize_tokens_with_stats(converted, expression);
        self.metrics.normalization = stats;

        for token in &tokens {
            self.metrics.record_token(token, &self.preferences);
            if self.preferences.log_token_stream {
                log_debug!("Token",
                    "key" => token.key(),
                    "location" => token.location(),
                    "text" => token.text()
                );
            }
        }

        self.metrics.duration = started.elapsed();

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed successfully",
            "token_count" => self.metrics.total_tokens,
            "structural_tokens" => self.metrics.structural_tokens,
            "free_text_tokens" => self.metrics.free_text_tokens,
            "split_literals" => stats.split_literals,
            "merged_free_text" => stats.merged_free_text,
            "inserted_gaps" => stats.inserted_gaps,
            "truncated" => self.metrics.truncated,
            "duration_us" => self.metrics.duration.as_micros()
        );

        Ok(TokenStream::new(tokens))
    }

    pub fn metrics(&self) -> &TokenizerMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &TokenizerPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: TokenizerPreferences) {
        self.preferences = preferences;
    }
}

impl Default for ExpressionTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
