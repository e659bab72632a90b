//! Log codes and the metadata registered for each of them
//!
//! Error codes (`E0xx`, `ERR0xx`) and success codes (`I0xx`) share one
//! registry. Every code the crate emits must be registered here; unregistered
//! codes still log, but classify as `Category::Unregistered`.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Identifier of a loggable condition, e.g. `E021`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn metadata(&self) -> Option<&'static CodeMetadata> {
        registry().get(self.0).copied()
    }

    pub fn is_registered(&self) -> bool {
        self.metadata().is_some()
    }

    pub fn category(&self) -> Category {
        self.metadata()
            .map(|metadata| metadata.category)
            .unwrap_or(Category::Unregistered)
    }

    pub fn severity(&self) -> Severity {
        self.metadata()
            .map(|metadata| metadata.severity)
            .unwrap_or(Severity::Medium)
    }

    /// Unregistered codes are treated as recoverable
    pub fn is_recoverable(&self) -> bool {
        self.metadata()
            .map(|metadata| metadata.recoverable)
            .unwrap_or(true)
    }

    pub fn description(&self) -> Option<&'static str> {
        self.metadata().map(|metadata| metadata.description)
    }

    pub fn action(&self) -> Option<&'static str> {
        self.metadata().map(|metadata| metadata.action)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Area of the crate a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    System,
    Conversion,
    Keys,
    Tokenization,
    Validation,
    Unregistered,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Conversion => "conversion",
            Category::Keys => "keys",
            Category::Tokenization => "tokenization",
            Category::Validation => "validation",
            Category::Unregistered => "unregistered",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: Code,
    pub category: Category,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub action: &'static str,
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Grammar productions the token converter cannot represent
pub mod conversion {
    use super::Code;

    pub const UNKNOWN_PARENTHESIS: Code = Code::new("E020");
    pub const UNKNOWN_OPERATOR: Code = Code::new("E021");
}

pub mod keys {
    use super::Code;

    pub const UNKNOWN_TOKEN_KIND: Code = Code::new("E030");
    pub const MALFORMED_TOKEN_KEY: Code = Code::new("E031");
}

pub mod validation {
    use super::Code;

    pub const EMPTY_EXPRESSION: Code = Code::new("E040");
    pub const INVALID_FREE_TEXT: Code = Code::new("E041");
    pub const MISSING_OPERAND: Code = Code::new("E042");
    pub const MISSING_OPERATOR: Code = Code::new("E043");
    pub const UNEXPECTED_CLOSE_PARENTHESIS: Code = Code::new("E044");
    pub const UNCLOSED_PARENTHESIS: Code = Code::new("E045");
}

pub mod success {
    use super::Code;

    pub const LOGGING_INITIALIZED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const EXPRESSION_VALIDATION_PASSED: Code = Code::new("I040");
}

/// Every registered code, in registry order
pub fn all_codes() -> impl Iterator<Item = Code> {
    REGISTRY.iter().map(|metadata| metadata.code)
}

const fn entry(
    code: Code,
    category: Category,
    severity: Severity,
    recoverable: bool,
    description: &'static str,
    action: &'static str,
) -> CodeMetadata {
    CodeMetadata {
        code,
        category,
        severity,
        recoverable,
        description,
        action,
    }
}

const FIX_CONVERTER: &str = "Fix the grammar production feeding the token converter";
const USE_TOKENIZER_KEYS: &str = "Only use keys produced by the tokenizer or make_token_key";

static REGISTRY: [CodeMetadata; 15] = [
    entry(
        system::INTERNAL_ERROR,
        Category::System,
        Severity::Critical,
        false,
        "Internal tokenizer error",
        "File a bug report with the expression that triggered it",
    ),
    entry(
        system::INITIALIZATION_FAILURE,
        Category::System,
        Severity::Critical,
        false,
        "Logging or configuration could not be initialized",
        "Check the build profile and the ARITH_* environment variables",
    ),
    entry(
        conversion::UNKNOWN_PARENTHESIS,
        Category::Conversion,
        Severity::High,
        false,
        "Grammar produced a parenthesis symbol other than '(' or ')'",
        FIX_CONVERTER,
    ),
    entry(
        conversion::UNKNOWN_OPERATOR,
        Category::Conversion,
        Severity::High,
        false,
        "Grammar produced an operator symbol other than + - * /",
        FIX_CONVERTER,
    ),
    entry(
        keys::UNKNOWN_TOKEN_KIND,
        Category::Keys,
        Severity::High,
        false,
        "Token key names an unknown token kind",
        USE_TOKENIZER_KEYS,
    ),
    entry(
        keys::MALFORMED_TOKEN_KEY,
        Category::Keys,
        Severity::High,
        false,
        "Token key is not of the form kind:index",
        USE_TOKENIZER_KEYS,
    ),
    entry(
        validation::EMPTY_EXPRESSION,
        Category::Validation,
        Severity::Low,
        true,
        "Expression contains no operands",
        "Enter at least one attribute, function or number",
    ),
    entry(
        validation::INVALID_FREE_TEXT,
        Category::Validation,
        Severity::Low,
        true,
        "Expression contains text outside the arithmetic grammar",
        "Remove or replace the highlighted text",
    ),
    entry(
        validation::MISSING_OPERAND,
        Category::Validation,
        Severity::Low,
        true,
        "An operator or parenthesis is missing its operand",
        "Add an operand after the highlighted token",
    ),
    entry(
        validation::MISSING_OPERATOR,
        Category::Validation,
        Severity::Low,
        true,
        "Two operands are adjacent without an operator",
        "Insert + - * or / between the operands",
    ),
    entry(
        validation::UNEXPECTED_CLOSE_PARENTHESIS,
        Category::Validation,
        Severity::Low,
        true,
        "Closing parenthesis without a matching opening parenthesis",
        "Remove the parenthesis or add a matching '('",
    ),
    entry(
        validation::UNCLOSED_PARENTHESIS,
        Category::Validation,
        Severity::Low,
        true,
        "Opening parenthesis is never closed",
        "Add a matching ')'",
    ),
    entry(
        success::LOGGING_INITIALIZED,
        Category::System,
        Severity::Low,
        true,
        "Logging initialized",
        "None",
    ),
    entry(
        success::TOKENIZATION_COMPLETE,
        Category::Tokenization,
        Severity::Low,
        true,
        "Expression tokenized",
        "None",
    ),
    entry(
        success::EXPRESSION_VALIDATION_PASSED,
        Category::Validation,
        Severity::Low,
        true,
        "Expression is a valid arithmetic expression",
        "None",
    ),
];

static INDEX: OnceLock<HashMap<&'static str, &'static CodeMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static CodeMetadata> {
    INDEX.get_or_init(|| {
        REGISTRY
            .iter()
            .map(|metadata| (metadata.code.as_str(), metadata))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        assert_eq!(registry().len(), REGISTRY.len());
    }

    #[test]
    fn test_error_codes_are_registered() {
        for code in [
            conversion::UNKNOWN_OPERATOR,
            keys::MALFORMED_TOKEN_KEY,
            validation::UNCLOSED_PARENTHESIS,
            success::TOKENIZATION_COMPLETE,
        ] {
            assert!(code.is_registered(), "{} is not registered", code);
        }
    }

    #[test]
    fn test_metadata_lookup() {
        let metadata = conversion::UNKNOWN_OPERATOR.metadata();

        assert_eq!(metadata.map(|m| m.code), Some(conversion::UNKNOWN_OPERATOR));
        assert_eq!(metadata.map(|m| m.category), Some(Category::Conversion));
        assert!(Code::new("E999").metadata().is_none());
    }

    #[test]
    fn test_unregistered_code_defaults() {
        let code = Code::new("E999");

        assert_eq!(code.category(), Category::Unregistered);
        assert_eq!(code.severity(), Severity::Medium);
        assert!(code.is_recoverable());
        assert!(code.description().is_none());
    }

    #[test]
    fn test_classification() {
        assert_eq!(conversion::UNKNOWN_PARENTHESIS.category(), Category::Conversion);
        assert_eq!(system::INTERNAL_ERROR.severity(), Severity::Critical);
        assert!(!keys::UNKNOWN_TOKEN_KIND.is_recoverable());
        assert!(validation::MISSING_OPERATOR.is_recoverable());
        assert_eq!(all_codes().count(), 15);
    }
}
