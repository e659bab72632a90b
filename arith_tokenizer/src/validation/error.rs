//! Validation errors for arithmetic expressions

use crate::logging::codes;
use crate::utils::Location;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Why a token list is not a well-formed arithmetic expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Expression is empty")]
    EmptyExpression,

    #[error("Unexpected text '{text}' at {location}")]
    InvalidFreeText { text: String, location: Location },

    #[error("Missing operand at {location}")]
    MissingOperand { location: Location },

    #[error("Missing operator before {location}")]
    MissingOperator { location: Location },

    #[error("Unexpected ')' at {location}")]
    UnexpectedCloseParenthesis { location: Location },

    #[error("Unclosed '(' at {location}")]
    UnclosedParenthesis { location: Location },
}

impl ValidationError {
    pub fn invalid_free_text(text: &str, location: Location) -> Self {
        Self::InvalidFreeText {
            text: text.to_string(),
            location,
        }
    }

    pub fn missing_operand(location: Location) -> Self {
        Self::MissingOperand { location }
    }

    pub fn missing_operator(location: Location) -> Self {
        Self::MissingOperator { location }
    }

    /// Offending location, if the error has one
    pub fn location(&self) -> Option<&Location> {
        match self {
            ValidationError::EmptyExpression => None,
            ValidationError::InvalidFreeText { location, .. }
            | ValidationError::MissingOperand { location }
            | ValidationError::MissingOperator { location }
            | ValidationError::UnexpectedCloseParenthesis { location }
            | ValidationError::UnclosedParenthesis { location } => Some(location),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ValidationError::EmptyExpression => codes::validation::EMPTY_EXPRESSION,
            ValidationError::InvalidFreeText { .. } => codes::validation::INVALID_FREE_TEXT,
            ValidationError::MissingOperand { .. } => codes::validation::MISSING_OPERAND,
            ValidationError::MissingOperator { .. } => codes::validation::MISSING_OPERATOR,
            ValidationError::UnexpectedCloseParenthesis { .. } => {
                codes::validation::UNEXPECTED_CLOSE_PARENTHESIS
            }
            ValidationError::UnclosedParenthesis { .. } => codes::validation::UNCLOSED_PARENTHESIS,
        }
    }
}
