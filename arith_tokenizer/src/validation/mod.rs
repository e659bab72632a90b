//! Expression validation
//!
//! Tokenization never rejects input; this module answers the separate
//! question of whether the tokens form a complete arithmetic expression.

pub mod error;
pub mod expression;
pub mod validator;

pub use error::{ValidationError, ValidationResult};
pub use expression::Expression;
pub use validator::validate_tokens;
