//! Tokenizer for column arithmetic expressions such as
//! `percentile(transaction.duration, 0.5) + 1`.
//!
//! [`tokenize_expression`] turns raw text into a flat list of keyed tokens in
//! which every boundary is editable free text. Parsing never fails on user
//! input; [`validate_tokens`] separately reports whether the tokens form a
//! complete expression.
//!
//! ```
//! use arith_tokenizer::{tokenize_expression, TokenKind};
//!
//! let tokens = tokenize_expression("1+1").unwrap();
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
//! assert_eq!(kinds[2], TokenKind::Operator);
//! assert_eq!(tokens[4].key(), "literal:1");
//! ```

pub mod logging;
pub mod config;
pub mod grammar;
pub mod lexical;
pub mod tokens;
pub mod utils;
pub mod validation;

pub use lexical::{
    tokenize_expression, tokenize_expression_with_preferences, tokenize_stream,
    ExpressionTokenizer,
};
pub use tokens::{
    make_token_key, next_similar_token_key, next_token_key_of_kind, parse_token_key,
    to_token_kind, ArithmeticError, Token, TokenKey, TokenKind, TokenStream,
};
pub use validation::{validate_tokens, Expression, ValidationError};
