//! Token system for arithmetic expressions
//!
//! This module holds everything downstream of the grammar: the typed token
//! model, the converter from grammar productions, the key helpers used for
//! stable identities, and the keyed `TokenStream` handed to consumers.
//!
//! # Overview
//!
//! A tokenized expression is a flat list of tokens in source order. Every
//! token is one of seven kinds:
//!
//! - **Parentheses** - `open_paren` / `close_paren`
//! - **Operators** - `+ - * /`
//! - **Literals** - numbers, possibly with an explicit sign
//! - **Attributes** - `span.duration`, `tags[foo,number]`
//! - **Functions** - `p50(span.duration)` with attribute or literal arguments
//! - **Free text** - editable gaps and anything outside the grammar
//!
//! ## Keys
//!
//! After normalization each token carries a key `"<kind>:<index>"`. Indices
//! count per kind in stream order, starting at 0, so keys are unique within
//! one stream and stay stable while unrelated parts of the expression change.
//! Function arguments are keyed from the counter of their own kind, right
//! after their function.
//!
//! ## Errors
//!
//! `ArithmeticError` marks a broken contract between the grammar and the
//! converter, or a key that was not produced by this crate. Bad user input is
//! never an error; it becomes free text.

pub mod converter;
pub mod error;
pub mod key;
pub mod token;
pub mod token_stream;

pub use converter::TokenConverter;
pub use error::ArithmeticError;
pub use key::{
    make_token_key, next_similar_token_key, next_token_key_of_kind, parse_token_key,
    to_token_kind, TokenKey,
};
pub use token::{
    AttributeToken, FreeTextToken, FunctionArgument, FunctionToken, LiteralToken, Operator,
    OperatorToken, ParenthesisToken, Sign, Token, TokenKind,
};
pub use token_stream::TokenStream;

pub use crate::utils::{Location, Position, SourceMap};
