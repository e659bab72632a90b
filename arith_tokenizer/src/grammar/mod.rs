//! Grammar for arithmetic expressions
//!
//! Produces the flat, location-annotated production list that the token
//! converter turns into typed tokens.

pub mod parser;
pub mod productions;

pub use parser::{parse_expression, GrammarParser};
pub use productions::{ArgumentProduction, Production};
