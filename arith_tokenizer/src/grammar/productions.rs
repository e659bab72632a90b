//! Raw grammar productions, before conversion into typed tokens

use crate::utils::Location;
use serde::Serialize;

/// Argument of a function call production
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArgumentProduction {
    Attribute {
        name: String,
        attribute_type: Option<String>,
        location: Location,
    },
    Literal {
        value: String,
        location: Location,
    },
}

/// One node of the flat production list emitted by the grammar parser.
///
/// Symbols are kept as text; checking them is the converter's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Production {
    Parenthesis {
        symbol: String,
        location: Location,
    },
    Operator {
        symbol: String,
        location: Location,
    },
    FreeText {
        value: String,
        location: Location,
    },
    /// Number, possibly with a leading sign
    Literal {
        value: String,
        location: Location,
    },
    Attribute {
        name: String,
        attribute_type: Option<String>,
        location: Location,
    },
    Function {
        name: String,
        arguments: Vec<ArgumentProduction>,
        location: Location,
    },
}

impl Production {
    pub fn location(&self) -> &Location {
        match self {
            Production::Parenthesis { location, .. }
            | Production::Operator { location, .. }
            | Production::FreeText { location, .. }
            | Production::Literal { location, .. }
            | Production::Attribute { location, .. }
            | Production::Function { location, .. } => location,
        }
    }

    /// Short rule name, used in debug logging
    pub fn rule_name(&self) -> &'static str {
        match self {
            Production::Parenthesis { .. } => "parenthesis",
            Production::Operator { .. } => "operator",
            Production::FreeText { .. } => "free_text",
            Production::Literal { .. } => "literal",
            Production::Attribute { .. } => "attribute",
            Production::Function { .. } => "function",
        }
    }
}
