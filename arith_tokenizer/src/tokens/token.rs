//! Token types for arithmetic expressions
//!
//! One `Token` variant per concrete kind, each wrapping its own struct.
//! Every token carries a `Location` and a `key` that stays empty until the
//! normalizer assigns it.

use crate::utils::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "open_paren")]
    OpenParenthesis,
    #[serde(rename = "close_paren")]
    CloseParenthesis,
    #[serde(rename = "operator")]
    Operator,
    #[serde(rename = "free_text")]
    FreeText,
    #[serde(rename = "attribute")]
    Attribute,
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "literal")]
    Literal,
}

impl TokenKind {
    /// Kinds a token can actually have
    pub const CONCRETE: [TokenKind; 7] = [
        TokenKind::OpenParenthesis,
        TokenKind::CloseParenthesis,
        TokenKind::Operator,
        TokenKind::FreeText,
        TokenKind::Attribute,
        TokenKind::Function,
        TokenKind::Literal,
    ];

    /// Label used in token keys
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Unknown => "unknown",
            TokenKind::OpenParenthesis => "open_paren",
            TokenKind::CloseParenthesis => "close_paren",
            TokenKind::Operator => "operator",
            TokenKind::FreeText => "free_text",
            TokenKind::Attribute => "attribute",
            TokenKind::Function => "function",
            TokenKind::Literal => "literal",
        }
    }

    /// Tokens that take part in the arithmetic structure (everything but free text)
    pub fn is_structural(&self) -> bool {
        !matches!(self, TokenKind::FreeText | TokenKind::Unknown)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Plus),
            "-" => Some(Operator::Minus),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Explicit sign written in front of a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Sign::Plus),
            '-' => Some(Sign::Minus),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }

    pub fn to_operator(self) -> Operator {
        match self {
            Sign::Plus => Operator::Plus,
            Sign::Minus => Operator::Minus,
        }
    }
}

/// `(` or `)`; which one is recorded by the enclosing `Token` variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParenthesisToken {
    pub location: Location,
    #[serde(default)]
    pub key: String,
}

impl ParenthesisToken {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            key: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorToken {
    pub operator: Operator,
    pub location: Location,
    #[serde(default)]
    pub key: String,
}

impl OperatorToken {
    pub fn new(operator: Operator, location: Location) -> Self {
        Self {
            operator,
            location,
            key: String::new(),
        }
    }
}

/// Editable text between structural tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextToken {
    pub value: String,
    pub location: Location,
    #[serde(default)]
    pub key: String,
}

impl FreeTextToken {
    pub fn new(value: impl Into<String>, location: Location) -> Self {
        Self {
            value: value.into(),
            location,
            key: String::new(),
        }
    }

    /// Empty gap filler covering `location`
    pub fn gap(location: Location) -> Self {
        Self::new(String::new(), location)
    }

    /// Append `other` to this token, covering both locations
    pub fn merge(self, other: FreeTextToken) -> FreeTextToken {
        let location = self.location.extend(&other.location);
        let mut value = self.value;
        value.push_str(&other.value);

        FreeTextToken {
            value,
            location,
            key: self.key,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralToken {
    pub value: String,
    pub location: Location,
    #[serde(default)]
    pub key: String,
}

impl LiteralToken {
    pub fn new(value: impl Into<String>, location: Location) -> Self {
        Self {
            value: value.into(),
            location,
            key: String::new(),
        }
    }

    /// Sign written in front of the literal, if any
    pub fn sign(&self) -> Option<Sign> {
        self.value.chars().next().and_then(Sign::from_char)
    }

    /// Separate the sign into an operator token, leaving an unsigned literal.
    ///
    /// Returns `None` for literals without an explicit sign.
    pub fn split(&self) -> Option<(OperatorToken, LiteralToken)> {
        let sign = self.sign()?;
        let sign_end = self.location.start.advance(sign.as_char());
        let source = self.location.source.clone();

        let operator = OperatorToken::new(
            sign.to_operator(),
            Location::new(self.location.start, sign_end).with_source(source.clone()),
        );
        let literal = LiteralToken::new(
            &self.value[sign.as_char().len_utf8()..],
            Location::new(sign_end, self.location.end).with_source(source),
        );

        Some((operator, literal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeToken {
    pub attribute: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    pub location: Location,
    #[serde(default)]
    pub key: String,
}

impl AttributeToken {
    pub fn new(attribute: impl Into<String>, attribute_type: Option<String>, location: Location) -> Self {
        Self {
            attribute: attribute.into(),
            attribute_type,
            location,
            key: String::new(),
        }
    }

    /// Text form: `tags[name,type]` when typed, the bare name otherwise
    pub fn text(&self) -> String {
        match &self.attribute_type {
            Some(attribute_type) => format!("tags[{},{}]", self.attribute, attribute_type),
            None => self.attribute.clone(),
        }
    }
}

/// Argument of a function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FunctionArgument {
    #[serde(rename = "attribute")]
    Attribute(AttributeToken),
    #[serde(rename = "literal")]
    Literal(LiteralToken),
}

impl FunctionArgument {
    pub fn kind(&self) -> TokenKind {
        match self {
            FunctionArgument::Attribute(_) => TokenKind::Attribute,
            FunctionArgument::Literal(_) => TokenKind::Literal,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            FunctionArgument::Attribute(token) => &token.location,
            FunctionArgument::Literal(token) => &token.location,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            FunctionArgument::Attribute(token) => &token.key,
            FunctionArgument::Literal(token) => &token.key,
        }
    }

    pub fn set_key(&mut self, key: String) {
        match self {
            FunctionArgument::Attribute(token) => token.key = key,
            FunctionArgument::Literal(token) => token.key = key,
        }
    }

    pub fn text(&self) -> String {
        match self {
            FunctionArgument::Attribute(token) => token.text(),
            FunctionArgument::Literal(token) => token.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionToken {
    pub function: String,
    pub arguments: Vec<FunctionArgument>,
    pub location: Location,
    #[serde(default)]
    pub key: String,
}

impl FunctionToken {
    pub fn new(function: impl Into<String>, arguments: Vec<FunctionArgument>, location: Location) -> Self {
        Self {
            function: function.into(),
            arguments,
            location,
            key: String::new(),
        }
    }

    /// Attribute arguments in order
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeToken> {
        self.arguments.iter().filter_map(|argument| match argument {
            FunctionArgument::Attribute(attribute) => Some(attribute),
            FunctionArgument::Literal(_) => None,
        })
    }

    /// Canonical call text, arguments separated by `", "`
    pub fn text(&self) -> String {
        let arguments: Vec<String> = self.arguments.iter().map(FunctionArgument::text).collect();
        format!("{}({})", self.function, arguments.join(", "))
    }
}

/// A classified unit of an arithmetic expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Token {
    #[serde(rename = "open_paren")]
    OpenParenthesis(ParenthesisToken),
    #[serde(rename = "close_paren")]
    CloseParenthesis(ParenthesisToken),
    #[serde(rename = "operator")]
    Operator(OperatorToken),
    #[serde(rename = "free_text")]
    FreeText(FreeTextToken),
    #[serde(rename = "attribute")]
    Attribute(AttributeToken),
    #[serde(rename = "function")]
    Function(FunctionToken),
    #[serde(rename = "literal")]
    Literal(LiteralToken),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::OpenParenthesis(_) => TokenKind::OpenParenthesis,
            Token::CloseParenthesis(_) => TokenKind::CloseParenthesis,
            Token::Operator(_) => TokenKind::Operator,
            Token::FreeText(_) => TokenKind::FreeText,
            Token::Attribute(_) => TokenKind::Attribute,
            Token::Function(_) => TokenKind::Function,
            Token::Literal(_) => TokenKind::Literal,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Token::OpenParenthesis(token) | Token::CloseParenthesis(token) => &token.location,
            Token::Operator(token) => &token.location,
            Token::FreeText(token) => &token.location,
            Token::Attribute(token) => &token.location,
            Token::Function(token) => &token.location,
            Token::Literal(token) => &token.location,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Token::OpenParenthesis(token) | Token::CloseParenthesis(token) => &token.key,
            Token::Operator(token) => &token.key,
            Token::FreeText(token) => &token.key,
            Token::Attribute(token) => &token.key,
            Token::Function(token) => &token.key,
            Token::Literal(token) => &token.key,
        }
    }

    pub fn set_key(&mut self, key: String) {
        match self {
            Token::OpenParenthesis(token) | Token::CloseParenthesis(token) => token.key = key,
            Token::Operator(token) => token.key = key,
            Token::FreeText(token) => token.key = key,
            Token::Attribute(token) => token.key = key,
            Token::Function(token) => token.key = key,
            Token::Literal(token) => token.key = key,
        }
    }

    /// Expression text this token stands for
    pub fn text(&self) -> String {
        match self {
            Token::OpenParenthesis(_) => "(".to_string(),
            Token::CloseParenthesis(_) => ")".to_string(),
            Token::Operator(token) => token.operator.symbol().to_string(),
            Token::FreeText(token) => token.value.clone(),
            Token::Attribute(token) => token.text(),
            Token::Function(token) => token.text(),
            Token::Literal(token) => token.value.clone(),
        }
    }

    pub fn is_free_text(&self) -> bool {
        matches!(self, Token::FreeText(_))
    }

    /// Literal or function: a value that can be the left operand of a binary operator
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::Function(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind(), self.text())
    }
}
