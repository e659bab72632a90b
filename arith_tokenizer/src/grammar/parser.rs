//! Hand-written parser for the arithmetic expression grammar
//!
//! ```text
//! expression  ::= item*
//! item        ::= whitespace+ | "(" | ")" | signed_number | operator
//!               | number | attribute_or_function | any_char
//! operator    ::= "+" | "-" | "*" | "/"
//! number      ::= digit+ ("." digit*)? | "." digit+
//! signed_number ::= ("+" | "-") number
//! identifier  ::= [A-Za-z_] [A-Za-z0-9_.]*
//! tag         ::= "tags[" tag_name ("," identifier)? "]"
//! function    ::= identifier "(" (argument ("," argument)*)? ")"
//! argument    ::= ws* (tag | identifier | signed_number | number) ws*
//! ```
//!
//! The parser never fails: anything outside the grammar becomes free text,
//! and a function call that cannot be completed is re-read as an attribute
//! followed by whatever comes after its name.

use super::productions::{ArgumentProduction, Production};
use crate::config::compile_time::tokenizer::{MAX_EXPRESSION_LENGTH, MAX_FUNCTION_ARGUMENTS};
use crate::{log_debug, log_warning};
use crate::utils::{Location, Position};

const TAGS_PREFIX: &str = "tags";

/// Byte length of the number at the start of `text`, 0 when there is none
fn number_length(text: &str) -> usize {
    let bytes = text.as_bytes();
    let is_digit = |b: &&u8| b.is_ascii_digit();

    let integer = bytes.iter().take_while(is_digit).count();
    if integer > 0 {
        return match bytes.get(integer) {
            Some(b'.') => integer + 1 + bytes[integer + 1..].iter().take_while(is_digit).count(),
            _ => integer,
        };
    }

    if bytes.first() == Some(&b'.') {
        let fraction = bytes[1..].iter().take_while(is_digit).count();
        if fraction > 0 {
            return 1 + fraction;
        }
    }

    0
}

/// Byte length of a signed number at the start of `text`, 0 when there is none
fn signed_number_length(text: &str) -> usize {
    match text.as_bytes().first() {
        Some(b'+' | b'-') => match number_length(&text[1..]) {
            0 => 0,
            length => length + 1,
        },
        _ => 0,
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
}

fn is_tag_name_char(ch: char) -> bool {
    !(ch.is_whitespace() || matches!(ch, ']' | ',' | '[' | '(' | ')'))
}

/// Splits `input` into the part that is parsed and the part kept as free text
fn split_at_limit(input: &str, limit: usize) -> (&str, &str) {
    let mut cut = limit.min(input.len());
    while !input.is_char_boundary(cut) {
        cut -= 1;
    }
    input.split_at(cut)
}

/// Turns an expression string into a flat list of productions
pub struct GrammarParser<'a> {
    input: &'a str,
    overflow: &'a str,
    position: Position,
    source: Option<String>,
    max_function_arguments: usize,
}

impl<'a> GrammarParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_limits(input, MAX_EXPRESSION_LENGTH, MAX_FUNCTION_ARGUMENTS)
    }

    pub fn with_limits(input: &'a str, max_length: usize, max_function_arguments: usize) -> Self {
        let (input, overflow) = split_at_limit(input, max_length);

        Self {
            input,
            overflow,
            position: Position::start(),
            source: None,
            max_function_arguments,
        }
    }

    /// Source name attached to every location
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn parse(mut self) -> Vec<Production> {
        let mut productions = Vec::new();

        while let Some(ch) = self.peek() {
            productions.push(self.parse_item(ch));
        }

        if !self.overflow.is_empty() {
            log_warning!("Expression exceeds parse limit; remainder kept as free text",
                "limit" => self.input.len(),
                "overflow_bytes" => self.overflow.len()
            );
            let start = self.position;
            let end = start.advance_str(self.overflow);
            productions.push(Production::FreeText {
                value: self.overflow.to_string(),
                location: self.location(start, end),
            });
        }

        productions
    }

    // === CURSOR ===

    fn rest(&self) -> &'a str {
        &self.input[self.position.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position = self.position.advance(ch);
        Some(ch)
    }

    /// Consume `length` bytes and return them
    fn take(&mut self, length: usize) -> &'a str {
        let text = &self.rest()[..length];
        self.position = self.position.advance_str(text);
        text
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let length = self
            .rest()
            .char_indices()
            .find(|(_, ch)| !predicate(*ch))
            .map(|(index, _)| index)
            .unwrap_or(self.rest().len());
        self.take(length)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn location(&self, start: Position, end: Position) -> Location {
        Location::new(start, end).with_source(self.source.clone())
    }

    fn location_from(&self, start: Position) -> Location {
        self.location(start, self.position)
    }

    // === RULES ===

    /// item ::= whitespace+ | "(" | ")" | signed_number | operator | number
    ///        | attribute_or_function | any_char
    fn parse_item(&mut self, ch: char) -> Production {
        let start = self.position;

        if ch.is_whitespace() {
            let value = self.take_while(char::is_whitespace).to_string();
            return Production::FreeText {
                value,
                location: self.location_from(start),
            };
        }

        match ch {
            '(' | ')' => {
                self.bump();
                Production::Parenthesis {
                    symbol: ch.to_string(),
                    location: self.location_from(start),
                }
            }
            '+' | '-' | '*' | '/' => match signed_number_length(self.rest()) {
                0 => {
                    self.bump();
                    Production::Operator {
                        symbol: ch.to_string(),
                        location: self.location_from(start),
                    }
                }
                length => self.parse_literal(length),
            },
            _ if number_length(self.rest()) > 0 => self.parse_literal(number_length(self.rest())),
            _ if is_identifier_start(ch) => self.parse_attribute_or_function(),
            _ => {
                self.bump();
                Production::FreeText {
                    value: ch.to_string(),
                    location: self.location_from(start),
                }
            }
        }
    }

    fn parse_literal(&mut self, length: usize) -> Production {
        let start = self.position;
        let value = self.take(length).to_string();
        Production::Literal {
            value,
            location: self.location_from(start),
        }
    }

    /// attribute_or_function ::= tag | function | identifier
    fn parse_attribute_or_function(&mut self) -> Production {
        let start = self.position;
        let name = self.take_while(is_identifier_char);

        if name == TAGS_PREFIX && self.peek() == Some('[') {
            if let Some((attribute, attribute_type)) = self.try_parse(Self::parse_tag_suffix) {
                return Production::Attribute {
                    name: attribute,
                    attribute_type,
                    location: self.location_from(start),
                };
            }
        }

        if self.peek() == Some('(') {
            if let Some(arguments) = self.try_parse(Self::parse_call_arguments) {
                return Production::Function {
                    name: name.to_string(),
                    arguments,
                    location: self.location_from(start),
                };
            }
        }

        Production::Attribute {
            name: name.to_string(),
            attribute_type: None,
            location: self.location_from(start),
        }
    }

    /// Run `rule`, rewinding the cursor when it fails
    fn try_parse<T>(&mut self, rule: fn(&mut Self) -> Result<T, String>) -> Option<T> {
        let checkpoint = self.position;
        match rule(self) {
            Ok(value) => Some(value),
            Err(reason) => {
                log_debug!("Grammar rule abandoned",
                    "reason" => reason,
                    "offset" => checkpoint.offset
                );
                self.position = checkpoint;
                None
            }
        }
    }

    /// tag_suffix ::= "[" tag_name ("," identifier)? "]"
    ///
    /// A typed tag yields its bare name and type; an untyped one keeps the
    /// whole `tags[name]` text as the attribute name.
    fn parse_tag_suffix(&mut self) -> Result<(String, Option<String>), String> {
        let open = self.position.offset - TAGS_PREFIX.len();
        if !self.eat('[') {
            return Err("expected '['".to_string());
        }

        let name = self.take_while(is_tag_name_char);
        if name.is_empty() {
            return Err("expected tag name".to_string());
        }

        if self.eat(',') {
            let attribute_type = self.take_while(is_identifier_char);
            if attribute_type.is_empty() {
                return Err("expected tag type".to_string());
            }
            if !self.eat(']') {
                return Err("expected ']'".to_string());
            }
            return Ok((name.to_string(), Some(attribute_type.to_string())));
        }

        if !self.eat(']') {
            return Err("expected ']' or ','".to_string());
        }

        Ok((self.input[open..self.position.offset].to_string(), None))
    }

    /// call_arguments ::= "(" (argument ("," argument)*)? ")"
    fn parse_call_arguments(&mut self) -> Result<Vec<ArgumentProduction>, String> {
        if !self.eat('(') {
            return Err("expected '('".to_string());
        }

        let mut arguments = Vec::new();
        self.take_while(char::is_whitespace);
        if self.eat(')') {
            return Ok(arguments);
        }

        loop {
            self.take_while(char::is_whitespace);
            arguments.push(self.parse_argument()?);
            if arguments.len() > self.max_function_arguments {
                return Err(format!(
                    "more than {} function arguments",
                    self.max_function_arguments
                ));
            }

            self.take_while(char::is_whitespace);
            match self.bump() {
                Some(',') => continue,
                Some(')') => return Ok(arguments),
                Some(other) => return Err(format!("unexpected '{}' in argument list", other)),
                None => return Err("unclosed argument list".to_string()),
            }
        }
    }

    /// argument ::= tag | identifier | signed_number | number
    fn parse_argument(&mut self) -> Result<ArgumentProduction, String> {
        let start = self.position;

        let number = match signed_number_length(self.rest()) {
            0 => number_length(self.rest()),
            length => length,
        };
        if number > 0 {
            let value = self.take(number).to_string();
            return Ok(ArgumentProduction::Literal {
                value,
                location: self.location_from(start),
            });
        }

        match self.peek() {
            Some(ch) if is_identifier_start(ch) => {}
            Some(ch) => return Err(format!("unexpected '{}' as argument", ch)),
            None => return Err("missing argument".to_string()),
        }

        let name = self.take_while(is_identifier_char);
        if name == TAGS_PREFIX && self.peek() == Some('[') {
            let (attribute, attribute_type) = self.parse_tag_suffix()?;
            return Ok(ArgumentProduction::Attribute {
                name: attribute,
                attribute_type,
                location: self.location_from(start),
            });
        }

        Ok(ArgumentProduction::Attribute {
            name: name.to_string(),
            attribute_type: None,
            location: self.location_from(start),
        })
    }
}

/// Parse with the compile-time limits and no source name
pub fn parse_expression(input: &str) -> Vec<Production> {
    GrammarParser::new(input).parse()
}
