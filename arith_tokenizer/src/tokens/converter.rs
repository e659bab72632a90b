//! Grammar productions to typed tokens

use super::error::ArithmeticError;
use super::token::*;
use crate::grammar::{ArgumentProduction, Production};
use crate::utils::Location;

/// Builds typed tokens from grammar productions. Keys are left empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenConverter;

impl TokenConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn convert_parenthesis(
        &self,
        symbol: &str,
        location: Location,
    ) -> Result<Token, ArithmeticError> {
        match symbol {
            "(" => Ok(Token::OpenParenthesis(ParenthesisToken::new(location))),
            ")" => Ok(Token::CloseParenthesis(ParenthesisToken::new(location))),
            _ => Err(ArithmeticError::UnknownParenthesis {
                symbol: symbol.to_string(),
            }),
        }
    }

    pub fn convert_operator(
        &self,
        symbol: &str,
        location: Location,
    ) -> Result<Token, ArithmeticError> {
        let operator =
            Operator::from_symbol(symbol).ok_or_else(|| ArithmeticError::UnknownOperator {
                symbol: symbol.to_string(),
            })?;

        Ok(Token::Operator(OperatorToken::new(operator, location)))
    }

    pub fn convert_free_text(&self, value: &str, location: Location) -> Token {
        Token::FreeText(FreeTextToken::new(value, location))
    }

    /// Signs stay in the value; the normalizer decides whether to split them off
    pub fn convert_literal(&self, value: &str, location: Location) -> Token {
        Token::Literal(LiteralToken::new(value, location))
    }

    pub fn convert_attribute(
        &self,
        name: &str,
        attribute_type: Option<&str>,
        location: Location,
    ) -> Token {
        Token::Attribute(self.attribute(name, attribute_type, location))
    }

    pub fn convert_function(
        &self,
        name: &str,
        arguments: Vec<FunctionArgument>,
        location: Location,
    ) -> Token {
        Token::Function(FunctionToken::new(name, arguments, location))
    }

    fn attribute(&self, name: &str, attribute_type: Option<&str>, location: Location) -> AttributeToken {
        AttributeToken::new(name, attribute_type.map(str::to_string), location)
    }

    fn convert_argument(&self, argument: &ArgumentProduction) -> FunctionArgument {
        match argument {
            ArgumentProduction::Attribute {
                name,
                attribute_type,
                location,
            } => FunctionArgument::Attribute(self.attribute(
                name,
                attribute_type.as_deref(),
                location.clone(),
            )),
            ArgumentProduction::Literal { value, location } => {
                FunctionArgument::Literal(LiteralToken::new(value.as_str(), location.clone()))
            }
        }
    }

    /// Dispatch on the production variant
    pub fn convert(&self, production: &Production) -> Result<Token, ArithmeticError> {
        match production {
            Production::Parenthesis { symbol, location } => {
                self.convert_parenthesis(symbol, location.clone())
            }
            Production::Operator { symbol, location } => {
                self.convert_operator(symbol, location.clone())
            }
            Production::FreeText { value, location } => {
                Ok(self.convert_free_text(value, location.clone()))
            }
            Production::Literal { value, location } => {
                Ok(self.convert_literal(value, location.clone()))
            }
            Production::Attribute {
                name,
                attribute_type,
                location,
            } => Ok(self.convert_attribute(name, attribute_type.as_deref(), location.clone())),
            Production::Function {
                name,
                arguments,
                location,
            } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| self.convert_argument(argument))
                    .collect();
                Ok(self.convert_function(name, arguments, location.clone()))
            }
        }
    }

    /// Convert a whole production list, stopping at the first contract violation
    pub fn convert_all(&self, productions: &[Production]) -> Result<Vec<Token>, ArithmeticError> {
        productions
            .iter()
            .map(|production| self.convert(production))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_expression;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn origin() -> Location {
        Location::point(Position::start())
    }

    #[test]
    fn test_parenthesis_conversion() {
        let converter = TokenConverter::new();

        assert_eq!(
            converter.convert_parenthesis("(", origin()).unwrap().kind(),
            TokenKind::OpenParenthesis
        );
        assert_eq!(
            converter.convert_parenthesis(")", origin()).unwrap().kind(),
            TokenKind::CloseParenthesis
        );
        assert_matches!(
            converter.convert_parenthesis("[", origin()),
            Err(ArithmeticError::UnknownParenthesis { symbol }) if symbol == "["
        );
    }

    #[test]
    fn test_operator_conversion() {
        let converter = TokenConverter::new();

        assert_matches!(
            converter.convert_operator("/", origin()),
            Ok(Token::Operator(OperatorToken { operator: Operator::Divide, .. }))
        );
        assert_matches!(
            converter.convert_operator("^", origin()),
            Err(ArithmeticError::UnknownOperator { .. })
        );
    }

    #[test]
    fn test_literal_keeps_sign() {
        let token = TokenConverter::new().convert_literal("-3", origin());
        assert_matches!(token, Token::Literal(literal) if literal.value == "-3");
    }

    #[test]
    fn test_convert_bad_production() {
        let production = Production::Operator {
            symbol: "%".to_string(),
            location: origin(),
        };
        assert!(TokenConverter::new().convert(&production).is_err());
    }

    #[test]
    fn test_convert_parsed_function() {
        let productions = parse_expression("avg(tags[foo,number], 2)");
        let tokens = TokenConverter::new().convert_all(&productions).unwrap();

        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Function(function) => {
                assert_eq!(function.function, "avg");
                assert_matches!(
                    &function.arguments[0],
                    FunctionArgument::Attribute(AttributeToken { attribute, attribute_type: Some(t), .. })
                        if attribute == "foo" && t == "number"
                );
                assert_matches!(&function.arguments[1], FunctionArgument::Literal(_));
                assert!(function.key.is_empty());
            }
            other => panic!("expected function, got {:?}", other),
        }
    }
}
