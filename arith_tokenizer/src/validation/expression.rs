use super::error::ValidationError;
use super::validator::validate_tokens;
use crate::lexical::tokenize_stream;
use crate::logging::codes;
use crate::tokens::{ArithmeticError, Token, TokenStream};
use crate::{log_error, log_success};

/// An expression together with its tokens and validation outcome
#[derive(Debug, Clone)]
pub struct Expression {
    pub text: String,
    pub tokens: TokenStream,
    pub validation: Result<(), ValidationError>,
}

impl Expression {
    /// Tokenize and validate `text`
    pub fn new(text: &str) -> Result<Self, ArithmeticError> {
        let tokens = tokenize_stream(text)?;
        let validation = validate_tokens(tokens.tokens());

        match &validation {
            Ok(()) => {
                log_success!(codes::success::EXPRESSION_VALIDATION_PASSED,
                    "Expression is valid",
                    "tokens" => tokens.len()
                );
            }
            Err(error) => match error.location() {
                Some(location) => log_error!(error.error_code(), &error.to_string(),
                    location = location.clone(),
                    "expression" => text
                ),
                None => log_error!(error.error_code(), &error.to_string(),
                    "expression" => text
                ),
            },
        }

        Ok(Self {
            text: text.to_string(),
            tokens,
            validation,
        })
    }

    /// Rebuild the text from edited tokens and tokenize it again, so keys
    /// and gaps are consistent with the new text
    pub fn from_tokens<I>(tokens: I) -> Result<Self, ArithmeticError>
    where
        I: IntoIterator<Item = Token>,
    {
        let text: String = tokens.into_iter().map(|token| token.text()).collect();
        Self::new(&text)
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_ok()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.validation.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Operator, OperatorToken, TokenKind};

    #[test]
    fn test_valid_expression() {
        let expression = Expression::new("p95(span.duration) / 1000").unwrap();

        assert!(expression.is_valid());
        assert!(expression.error().is_none());
        assert_eq!(expression.text, "p95(span.duration) / 1000");
    }

    #[test]
    fn test_invalid_expression_keeps_tokens() {
        let expression = Expression::new("1 + ").unwrap();

        assert!(!expression.is_valid());
        assert_eq!(
            expression.error().map(ValidationError::error_code),
            Some(codes::validation::MISSING_OPERAND)
        );
        assert!(!expression.tokens.is_empty());
    }

    #[test]
    fn test_from_edited_tokens() {
        let original = Expression::new("a + b").unwrap();
        let mut tokens = original.tokens.into_tokens();

        let location = tokens[2].location().clone();
        tokens[2] = Token::Operator(OperatorToken::new(Operator::Multiply, location));

        let edited = Expression::from_tokens(tokens).unwrap();
        assert_eq!(edited.text, "a * b");
        assert!(edited.is_valid());
        assert_eq!(
            edited.tokens.get("operator:0").map(Token::kind),
            Some(TokenKind::Operator)
        );
    }
}
