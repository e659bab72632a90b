//! Checks a token list against the arithmetic grammar
//!
//! ```text
//! expr ::= term (operator term)*
//! term ::= literal | attribute | function | "(" expr ")"
//! ```
//!
//! Blank free text is ignored. A signed literal right after an operand reads
//! as a binary operation (`a -1` is `a - 1`), matching what the user typed.

use super::error::{ValidationError, ValidationResult};
use crate::tokens::Token;
use crate::utils::Location;

/// Walks tokens left to right, tracking whether an operand is expected
#[derive(Debug, Default)]
struct ExpressionChecker<'a> {
    expect_operand: bool,
    operand_seen: bool,
    open_parentheses: Vec<&'a Location>,
    last_location: Option<&'a Location>,
}

impl<'a> ExpressionChecker<'a> {
    fn new() -> Self {
        Self {
            expect_operand: true,
            ..Self::default()
        }
    }

    fn check(&mut self, token: &'a Token) -> ValidationResult<()> {
        let location = token.location();

        match token {
            Token::FreeText(free_text) => {
                if !free_text.is_blank() {
                    return Err(ValidationError::invalid_free_text(
                        free_text.value.trim(),
                        location.clone(),
                    ));
                }
                return Ok(());
            }

            Token::Literal(literal) if !self.expect_operand && literal.sign().is_some() => {
                self.operand_seen = true;
            }

            Token::Literal(_) | Token::Attribute(_) | Token::Function(_) => {
                if !self.expect_operand {
                    return Err(ValidationError::missing_operator(location.clone()));
                }
                self.expect_operand = false;
                self.operand_seen = true;
            }

            Token::Operator(_) => {
                if self.expect_operand {
                    return Err(ValidationError::missing_operand(location.clone()));
                }
                self.expect_operand = true;
            }

            Token::OpenParenthesis(_) => {
                if !self.expect_operand {
                    return Err(ValidationError::missing_operator(location.clone()));
                }
                self.open_parentheses.push(location);
            }

            Token::CloseParenthesis(_) => {
                if self.open_parentheses.pop().is_none() {
                    return Err(ValidationError::UnexpectedCloseParenthesis {
                        location: location.clone(),
                    });
                }
                if self.expect_operand {
                    return Err(ValidationError::missing_operand(location.clone()));
                }
            }
        }

        self.last_location = Some(location);
        Ok(())
    }

    fn finish(self) -> ValidationResult<()> {
        if !self.operand_seen && self.last_location.is_none() {
            return Err(ValidationError::EmptyExpression);
        }

        if self.expect_operand {
            let location = self
                .last_location
                .map(|location| Location::point(location.end).with_source(location.source.clone()))
                .unwrap_or_default();
            return Err(ValidationError::missing_operand(location));
        }

        if let Some(open) = self.open_parentheses.last() {
            return Err(ValidationError::UnclosedParenthesis {
                location: (*open).clone(),
            });
        }

        Ok(())
    }
}

/// Validate a normalized (or raw converted) token list
pub fn validate_tokens(tokens: &[Token]) -> ValidationResult<()> {
    let mut checker = ExpressionChecker::new();
    for token in tokens {
        checker.check(token)?;
    }
    checker.finish()
}
