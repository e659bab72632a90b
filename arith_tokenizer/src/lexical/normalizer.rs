//! Token stream normalization
//!
//! Repairs the converted token list so every boundary is editable:
//! adjacent free text is merged, a signed literal trailing another value is
//! split into operator and literal, empty free-text gaps are inserted between
//! structural tokens, and the stream always ends in free text. A second pass
//! assigns per-kind keys.

use crate::log_debug;
use crate::tokens::key::make_token_key;
use crate::tokens::{FreeTextToken, Token, TokenKind};
use crate::utils::{Location, Position};
use std::collections::HashMap;

/// What the normalization pass changed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationStats {
    pub merged_free_text: usize,
    pub split_literals: usize,
    pub inserted_gaps: usize,
}

/// Location of a synthetic gap between `prev` and `next`.
///
/// Starts at `prev.end` (or the origin) and ends at `next.start`, falling
/// back to `prev.end` and then the origin.
pub fn space(prev: Option<&Location>, next: Option<&Location>) -> Location {
    let origin = Position::start();
    let start = prev.map(|location| location.end).unwrap_or(origin);
    let end = next
        .map(|location| location.start)
        .or_else(|| prev.map(|location| location.end))
        .unwrap_or(origin);
    let source = prev
        .and_then(|location| location.source.clone())
        .or_else(|| next.and_then(|location| location.source.clone()));

    Location {
        start,
        end: end.max(start),
        source,
    }
}

fn gap(prev: Option<&Location>, next: Option<&Location>) -> Token {
    Token::FreeText(FreeTextToken::gap(space(prev, next)))
}

/// Normalize and key `tokens`. An empty expression yields no tokens.
pub fn normalize_tokens(tokens: Vec<Token>, expression: &str) -> Vec<Token> {
    normalize_tokens_with_stats(tokens, expression).0
}

pub fn normalize_tokens_with_stats(
    tokens: Vec<Token>,
    expression: &str,
) -> (Vec<Token>, NormalizationStats) {
    let mut stats = NormalizationStats::default();
    if expression.is_empty() {
        return (Vec::new(), stats);
    }

    let mut output: Vec<Token> = Vec::with_capacity(tokens.len() * 2 + 1);

    for token in tokens {
        match (output.pop(), token) {
            (None, token) => output.push(token),

            (Some(Token::FreeText(prev)), Token::FreeText(next)) => {
                stats.merged_free_text += 1;
                output.push(Token::FreeText(prev.merge(next)));
            }

            (Some(prev), Token::Literal(literal)) if prev.is_value() && literal.sign().is_some() => {
                match literal.split() {
                    Some((operator, unsigned)) => {
                        log_debug!("Splitting signed literal",
                            "literal" => literal.value,
                            "offset" => literal.location.start.offset
                        );
                        stats.split_literals += 1;
                        stats.inserted_gaps += 2;

                        let before = gap(Some(prev.location()), Some(&operator.location));
                        let after = gap(Some(&operator.location), Some(&unsigned.location));
                        output.push(prev);
                        output.push(before);
                        output.push(Token::Operator(operator));
                        output.push(after);
                        output.push(Token::Literal(unsigned));
                    }
                    None => {
                        stats.inserted_gaps += 1;
                        let between = gap(Some(prev.location()), Some(&literal.location));
                        output.push(prev);
                        output.push(between);
                        output.push(Token::Literal(literal));
                    }
                }
            }

            (Some(prev), token) => {
                let needs_gap = !prev.is_free_text() && !token.is_free_text();
                let between = needs_gap.then(|| gap(Some(prev.location()), Some(token.location())));
                output.push(prev);
                if let Some(between) = between {
                    stats.inserted_gaps += 1;
                    output.push(between);
                }
                output.push(token);
            }
        }
    }

    if !output.last().is_some_and(Token::is_free_text) {
        stats.inserted_gaps += 1;
        let trailing = gap(output.last().map(Token::location), None);
        output.push(trailing);
    }

    assign_keys(&mut output);
    (output, stats)
}

/// Per-kind counters shared by top-level tokens and function arguments
#[derive(Debug, Default)]
struct KeyCounter {
    next_index: HashMap<TokenKind, usize>,
}

impl KeyCounter {
    fn next_key(&mut self, kind: TokenKind) -> String {
        let index = self.next_index.entry(kind).or_insert(0);
        let key = make_token_key(kind, *index);
        *index += 1;
        key
    }
}

/// Assign `kind:index` keys in stream order; function arguments are keyed
/// right after their function, from the counter of their own kind
pub fn assign_keys(tokens: &mut [Token]) {
    let mut counter = KeyCounter::default();

    for token in tokens.iter_mut() {
        token.set_key(counter.next_key(token.kind()));

        if let Token::Function(function) = token {
            for argument in function.arguments.iter_mut() {
                argument.set_key(counter.next_key(argument.kind()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{AttributeToken, LiteralToken, Operator, OperatorToken};

    fn at(start: usize, end: usize) -> Location {
        Location::new(
            Position::new(start, 1, start as u32 + 1),
            Position::new(end, 1, end as u32 + 1),
        )
    }

    fn literal(value: &str, start: usize) -> Token {
        Token::Literal(LiteralToken::new(value, at(start, start + value.len())))
    }

    fn free_text(value: &str, start: usize) -> Token {
        Token::FreeText(FreeTextToken::new(value, at(start, start + value.len())))
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn test_space() {
        let origin = Location::point(Position::start());
        assert_eq!(space(None, None), origin);
        assert_eq!(space(Some(&at(0, 2)), None), Location::point(at(0, 2).end));
        assert_eq!(space(None, Some(&at(3, 4))).end, at(3, 4).start);

        let between = space(Some(&at(0, 1)), Some(&at(1, 2)));
        assert!(between.is_empty());
        assert_eq!(between.start.offset, 1);
    }

    #[test]
    fn test_signed_literal_after_literal_is_split() {
        let (tokens, stats) =
            normalize_tokens_with_stats(vec![literal("1", 0), literal("+1", 1)], "1+1");

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Literal,
                TokenKind::FreeText,
                TokenKind::Operator,
                TokenKind::FreeText,
                TokenKind::Literal,
                TokenKind::FreeText,
            ]
        );
        assert_eq!(stats.split_literals, 1);
        assert_eq!(stats.inserted_gaps, 3);

        match (&tokens[2], &tokens[4]) {
            (Token::Operator(operator), Token::Literal(unsigned)) => {
                assert_eq!(operator.operator, Operator::Plus);
                assert_eq!(operator.location, at(1, 2));
                assert_eq!(unsigned.value, "1");
                assert_eq!(unsigned.location, at(2, 3));
            }
            other => panic!("unexpected tokens {:?}", other),
        }
    }

    #[test]
    fn test_signed_literal_after_attribute_is_kept() {
        let tokens = normalize_tokens(
            vec![
                Token::Attribute(AttributeToken::new("a", None, at(0, 1))),
                literal("-1", 1),
            ],
            "a-1",
        );

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Attribute,
                TokenKind::FreeText,
                TokenKind::Literal,
                TokenKind::FreeText,
            ]
        );
        assert_eq!(tokens[2].text(), "-1");
    }

    #[test]
    fn test_leading_signed_literal_is_kept() {
        let tokens = normalize_tokens(vec![literal("-1", 0)], "-1");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text(), "-1");
    }

    #[test]
    fn test_adjacent_free_text_is_merged() {
        let (tokens, stats) = normalize_tokens_with_stats(
            vec![free_text(" ", 0), free_text("%", 1), free_text(" ", 2)],
            " % ",
        );

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), " % ");
        assert_eq!(tokens[0].location(), &at(0, 3));
        assert_eq!(stats.merged_free_text, 2);
        assert_eq!(stats.inserted_gaps, 0);
    }

    #[test]
    fn test_gaps_between_structural_tokens() {
        let tokens = normalize_tokens(
            vec![
                Token::OpenParenthesis(crate::tokens::ParenthesisToken::new(at(0, 1))),
                literal("2", 1),
                Token::CloseParenthesis(crate::tokens::ParenthesisToken::new(at(2, 3))),
            ],
            "(2)",
        );

        assert_eq!(tokens.len(), 6);
        for pair in tokens.windows(2) {
            assert!(pair[0].is_free_text() || pair[1].is_free_text());
        }
        assert!(tokens.last().is_some_and(Token::is_free_text));
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_tokens(Vec::new(), "").is_empty());

        let tokens = normalize_tokens(Vec::new(), "x");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].location(), &Location::point(Position::start()));
    }

    #[test]
    fn test_keys_are_assigned_per_kind() {
        let tokens = normalize_tokens(
            vec![
                literal("1", 0),
                Token::Operator(OperatorToken::new(Operator::Multiply, at(1, 2))),
                literal("2", 2),
            ],
            "1*2",
        );

        let keys: Vec<&str> = tokens.iter().map(Token::key).collect();
        assert_eq!(
            keys,
            vec![
                "literal:0",
                "free_text:0",
                "operator:0",
                "free_text:1",
                "literal:1",
                "free_text:2",
            ]
        );
    }
}
