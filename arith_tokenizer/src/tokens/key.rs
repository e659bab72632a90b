//! Token keys: `"<kind>:<index>"`, unique per kind within one token stream

use super::error::ArithmeticError;
use super::token::{Token, TokenKind};
use std::fmt;
use std::str::FromStr;

/// Parsed form of a token key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenKey {
    pub kind: TokenKind,
    pub index: usize,
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.index)
    }
}

impl FromStr for TokenKey {
    type Err = ArithmeticError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        parse_token_key(key)
    }
}

pub fn make_token_key(kind: TokenKind, index: usize) -> String {
    TokenKey { kind, index }.to_string()
}

pub fn parse_token_key(key: &str) -> Result<TokenKey, ArithmeticError> {
    let malformed = || ArithmeticError::MalformedTokenKey {
        key: key.to_string(),
    };

    let (label, index) = key.split_once(':').ok_or_else(malformed)?;
    let kind = to_token_kind(label)?;
    let index = index.parse::<usize>().map_err(|_| malformed())?;

    Ok(TokenKey { kind, index })
}

/// Strict label lookup; `unknown` is not a kind any token can have
pub fn to_token_kind(label: &str) -> Result<TokenKind, ArithmeticError> {
    TokenKind::CONCRETE
        .into_iter()
        .find(|kind| kind.label() == label)
        .ok_or_else(|| ArithmeticError::UnknownTokenKind {
            label: label.to_string(),
        })
}

/// Key of the same kind, `offset` positions further on
pub fn next_similar_token_key(key: &str, offset: usize) -> Result<String, ArithmeticError> {
    let TokenKey { kind, index } = parse_token_key(key)?;
    Ok(make_token_key(kind, index + offset))
}

/// Predict the key a new token of `kind` placed just before `token` will get.
///
/// Scans `keys` up to `token`'s own key and continues after the last key of
/// `kind` seen; with no such key the new token is the first of its kind.
pub fn next_token_key_of_kind<I, S>(
    keys: I,
    token: &Token,
    kind: TokenKind,
    offset: usize,
) -> Result<String, ArithmeticError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut last_key: Option<String> = None;

    for key in keys {
        let key = key.as_ref();
        if key == token.key() {
            break;
        }
        if parse_token_key(key)?.kind == kind {
            last_key = Some(key.to_string());
        }
    }

    match last_key {
        Some(key) => next_similar_token_key(&key, offset),
        None => Ok(make_token_key(kind, 0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token::FreeTextToken;
    use crate::utils::{Location, Position};
    use assert_matches::assert_matches;

    fn keyed_free_text(key: &str) -> Token {
        let mut token = Token::FreeText(FreeTextToken::gap(Location::point(Position::start())));
        token.set_key(key.to_string());
        token
    }

    #[test]
    fn test_make_and_parse() {
        let key = make_token_key(TokenKind::Literal, 3);
        assert_eq!(key, "literal:3");
        assert_eq!(
            parse_token_key(&key).unwrap(),
            TokenKey {
                kind: TokenKind::Literal,
                index: 3
            }
        );
        assert_eq!(
            "close_paren:0".parse::<TokenKey>().unwrap().kind,
            TokenKind::CloseParenthesis
        );
    }

    #[test]
    fn test_every_concrete_label_is_accepted() {
        for kind in TokenKind::CONCRETE {
            assert_eq!(to_token_kind(kind.label()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        assert_matches!(
            to_token_kind("unknown"),
            Err(ArithmeticError::UnknownTokenKind { .. })
        );
        assert_matches!(
            parse_token_key("bogus:0"),
            Err(ArithmeticError::UnknownTokenKind { label }) if label == "bogus"
        );
    }

    #[test]
    fn test_malformed_keys() {
        assert_matches!(
            parse_token_key("literal"),
            Err(ArithmeticError::MalformedTokenKey { .. })
        );
        assert_matches!(
            parse_token_key("literal:x"),
            Err(ArithmeticError::MalformedTokenKey { .. })
        );
        assert_matches!(
            parse_token_key("literal:-1"),
            Err(ArithmeticError::MalformedTokenKey { .. })
        );
    }

    #[test]
    fn test_next_similar_token_key() {
        assert_eq!(next_similar_token_key("operator:1", 1).unwrap(), "operator:2");
        assert_eq!(next_similar_token_key("operator:1", 3).unwrap(), "operator:4");
        assert!(next_similar_token_key("nope:1", 1).is_err());
    }

    #[test]
    fn test_next_token_key_of_kind() {
        let keys = [
            "literal:0",
            "free_text:0",
            "operator:0",
            "free_text:1",
            "literal:1",
            "free_text:2",
        ];

        let token = keyed_free_text("free_text:1");
        assert_eq!(
            next_token_key_of_kind(keys, &token, TokenKind::Literal, 1).unwrap(),
            "literal:1"
        );
        assert_eq!(
            next_token_key_of_kind(keys, &token, TokenKind::Operator, 1).unwrap(),
            "operator:1"
        );
        assert_eq!(
            next_token_key_of_kind(keys, &token, TokenKind::Function, 1).unwrap(),
            "function:0"
        );

        let first = keyed_free_text("literal:0");
        assert_eq!(
            next_token_key_of_kind(keys, &first, TokenKind::Literal, 1).unwrap(),
            "literal:0"
        );
    }

    #[test]
    fn test_next_token_key_of_kind_propagates_bad_keys() {
        let token = keyed_free_text("free_text:9");
        assert!(next_token_key_of_kind(["bogus:0"], &token, TokenKind::Literal, 1).is_err());
    }
}
