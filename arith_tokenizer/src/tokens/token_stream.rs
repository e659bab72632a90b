//! Keyed token list handed to editors and other consumers

use super::error::ArithmeticError;
use super::key::next_token_key_of_kind;
use super::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A normalized, keyed token sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wrap tokens that have already been normalized
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Keys of the top-level tokens, in stream order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::key)
    }

    /// Every assigned key in assignment order, function arguments following
    /// their function
    pub fn all_keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            keys.push(token.key());
            if let Token::Function(function) = token {
                keys.extend(function.arguments.iter().map(|argument| argument.key()));
            }
        }
        keys
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.iter().find(|token| token.key() == key)
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.tokens.iter().position(|token| token.key() == key)
    }

    /// Expression text rebuilt from the tokens
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }

    /// Key a new token of `kind` inserted just before `token` is expected to get
    pub fn next_key_of_kind(
        &self,
        token: &Token,
        kind: TokenKind,
        offset: usize,
    ) -> Result<String, ArithmeticError> {
        next_token_key_of_kind(self.all_keys(), token, kind, offset)
    }

    /// Number of keyed tokens per kind, function arguments included
    pub fn counts_by_kind(&self) -> BTreeMap<TokenKind, usize> {
        let mut counts = BTreeMap::new();
        for token in &self.tokens {
            *counts.entry(token.kind()).or_insert(0) += 1;
            if let Token::Function(function) = token {
                for argument in &function.arguments {
                    *counts.entry(argument.kind()).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Top-level tokens that are not free text
    pub fn structural(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| !token.is_free_text())
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
