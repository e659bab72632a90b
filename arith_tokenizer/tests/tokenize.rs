use arith_tokenizer::tokens::{FunctionArgument, Operator};
use arith_tokenizer::{
    make_token_key, next_token_key_of_kind, parse_token_key, tokenize_expression,
    tokenize_stream, ArithmeticError, Token, TokenKind,
};
use assert_matches::assert_matches;
use std::collections::{BTreeMap, HashSet};

const EXPRESSIONS: &[&str] = &[
    "1+1",
    "1 + 1",
    "  ",
    "a",
    "-1",
    "a -1",
    "(1 + 2) * 3",
    "percentile(transaction.duration, 0.5) + 1",
    "count() / tags[foo,number]",
    "p50(span.duration) * -2 + avg(span.self_time)",
    "1 % 2 ^ x",
    "((",
    "sum(",
];

fn all_keys(tokens: &[Token]) -> Vec<String> {
    let mut keys = Vec::new();
    for token in tokens {
        keys.push(token.key().to_string());
        if let Token::Function(function) = token {
            keys.extend(function.arguments.iter().map(|a| a.key().to_string()));
        }
    }
    keys
}

#[test]
fn test_no_two_structural_tokens_are_adjacent() {
    for expression in EXPRESSIONS {
        let tokens = tokenize_expression(expression).unwrap();
        for pair in tokens.windows(2) {
            assert!(
                pair[0].is_free_text() || pair[1].is_free_text(),
                "adjacent structural tokens in {:?}: {} {}",
                expression,
                pair[0].key(),
                pair[1].key()
            );
        }
    }
}

#[test]
fn test_stream_ends_in_free_text() {
    for expression in EXPRESSIONS {
        let tokens = tokenize_expression(expression).unwrap();
        assert!(
            tokens.last().is_some_and(Token::is_free_text),
            "{:?} does not end in free text",
            expression
        );
    }
}

#[test]
fn test_empty_expression_has_no_tokens() {
    assert!(tokenize_expression("").unwrap().is_empty());
}

#[test]
fn test_whitespace_only_is_one_free_text() {
    let tokens = tokenize_expression("  ").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_matches!(&tokens[0], Token::FreeText(free_text) if free_text.value == "  ");
    assert_eq!(tokens[0].location().start.offset, 0);
    assert_eq!(tokens[0].location().end.offset, 2);
    assert_eq!(tokens[0].key(), "free_text:0");
}

#[test]
fn test_signed_literal_after_literal_is_split() {
    let tokens = tokenize_expression("1+1").unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Literal,
            TokenKind::FreeText,
            TokenKind::Operator,
            TokenKind::FreeText,
            TokenKind::Literal,
            TokenKind::FreeText,
        ]
    );
    assert_matches!(&tokens[2], Token::Operator(op) if op.operator == Operator::Plus);
    assert_matches!(&tokens[4], Token::Literal(literal) if literal.value == "1");
    assert_eq!(tokens[2].location().start.offset, 1);
    assert_eq!(tokens[4].location().start.offset, 2);
}

#[test]
fn test_keys_are_unique_and_contiguous_per_kind() {
    for expression in EXPRESSIONS {
        let tokens = tokenize_expression(expression).unwrap();
        let keys = all_keys(&tokens);

        let unique: HashSet<&String> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len(), "duplicate keys in {:?}", expression);

        let mut indices: BTreeMap<TokenKind, Vec<usize>> = BTreeMap::new();
        for key in &keys {
            let parsed = parse_token_key(key).unwrap();
            indices.entry(parsed.kind).or_default().push(parsed.index);
        }
        for (kind, found) in indices {
            let expected: Vec<usize> = (0..found.len()).collect();
            assert_eq!(found, expected, "{} keys in {:?}", kind, expression);
        }
    }
}

#[test]
fn test_key_round_trip() {
    for kind in TokenKind::CONCRETE {
        let key = make_token_key(kind, 7);
        let parsed = parse_token_key(&key).unwrap();
        assert_eq!((parsed.kind, parsed.index), (kind, 7));
    }
}

#[test]
fn test_bad_keys_are_rejected() {
    assert_matches!(
        parse_token_key("bogus:0"),
        Err(ArithmeticError::UnknownTokenKind { label }) if label == "bogus"
    );
    assert_matches!(
        parse_token_key("literal"),
        Err(ArithmeticError::MalformedTokenKey { .. })
    );
    assert_matches!(
        parse_token_key("literal:x"),
        Err(ArithmeticError::MalformedTokenKey { .. })
    );
}

#[test]
fn test_function_arguments_share_counters() {
    let tokens = tokenize_expression("percentile(transaction.duration, 0.5) + 1").unwrap();

    let keys = all_keys(&tokens);
    assert_eq!(
        keys,
        vec![
            "function:0",
            "attribute:0",
            "literal:0",
            "free_text:0",
            "operator:0",
            "free_text:1",
            "literal:1",
            "free_text:2",
        ]
    );

    let Token::Function(function) = &tokens[0] else {
        panic!("expected a function, got {:?}", tokens[0]);
    };
    assert_eq!(function.function, "percentile");
    assert_matches!(
        &function.arguments[0],
        FunctionArgument::Attribute(attribute) if attribute.attribute == "transaction.duration"
    );
    assert_matches!(
        &function.arguments[1],
        FunctionArgument::Literal(literal) if literal.value == "0.5"
    );
}

#[test]
fn test_attribute_arguments_continue_top_level_counter() {
    let tokens = tokenize_expression("a + f(b, c)").unwrap();

    assert_eq!(
        all_keys(&tokens),
        vec![
            "attribute:0",
            "free_text:0",
            "operator:0",
            "free_text:1",
            "function:0",
            "attribute:1",
            "attribute:2",
            "free_text:2",
        ]
    );
}

#[test]
fn test_predicted_key_matches_retokenized_stream() {
    let stream = tokenize_stream("a + 1").unwrap();
    let trailing = stream.tokens().last().unwrap();

    let predicted = stream.next_key_of_kind(trailing, TokenKind::Operator, 1).unwrap();
    assert_eq!(predicted, "operator:1");

    let extended = tokenize_stream("a + 1 * 2").unwrap();
    assert!(extended.get(&predicted).is_some());
    assert_eq!(extended.get(&predicted).map(Token::kind), Some(TokenKind::Operator));
}

#[test]
fn test_first_key_of_missing_kind() {
    let tokens = tokenize_expression("a + b").unwrap();
    let keys: Vec<&str> = tokens.iter().map(Token::key).collect();

    let predicted = next_token_key_of_kind(&keys, &tokens[0], TokenKind::Function, 1).unwrap();
    assert_eq!(predicted, "function:0");
}

#[test]
fn test_unparseable_input_is_free_text() {
    let tokens = tokenize_expression("1 % 2").unwrap();

    assert_eq!(tokens.len(), 4);
    assert_matches!(&tokens[1], Token::FreeText(free_text) if free_text.value == " % ");
    assert_eq!(tokens[2].key(), "literal:1");
}

#[test]
fn test_locations_cover_the_input() {
    let expression = "(a + 2) * -3";
    let tokens = tokenize_expression(expression).unwrap();

    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.location().start.offset, offset, "gap before {}", token.key());
        offset = token.location().end.offset;
    }
    assert_eq!(offset, expression.len());
}
