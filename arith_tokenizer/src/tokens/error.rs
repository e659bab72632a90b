use crate::logging::codes;

/// Contract violations between the grammar, the converter and key handling.
///
/// Malformed user input never produces one of these; it surfaces as free text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("Unknown parenthesis symbol: '{symbol}'")]
    UnknownParenthesis { symbol: String },

    #[error("Unknown operator symbol: '{symbol}'")]
    UnknownOperator { symbol: String },

    #[error("Unknown token kind: '{label}'")]
    UnknownTokenKind { label: String },

    #[error("Malformed token key: '{key}'")]
    MalformedTokenKey { key: String },
}

impl ArithmeticError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ArithmeticError::UnknownParenthesis { .. } => codes::conversion::UNKNOWN_PARENTHESIS,
            ArithmeticError::UnknownOperator { .. } => codes::conversion::UNKNOWN_OPERATOR,
            ArithmeticError::UnknownTokenKind { .. } => codes::keys::UNKNOWN_TOKEN_KIND,
            ArithmeticError::MalformedTokenKey { .. } => codes::keys::MALFORMED_TOKEN_KEY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let error = ArithmeticError::UnknownOperator {
            symbol: "%".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown operator symbol: '%'");
        assert_eq!(error.error_code().as_str(), "E021");

        let error = ArithmeticError::UnknownTokenKind {
            label: "bogus".to_string(),
        };
        assert_eq!(error.error_code(), codes::keys::UNKNOWN_TOKEN_KIND);
    }
}
