use thiserror::Error;

/// Result type used by the lexer and the tree builder.
pub type ParseResult<T> = Result<T, ParseError>;

/// Represents all errors that can occur during lexing or tree building.
///
/// A `ParseError` means the input could not be segmented or recognised at
/// all, so no tree is produced. Each variant carries the piece of source text
/// the problem was found at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input could not be segmented.
    #[error("Syntax error: {message} near '{near}'.")]
    SyntaxError {
        /// What went wrong.
        message: String,
        /// The source text at which the problem was detected.
        near:    String,
    },
    /// An operator token that the language does not define.
    #[error("Unknown operator '{operator}'.")]
    UnknownOperator {
        /// The operator text.
        operator: String,
    },
    /// A numeric literal that the decimal parser rejected.
    #[error("Invalid number literal '{literal}'.")]
    InvalidNumber {
        /// The literal text.
        literal: String,
    },
    /// Parentheses or calls nested deeper than the builder allows.
    #[error("Expression nests deeper than {limit} levels.")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
}

impl ParseError {
    /// Builds a [`ParseError::SyntaxError`] from a message and the offending
    /// text.
    ///
    /// Only the first few characters of `near` are kept so that messages for
    /// long inputs stay readable.
    ///
    /// # Example
    /// ```
    /// use tally::error::ParseError;
    ///
    /// let err = ParseError::syntax("unterminated string literal", "\"abc");
    /// assert_eq!(err.to_string(),
    ///            "Syntax error: unterminated string literal near '\"abc'.");
    /// ```
    #[must_use]
    pub fn syntax(message: impl Into<String>, near: &str) -> Self {
        const NEAR_LIMIT: usize = 24;

        let near = match near.char_indices().nth(NEAR_LIMIT) {
            Some((cut, _)) => format!("{}...", &near[..cut]),
            None => near.to_string(),
        };
        Self::SyntaxError { message: message.into(),
                            near }
    }
}
