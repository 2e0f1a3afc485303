/// A character outside the recognized token set, or a malformed numeric
/// literal such as a lone `.`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error at offset {position}: Unexpected character '{text}'.")]
pub struct LexicalError {
    /// The offending source text.
    pub text:     String,
    /// Byte offset of the offending text.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while building a tree from tokens.
pub enum SyntaxError {
    /// Found a token that cannot start or continue the current production.
    #[error("Error at offset {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input where an operand was required.
    #[error("Error at offset {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset of the end of input.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at offset {position}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// Byte offset where `)` was expected.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Error at offset {position}: Extra tokens after expression: {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Byte offset of the first extra token.
        position: usize,
    },
    /// The expression nests deeper than the configured limit.
    #[error("Error at offset {position}: Expression nests deeper than {limit} levels.")]
    NestingTooDeep {
        /// The configured limit.
        limit:    usize,
        /// Byte offset where the limit was exceeded.
        position: usize,
    },
    /// The tree would be taller than the configured limit.
    #[error("Error at offset {position}: Expression is taller than {limit} levels.")]
    ExpressionTooLarge {
        /// The configured limit.
        limit:    usize,
        /// Byte offset where the limit was exceeded.
        position: usize,
    },
}

impl SyntaxError {
    /// Byte offset in the source at which the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::ExpressionTooLarge { position, .. } => *position,
        }
    }
}

/// Either phase of turning text into a tree can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The scanner rejected a character.
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    /// The parser rejected the token sequence.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Byte offset in the source at which the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Lexical(e) => e.position,
            Self::Syntax(e) => e.position(),
        }
    }
}
