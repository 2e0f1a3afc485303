/// Parsing errors.
///
/// Defines the errors raised while scanning and parsing expression text:
/// characters outside the token set, malformed token sequences, missing
/// parentheses, trailing input and runaway nesting.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors a binding context can raise while an expression is
/// being evaluated, such as unknown names or wrong argument counts.
pub mod runtime_error;

pub use parse_error::{LexicalError, ParseError, SyntaxError};
pub use runtime_error::RuntimeError;

/// Any failure produced by the parse-then-evaluate pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The expression text could not be turned into a tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluating the tree against a context failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexicalError> for Error {
    fn from(error: LexicalError) -> Self {
        Self::Parse(error.into())
    }
}

impl From<SyntaxError> for Error {
    fn from(error: SyntaxError) -> Self {
        Self::Parse(error.into())
    }
}
