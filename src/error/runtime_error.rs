#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while evaluating against a context.
///
/// The evaluator itself never fails; these are raised by a
/// [`Context`](crate::interpreter::evaluator::core::Context) implementation
/// and passed through unchanged. Division by zero is not an error and follows
/// IEEE 754 semantics.
pub enum RuntimeError {
    /// Tried to use a variable the context does not know.
    #[error("Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function the context does not know.
    #[error("Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Function '{name}' expects {expected} argument(s) but got {found}.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Human readable description of the accepted arity.
        expected: String,
        /// The number of arguments actually supplied.
        found:    usize,
    },
    /// A callee rejected one of its arguments.
    #[error("Invalid argument to '{name}': {details}.")]
    InvalidArgument {
        /// The name of the function.
        name:    String,
        /// Details about why the argument is invalid.
        details: String,
    },
}
