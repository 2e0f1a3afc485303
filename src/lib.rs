//! # exprval
//!
//! exprval compiles infix arithmetic expressions into a tree and evaluates
//! that tree against a caller-supplied binding context.
//!
//! The language has numbers, `+ - * /`, unary `+`/`-`, parentheses,
//! variables and function calls. There is a single numeric type, `f64`.
//!
//! ```
//! use exprval::{MapContext, parse};
//!
//! let context = MapContext::with_builtins().with_variable("x", 7.0);
//! let expr = parse("max(x, 2) * -(1 + 2)").unwrap();
//! assert_eq!(expr.evaluate(&context).unwrap(), -21.0);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator tags that represent
/// an expression as an immutable tree. The tree is built by the parser and
/// walked by the evaluator.
///
/// # Responsibilities
/// - Defines one variant per syntactic construct.
/// - Renders trees back to fully parenthesized text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating an expression, with the byte offset of parse failures.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the process of turning text into a value.
///
/// This module ties together the scanner, the parser and the evaluator.
///
/// # Responsibilities
/// - Coordinates the three phases.
/// - Provides the binding context abstraction and its stock implementations.
pub mod interpreter;

pub use crate::{
    ast::Expr,
    error::Error,
    interpreter::{
        evaluator::{
            context::MapContext,
            core::{Context, EvalResult},
        },
        parser::core::{ParseOptions, ParseResult, parse_with},
    },
};

/// Parses `source` into a tree using the default limits.
///
/// # Errors
/// Returns a lexical error for characters outside the token set and a
/// syntax error for malformed token sequences, trailing input included.
///
/// # Examples
/// ```
/// use exprval::parse;
///
/// assert_eq!(parse("2 + 3 * 4").unwrap().to_string(), "(2 + (3 * 4))");
/// assert!(parse("(1 + 2").is_err());
/// ```
pub fn parse(source: &str) -> ParseResult<Expr> {
    parse_with(source, &ParseOptions::default())
}

/// Parses `source` and evaluates it once against `context`.
///
/// # Errors
/// Returns a parse error or the first error raised by `context`.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use exprval::evaluate;
///
/// let vars = HashMap::from([("x".to_string(), 7.0)]);
/// assert_eq!(evaluate("x + 1", &vars).unwrap(), 8.0);
///
/// // 'y' is not bound.
/// assert!(evaluate("y", &vars).is_err());
/// ```
pub fn evaluate<C: Context + ?Sized>(source: &str, context: &C) -> Result<f64, Error> {
    let expr = parse(source)?;
    let value = expr.evaluate(context)?;
    debug!(value, "evaluated expression");
    Ok(value)
}
