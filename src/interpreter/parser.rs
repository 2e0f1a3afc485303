/// Parser state, options and entry points.
///
/// Holds the [`Parser`](core::Parser) that owns the scanner, the nesting
/// guard that bounds recursion and tree height, and the top-level
/// `parse_with` function.
pub mod core;

/// Unary prefix operators and leaf productions.
///
/// Handles `+`/`-` prefixes, numeric literals, variables, function calls and
/// parenthesized sub-expressions.
pub mod unary;

/// Binary operator levels.
///
/// Implements the left-associative additive and multiplicative levels.
pub mod binary;

/// Utility functions for the parser.
///
/// Provides argument list parsing and token expectation helpers.
pub mod utils;
