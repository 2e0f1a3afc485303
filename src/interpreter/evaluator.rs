/// Core evaluation logic.
///
/// Declares the [`Context`](core::Context) capability the evaluator calls to
/// resolve names, and the recursive [`Expr::evaluate`](crate::ast::Expr)
/// walk together with the operator dispatch table.
pub mod core;

/// Mapping-based binding contexts.
///
/// Provides [`MapContext`](context::MapContext), which stores variables and
/// native functions by name, and variable-only implementations for the
/// standard map types.
pub mod context;

/// Builtin math library.
///
/// A static table of named functions with arity checks and a pair of
/// constants, installable into a [`MapContext`](context::MapContext).
pub mod builtin;
