use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::RuntimeError,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Resolves names on behalf of the evaluator.
///
/// The evaluator itself knows nothing about variables or functions; every
/// identifier in a tree is looked up through this trait at evaluation time.
/// Either method may fail, which aborts the whole evaluation and returns the
/// error to the caller unchanged.
///
/// Implementations that are `Sync` may be shared by several threads
/// evaluating the same tree, since evaluation only ever reads the context.
pub trait Context {
    /// Returns the value bound to `name`.
    ///
    /// # Errors
    /// Conventionally [`RuntimeError::UnknownVariable`] when `name` is unbound.
    fn resolve_variable(&self, name: &str) -> EvalResult<f64>;

    /// Invokes the function `name` with already evaluated arguments.
    ///
    /// # Errors
    /// Conventionally [`RuntimeError::UnknownFunction`] when `name` is
    /// unknown, or whatever error the callee raises.
    fn call_function(&self, name: &str, arguments: &[f64]) -> EvalResult<f64>;
}

impl<C: Context + ?Sized> Context for &C {
    fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
        (**self).resolve_variable(name)
    }

    fn call_function(&self, name: &str, arguments: &[f64]) -> EvalResult<f64> {
        (**self).call_function(name, arguments)
    }
}

impl<C: Context + ?Sized> Context for Box<C> {
    fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
        (**self).resolve_variable(name)
    }

    fn call_function(&self, name: &str, arguments: &[f64]) -> EvalResult<f64> {
        (**self).call_function(name, arguments)
    }
}

impl Expr {
    /// Evaluates the tree against `context`.
    ///
    /// Children are evaluated before their parent, function arguments left
    /// to right. Nothing is cached, so every call walks the whole tree.
    /// Arithmetic follows IEEE 754: dividing by zero yields an infinity or
    /// NaN rather than an error.
    ///
    /// # Errors
    /// Returns the first error raised by `context`.
    ///
    /// ## Example
    /// ```
    /// use exprval::{MapContext, parse};
    ///
    /// let context = MapContext::new().with_variable("x", 7.0);
    /// let expr = parse("x + 1").unwrap();
    /// assert_eq!(expr.evaluate(&context).unwrap(), 8.0);
    /// ```
    pub fn evaluate<C: Context + ?Sized>(&self, context: &C) -> EvalResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Variable(name) => resolve_variable(name, context),
            Self::Unary { op, operand } => Ok(op.apply(operand.evaluate(context)?)),
            Self::Binary { .. } => self.evaluate_chain(context),
            Self::FunctionCall { name, arguments } => call_function(name, arguments, context),
        }
    }

    /// Evaluates a left-leaning chain of binary nodes.
    ///
    /// The parser folds `a + b + c` into a tree whose left spine is as long
    /// as the chain, so the spine is walked in a loop and only the right
    /// operands recurse. Operands are still evaluated left to right.
    #[inline(never)]
    fn evaluate_chain<C: Context + ?Sized>(&self, context: &C) -> EvalResult<f64> {
        let mut spine = Vec::new();
        let mut node = self;
        while let Self::Binary { left, op, right } = node {
            spine.push((*op, right.as_ref()));
            node = left;
        }
        let mut value = node.evaluate(context)?;
        for (op, right) in spine.into_iter().rev() {
            value = op.apply(value, right.evaluate(context)?);
        }
        Ok(value)
    }
}

#[inline(never)]
fn resolve_variable<C: Context + ?Sized>(name: &str, context: &C) -> EvalResult<f64> {
    trace!(name, "resolving variable");
    context.resolve_variable(name)
}

#[inline(never)]
fn call_function<C: Context + ?Sized>(name: &str, arguments: &[Expr], context: &C) -> EvalResult<f64> {
    let values = arguments.iter()
                          .map(|argument| argument.evaluate(context))
                          .collect::<EvalResult<Vec<_>>>()?;
    trace!(name, arguments = ?values, "calling function");
    context.call_function(name, &values)
}

impl BinaryOperator {
    /// Applies the operator to two evaluated operands.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
        }
    }
}

impl UnaryOperator {
    /// Applies the operator to an evaluated operand.
    #[must_use]
    pub fn apply(self, operand: f64) -> f64 {
        match self {
            Self::Negate => -operand,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every lookup so evaluation order can be checked.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Context for Recorder {
        fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
            self.calls.borrow_mut().push(name.to_string());
            Ok(1.0)
        }

        fn call_function(&self, name: &str, arguments: &[f64]) -> EvalResult<f64> {
            self.calls.borrow_mut().push(format!("{name}/{}", arguments.len()));
            Ok(arguments.iter().sum())
        }
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    #[test]
    fn operators_follow_ieee_semantics() {
        assert_eq!(BinaryOperator::Div.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOperator::Div.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(BinaryOperator::Div.apply(0.0, 0.0).is_nan());
        assert_eq!(UnaryOperator::Negate.apply(2.5), -2.5);
    }

    #[test]
    fn children_evaluate_left_to_right() {
        let expr = Expr::binary(var("a"),
                                BinaryOperator::Sub,
                                Expr::FunctionCall { name:      "f".to_string(),
                                                     arguments: vec![var("b"), var("c")], });
        let recorder = Recorder::default();
        assert_eq!(expr.evaluate(&recorder).unwrap(), -1.0);
        assert_eq!(*recorder.calls.borrow(), vec!["a", "b", "c", "f/2"]);
    }

    #[test]
    fn chains_fold_left_to_right() {
        let expr = Expr::binary(Expr::binary(Expr::Number(8.0), BinaryOperator::Sub, var("a")),
                                BinaryOperator::Div,
                                Expr::binary(var("b"), BinaryOperator::Add, Expr::Number(1.0)));
        let recorder = Recorder::default();
        assert_eq!(expr.evaluate(&recorder).unwrap(), 3.5);
        assert_eq!(*recorder.calls.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn long_left_spine_evaluates_without_deep_recursion() {
        let mut expr = Expr::Number(0.0);
        for _ in 0..100_000 {
            expr = Expr::binary(expr, BinaryOperator::Add, Expr::Number(1.0));
        }
        let handle = std::thread::spawn(move || {
            let value = expr.evaluate(&Recorder::default());
            // Dropping still recurses along the spine, and this tree is far
            // taller than anything the parser accepts.
            std::mem::forget(expr);
            value
        });
        assert_eq!(handle.join().unwrap().unwrap(), 100_000.0);
    }

    #[test]
    fn first_failure_aborts_evaluation() {
        struct Failing;

        impl Context for Failing {
            fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
                Err(RuntimeError::UnknownVariable { name: name.to_string() })
            }

            fn call_function(&self, _name: &str, _arguments: &[f64]) -> EvalResult<f64> {
                panic!("function must not be called after a failed argument");
            }
        }

        let expr = Expr::FunctionCall { name:      "f".to_string(),
                                        arguments: vec![var("missing")], };
        assert_eq!(expr.evaluate(&Failing).unwrap_err(),
                   RuntimeError::UnknownVariable { name: "missing".to_string() });
    }

    #[test]
    fn boxed_and_borrowed_contexts_delegate() {
        let boxed: Box<dyn Context> = Box::new(Recorder::default());
        assert_eq!(var("x").evaluate(&boxed).unwrap(), 1.0);
        assert_eq!(var("x").evaluate(&&*boxed).unwrap(), 1.0);
    }
}
