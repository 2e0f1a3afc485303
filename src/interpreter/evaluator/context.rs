use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    hash::BuildHasher,
};

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{
        builtin,
        core::{Context, EvalResult},
    },
};

/// A native function callable from expressions.
pub type NativeFunction = Box<dyn Fn(&[f64]) -> EvalResult<f64> + Send + Sync>;

/// Binding context backed by two maps: variable values and native functions.
///
/// ## Usage
///
/// `MapContext` is built once, optionally preloaded with the builtin math
/// library, and then passed by reference to any number of evaluations. It is
/// `Send + Sync`, so one context may serve several threads evaluating the
/// same tree.
///
/// ## Example
/// ```
/// use exprval::{MapContext, evaluate};
///
/// let context = MapContext::with_builtins().with_variable("r", 2.0)
///                                          .with_function("twice", |args| Ok(args.iter().sum::<f64>() * 2.0));
///
/// assert_eq!(evaluate("twice(r, 1)", &context).unwrap(), 6.0);
/// assert_eq!(evaluate("max(r, 5)", &context).unwrap(), 5.0);
/// ```
#[derive(Default)]
pub struct MapContext {
    variables: HashMap<String, f64>,
    functions: HashMap<String, NativeFunction>,
}

impl MapContext {
    /// Creates an empty context: every name is unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context preloaded with the functions and constants of
    /// [`builtin`].
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut context = Self::new();
        builtin::install(&mut context);
        context
    }

    /// Binds a variable, consuming and returning the context.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_variable(name, value);
        self
    }

    /// Registers a function, consuming and returning the context.
    #[must_use]
    pub fn with_function<F>(mut self, name: impl Into<String>, function: F) -> Self
        where F: Fn(&[f64]) -> EvalResult<f64> + Send + Sync + 'static
    {
        self.define_function(name, function);
        self
    }

    /// Binds or rebinds a variable, returning the previous value.
    pub fn set_variable(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.variables.insert(name.into(), value)
    }

    /// Unbinds a variable, returning its value if it was bound.
    pub fn remove_variable(&mut self, name: &str) -> Option<f64> {
        self.variables.remove(name)
    }

    /// Registers or replaces a function.
    pub fn define_function<F>(&mut self, name: impl Into<String>, function: F)
        where F: Fn(&[f64]) -> EvalResult<f64> + Send + Sync + 'static
    {
        self.functions.insert(name.into(), Box::new(function));
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Tests whether a function called `name` is registered.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

impl fmt::Debug for MapContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions = self.functions.keys().collect::<Vec<_>>();
        functions.sort();
        f.debug_struct("MapContext")
         .field("variables", &self.variables)
         .field("functions", &functions)
         .finish()
    }
}

impl Context for MapContext {
    fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
        self.variable(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })
    }

    fn call_function(&self, name: &str, arguments: &[f64]) -> EvalResult<f64> {
        let function =
            self.functions
                .get(name)
                .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;
        function(arguments)
    }
}

/// A plain map is a context with variables only.
impl<S: BuildHasher> Context for HashMap<String, f64, S> {
    fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })
    }

    fn call_function(&self, name: &str, _arguments: &[f64]) -> EvalResult<f64> {
        Err(RuntimeError::UnknownFunction { name: name.to_string() })
    }
}

impl Context for BTreeMap<String, f64> {
    fn resolve_variable(&self, name: &str) -> EvalResult<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string() })
    }

    fn call_function(&self, name: &str, _arguments: &[f64]) -> EvalResult<f64> {
        Err(RuntimeError::UnknownFunction { name: name.to_string() })
    }
}
