use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::{context::MapContext, core::EvalResult},
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated arguments whose length has
/// already been checked against its arity. It returns the result, or a
/// description of why an argument was rejected.
type BuiltinFn = fn(&[f64]) -> Result<f64, String>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Clone, Copy, Debug)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(arr) => {
                let counts = arr.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", counts.join(" or "))
            },
        }
    }
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"   => { arity: Arity::Exact(1), func: |args| Ok(args[0].abs()) },
    "sqrt"  => { arity: Arity::Exact(1), func: |args| Ok(args[0].sqrt()) },
    "sin"   => { arity: Arity::Exact(1), func: |args| Ok(args[0].sin()) },
    "cos"   => { arity: Arity::Exact(1), func: |args| Ok(args[0].cos()) },
    "tan"   => { arity: Arity::Exact(1), func: |args| Ok(args[0].tan()) },
    "exp"   => { arity: Arity::Exact(1), func: |args| Ok(args[0].exp()) },
    "ln"    => { arity: Arity::Exact(1), func: |args| Ok(args[0].ln()) },
    "floor" => { arity: Arity::Exact(1), func: |args| Ok(args[0].floor()) },
    "ceil"  => { arity: Arity::Exact(1), func: |args| Ok(args[0].ceil()) },
    "round" => { arity: Arity::Exact(1), func: |args| Ok(args[0].round()) },
    "sign"  => { arity: Arity::Exact(1), func: sign },
    "log"   => { arity: Arity::OneOf(&[1, 2]), func: log },
    "pow"   => { arity: Arity::Exact(2), func: |args| Ok(args[0].powf(args[1])) },
    "min"   => { arity: Arity::Exact(2), func: |args| Ok(args[0].min(args[1])) },
    "max"   => { arity: Arity::Exact(2), func: |args| Ok(args[0].max(args[1])) },
    "clamp" => { arity: Arity::Exact(3), func: clamp },
}

/// Constants bound as variables by [`install`].
pub const BUILTIN_CONSTANTS: &[(&str, f64)] =
    &[("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

/// Returns `-1`, `0` or `1` according to the sign of the argument. Unlike
/// [`f64::signum`], zero maps to zero.
fn sign(args: &[f64]) -> Result<f64, String> {
    let x = args[0];
    Ok(if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    })
}

/// `log(x)` is the base 10 logarithm; `log(x, base)` uses the given base.
fn log(args: &[f64]) -> Result<f64, String> {
    Ok(match args {
        [x, base] => x.log(*base),
        _ => args[0].log10(),
    })
}

/// `clamp(x, lo, hi)` restricts `x` to the closed interval.
///
/// The bounds are validated first since [`f64::clamp`] panics on an empty
/// or NaN interval.
fn clamp(args: &[f64]) -> Result<f64, String> {
    let (x, lo, hi) = (args[0], args[1], args[2]);
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return Err(format!("lower bound {lo} exceeds upper bound {hi}"));
    }
    Ok(x.clamp(lo, hi))
}

/// Invokes the builtin `name`, checking arity first.
///
/// # Errors
/// - [`RuntimeError::UnknownFunction`] if `name` is not a builtin.
/// - [`RuntimeError::ArgumentCountMismatch`] on a wrong argument count.
/// - [`RuntimeError::InvalidArgument`] if the builtin rejects an argument.
///
/// # Example
/// ```
/// use exprval::interpreter::evaluator::builtin::call;
///
/// assert_eq!(call("max", &[3.0, 5.0]).unwrap(), 5.0);
/// assert_eq!(call("log", &[8.0, 2.0]).unwrap(), 3.0);
/// assert!(call("max", &[1.0]).is_err());
/// ```
pub fn call(name: &str, args: &[f64]) -> EvalResult<f64> {
    let builtin = BUILTIN_TABLE.iter()
                               .find(|b| b.name == name)
                               .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string() })?;
    invoke(builtin, args)
}

fn invoke(builtin: &BuiltinDef, args: &[f64]) -> EvalResult<f64> {
    if !builtin.arity.check(args.len()) {
        return Err(RuntimeError::ArgumentCountMismatch { name:     builtin.name.to_string(),
                                                         expected: builtin.arity.to_string(),
                                                         found:    args.len(), });
    }
    (builtin.func)(args).map_err(|details| RuntimeError::InvalidArgument { name: builtin.name
                                                                                  .to_string(),
                                                                           details })
}

/// Registers every builtin function and constant in `context`, replacing
/// existing bindings of the same names.
pub fn install(context: &mut MapContext) {
    for builtin in BUILTIN_TABLE {
        context.define_function(builtin.name, move |args| invoke(builtin, args));
    }
    for (name, value) in BUILTIN_CONSTANTS {
        context.set_variable(*name, *value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::core::Context;

    #[test]
    fn table_and_name_list_agree() {
        assert_eq!(BUILTIN_TABLE.len(), BUILTIN_FUNCTIONS.len());
        let context = MapContext::with_builtins();
        for name in BUILTIN_FUNCTIONS {
            assert!(context.has_function(name), "{name} not installed");
        }
    }

    #[test]
    fn constants_are_installed() {
        let context = MapContext::with_builtins();
        assert_eq!(context.resolve_variable("pi").unwrap(), std::f64::consts::PI);
        assert_eq!(context.resolve_variable("e").unwrap(), std::f64::consts::E);
    }

    #[test]
    fn arity_is_checked_before_calling() {
        assert_eq!(call("sqrt", &[]).unwrap_err(),
                   RuntimeError::ArgumentCountMismatch { name:     "sqrt".to_string(),
                                                         expected: "1".to_string(),
                                                         found:    0, });
        assert_eq!(call("log", &[1.0, 2.0, 3.0]).unwrap_err(),
                   RuntimeError::ArgumentCountMismatch { name:     "log".to_string(),
                                                         expected: "1 or 2".to_string(),
                                                         found:    3, });
    }

    #[test]
    fn sign_maps_zero_to_zero() {
        assert_eq!(call("sign", &[-3.0]).unwrap(), -1.0);
        assert_eq!(call("sign", &[0.0]).unwrap(), 0.0);
        assert_eq!(call("sign", &[0.5]).unwrap(), 1.0);
    }

    #[test]
    fn log_defaults_to_base_ten() {
        assert_eq!(call("log", &[1000.0]).unwrap(), 3.0);
    }

    #[test]
    fn clamp_rejects_inverted_bounds() {
        assert_eq!(call("clamp", &[5.0, 0.0, 2.0]).unwrap(), 2.0);
        assert!(matches!(call("clamp", &[5.0, 2.0, 0.0]),
                         Err(RuntimeError::InvalidArgument { .. })));
    }

    #[test]
    fn unknown_builtin_is_reported() {
        assert_eq!(call("nope", &[]).unwrap_err(),
                   RuntimeError::UnknownFunction { name: "nope".to_string() });
    }
}
