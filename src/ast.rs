use std::fmt;

/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// `Expr` is a closed set of variants. Every node exclusively owns its
/// children, so a tree never shares subtrees and never contains cycles. Once
/// built by the parser a tree is immutable: evaluating it twice against the
/// same unchanged context yields the same value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal such as `3.5`.
    Number(f64),
    /// Reference to a variable by name.
    Variable(String),
    /// A unary operation (currently only negation).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
    },
    /// A binary arithmetic operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// Function call expression (e.g. `max(a, b)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function, in call order.
        arguments: Vec<Self>,
    },
}

impl Expr {
    /// Builds a binary node from two operands.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::Binary { left: Box::new(left),
                       op,
                       right: Box::new(right) }
    }

    /// Builds a unary node around an operand.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::Unary { op,
                      operand: Box::new(operand) }
    }

    /// Returns the height of the tree, counting a leaf as `1`.
    ///
    /// ## Example
    /// ```
    /// use exprval::parse;
    ///
    /// assert_eq!(parse("1").unwrap().height(), 1);
    /// assert_eq!(parse("1 + 2 * 3").unwrap().height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Number(_) | Self::Variable(_) => 1,
            Self::Unary { operand, .. } => operand.height() + 1,
            Self::Binary { left, right, .. } => left.height().max(right.height()) + 1,
            Self::FunctionCall { arguments, .. } => {
                arguments.iter().map(Self::height).max().unwrap_or(0) + 1
            },
        }
    }
}

/// Renders the tree in a fully parenthesized form.
///
/// Trees produced by the parser print as text that parses back to an equal
/// tree. Hand-built literals the grammar has no syntax for are printed as
/// their nearest form: a negative number as a parenthesized negation, which
/// evaluates to the same value, and infinities or NaN as `inf` and `NaN`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) if n.is_sign_negative() && !n.is_nan() => write!(f, "(-{})", -n),
            Self::Number(n) => write!(f, "{n}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Unary { op, operand } => write!(f, "({op}{operand})"),
            Self::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            Self::FunctionCall { name, arguments } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}

/// Represents a binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
        }
    }
}
