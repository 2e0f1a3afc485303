/// The evaluator module computes results from AST nodes.
///
/// Evaluation is a post-order walk of the tree. Names are resolved through a
/// caller-supplied binding context, which is also where every runtime
/// failure originates.
///
/// # Responsibilities
/// - Defines the `Context` capability and the recursive `evaluate` walk.
/// - Maps operator tags to their arithmetic.
/// - Ships a mapping-based context and a builtin math library.
pub mod evaluator;
/// The lexer module tokenizes expression text for the parser.
///
/// The lexer reads the raw source text and exposes one token at a time:
/// numbers, identifiers, the four arithmetic operators, parentheses and
/// commas. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with byte offsets.
/// - Reports lexical errors for characters outside the token set.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser pulls tokens from the scanner and constructs a tree by
/// recursive descent, one function per precedence level.
///
/// # Responsibilities
/// - Enforces precedence and left-associativity of binary operators.
/// - Validates syntax, stopping at the first violation.
/// - Bounds nesting so hostile input cannot exhaust the stack.
pub mod parser;
