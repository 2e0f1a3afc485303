use tracing::debug;

use crate::{
    ast::Expr,
    error::{ParseError, SyntaxError},
    interpreter::lexer::{Scanner, Token},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Default bound on how deeply productions may nest (parentheses, argument
/// lists and prefix operators).
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Default bound on the height of a produced tree.
pub const DEFAULT_MAX_HEIGHT: usize = 1024;

/// Limits applied while parsing.
///
/// Parsing and evaluation both recurse, so untrusted input must be bounded
/// to keep them from exhausting the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of parentheses, argument lists and prefix operators.
    pub max_depth:  usize,
    /// Maximum height of the resulting tree. Long operator chains such as
    /// `1 + 1 + ... + 1` grow the tree without nesting.
    pub max_height: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth:  DEFAULT_MAX_DEPTH,
               max_height: DEFAULT_MAX_HEIGHT, }
    }
}

/// A subtree produced by one production, with its height.
pub(super) struct Subtree {
    pub(super) expr:   Expr,
    pub(super) height: usize,
}

/// Recursive-descent parser pulling tokens from a [`Scanner`].
///
/// Grammar, lowest precedence first:
/// ```text
///     expression := add_sub
///     add_sub    := mul_div (("+" | "-") mul_div)*
///     mul_div    := unary (("*" | "/") unary)*
///     unary      := "+" unary | "-" unary | leaf
///     leaf       := number
///                 | identifier ["(" [expression ("," expression)*] ")"]
///                 | "(" expression ")"
/// ```
pub struct Parser<'src> {
    pub(super) scanner: Scanner<'src>,
    options:            ParseOptions,
    depth:              usize,
}

impl<'src> Parser<'src> {
    /// Creates a parser reading from an already primed scanner.
    #[must_use]
    pub fn new(scanner: Scanner<'src>, options: ParseOptions) -> Self {
        Self { scanner,
               options,
               depth: 0 }
    }

    /// Parses one complete expression.
    ///
    /// After the expression the scanner must be at end of input; anything
    /// left over is reported as trailing tokens. No partial tree is returned
    /// on failure.
    ///
    /// # Errors
    /// Returns a [`ParseError`] at the first lexical or structural violation.
    ///
    /// ## Example
    /// ```
    /// use exprval::interpreter::{
    ///     lexer::Scanner,
    ///     parser::core::{ParseOptions, Parser},
    /// };
    ///
    /// let scanner = Scanner::new("8 - 3 - 2").unwrap();
    /// let expr = Parser::new(scanner, ParseOptions::default()).parse_expression()
    ///                                                          .unwrap();
    /// assert_eq!(expr.to_string(), "((8 - 3) - 2)");
    /// ```
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        let subtree = self.parse_add_sub()?;
        match self.scanner.token() {
            Token::Eof => Ok(subtree.expr),
            tok => Err(SyntaxError::UnexpectedTrailingTokens { token:    tok.to_string(),
                                                               position: self.scanner.position(), }.into()),
        }
    }

    /// Moves the scanner past the current token.
    pub(super) fn advance(&mut self) -> ParseResult<()> {
        self.scanner.advance()?;
        Ok(())
    }

    /// Runs `production` one nesting level deeper, failing once the
    /// configured depth is exceeded.
    pub(super) fn nested<T>(&mut self,
                            production: impl FnOnce(&mut Self) -> ParseResult<T>)
                            -> ParseResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(SyntaxError::NestingTooDeep { limit:    self.options.max_depth,
                                                     position: self.scanner.position(), }.into());
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Wraps `expr` as a subtree of the given height, enforcing the height
    /// limit.
    pub(super) fn subtree(&self, expr: Expr, height: usize) -> ParseResult<Subtree> {
        if height > self.options.max_height {
            return Err(SyntaxError::ExpressionTooLarge { limit:    self.options.max_height,
                                                         position: self.scanner.position(), }.into());
        }
        Ok(Subtree { expr, height })
    }
}

/// Parses `source` into a tree using the given limits.
///
/// # Errors
/// Returns a [`ParseError::Lexical`] for characters outside the token set
/// and a [`ParseError::Syntax`] for malformed token sequences.
pub fn parse_with(source: &str, options: &ParseOptions) -> ParseResult<Expr> {
    debug!(source, "parsing expression");
    let scanner = Scanner::new(source)?;
    let expr = Parser::new(scanner, *options).parse_expression()?;
    debug!(height = expr.height(), "parsed expression");
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseResult<Expr> {
        parse_with(source, &ParseOptions::default())
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        let err = parse("1 + 2)").unwrap_err();
        assert_eq!(err,
                   ParseError::Syntax(SyntaxError::UnexpectedTrailingTokens { token:    "')'".to_string(),
                                                                              position: 5, }));
    }

    #[test]
    fn second_decimal_point_fails_as_trailing_number() {
        let err = parse("1.2.3").unwrap_err();
        assert!(matches!(err,
                         ParseError::Syntax(SyntaxError::UnexpectedTrailingTokens { position: 3, .. })));
    }

    #[test]
    fn nesting_limit_applies_to_parentheses() {
        let options = ParseOptions { max_depth: 8,
                                     ..ParseOptions::default() };
        let ok = format!("{}1{}", "(".repeat(7), ")".repeat(7));
        assert!(parse_with(&ok, &options).is_ok());

        let deep = format!("{}1{}", "(".repeat(9), ")".repeat(9));
        assert!(matches!(parse_with(&deep, &options),
                         Err(ParseError::Syntax(SyntaxError::NestingTooDeep { limit: 8, .. }))));
    }

    #[test]
    fn nesting_limit_applies_to_prefix_operators() {
        let options = ParseOptions { max_depth: 4,
                                     ..ParseOptions::default() };
        assert!(parse_with("+++5", &options).is_ok());
        assert!(matches!(parse_with("-----5", &options),
                         Err(ParseError::Syntax(SyntaxError::NestingTooDeep { .. }))));
    }

    #[test]
    fn height_limit_applies_to_operator_chains() {
        let options = ParseOptions { max_height: 10,
                                     ..ParseOptions::default() };
        let short = vec!["1"; 9].join(" + ");
        assert!(parse_with(&short, &options).is_ok());

        let long = vec!["1"; 11].join(" + ");
        assert!(matches!(parse_with(&long, &options),
                         Err(ParseError::Syntax(SyntaxError::ExpressionTooLarge { limit: 10, .. }))));
    }

    #[test]
    fn height_limit_applies_to_leaves() {
        let options = ParseOptions { max_height: 0,
                                     ..ParseOptions::default() };
        assert!(matches!(parse_with("1", &options),
                         Err(ParseError::Syntax(SyntaxError::ExpressionTooLarge { limit: 0, position: 0 }))));
        assert!(matches!(parse_with("x", &options),
                         Err(ParseError::Syntax(SyntaxError::ExpressionTooLarge { limit: 0, .. }))));

        let options = ParseOptions { max_height: 1,
                                     ..ParseOptions::default() };
        assert_eq!(parse_with("1", &options).unwrap(), Expr::Number(1.0));
        assert!(parse_with("-1", &options).is_err());
    }

    #[test]
    fn default_limits_reject_hostile_nesting() {
        let hostile = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(parse(&hostile),
                         Err(ParseError::Syntax(SyntaxError::NestingTooDeep { .. }))));
    }
}
