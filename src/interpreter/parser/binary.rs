use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser, Subtree},
    },
};

impl Parser<'_> {
    /// Parses addition and subtraction expressions.
    ///
    /// Handles left-associative binary operators: `+` and `-`.
    ///
    /// The rule is: `add_sub := mul_div (("+" | "-") mul_div)*`
    pub(super) fn parse_add_sub(&mut self) -> ParseResult<Subtree> {
        let mut left = self.parse_mul_div()?;
        while let Some(op) = token_to_binary_operator(self.scanner.token())
              && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            self.advance()?;
            let right = self.parse_mul_div()?;
            left = self.fold(left, op, right)?;
        }
        Ok(left)
    }

    /// Parses multiplication-level expressions.
    ///
    /// Handles left-associative binary operators: `*` and `/`.
    ///
    /// The rule is: `mul_div := unary (("*" | "/") unary)*`
    pub(super) fn parse_mul_div(&mut self) -> ParseResult<Subtree> {
        let mut left = self.parse_unary()?;
        while let Some(op) = token_to_binary_operator(self.scanner.token())
              && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            self.advance()?;
            let right = self.parse_unary()?;
            left = self.fold(left, op, right)?;
        }
        Ok(left)
    }

    /// Wraps the tree built so far as the left operand of a new node, which
    /// is what makes each level left-associative.
    fn fold(&self, left: Subtree, op: BinaryOperator, right: Subtree) -> ParseResult<Subtree> {
        let height = left.height.max(right.height) + 1;
        self.subtree(Expr::binary(left.expr, op, right.expr), height)
    }
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for every token that is not `+`, `-`, `*` or `/`.
///
/// # Example
/// ```
/// use exprval::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Star), Some(BinaryOperator::Mul));
/// assert_eq!(token_to_binary_operator(&Token::Comma), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}
