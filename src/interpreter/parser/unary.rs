use crate::{
    ast::{Expr, UnaryOperator},
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser, Subtree},
    },
};

impl Parser<'_> {
    /// Parses a unary expression.
    ///
    /// A prefix `+` is dropped without producing a node; a prefix `-` wraps
    /// its operand in a negation. Prefixes are right-associative, so `--5`
    /// is `-(-5)`.
    ///
    /// Grammar:
    /// ```text
    ///     unary := "+" unary | "-" unary | leaf
    /// ```
    pub(super) fn parse_unary(&mut self) -> ParseResult<Subtree> {
        match self.scanner.token() {
            Token::Plus => {
                self.advance()?;
                self.nested(Self::parse_unary)
            },
            Token::Minus => {
                self.advance()?;
                let operand = self.nested(Self::parse_unary)?;
                let height = operand.height + 1;
                self.subtree(Expr::unary(UnaryOperator::Negate, operand.expr), height)
            },
            _ => self.parse_leaf(),
        }
    }

    /// Parses a leaf: a number, a variable, a function call or a
    /// parenthesized expression.
    ///
    /// Grammar:
    /// ```text
    ///     leaf := number
    ///           | identifier ["(" arguments ")"]
    ///           | "(" expression ")"
    /// ```
    fn parse_leaf(&mut self) -> ParseResult<Subtree> {
        let position = self.scanner.position();
        match self.scanner.token() {
            Token::Number(n) => {
                let leaf = self.subtree(Expr::Number(*n), 1)?;
                self.advance()?;
                Ok(leaf)
            },
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                self.parse_identifier_or_function(name)
            },
            Token::LParen => self.parse_grouping(),
            Token::Eof => Err(SyntaxError::UnexpectedEndOfInput { position }.into()),
            tok => Err(SyntaxError::UnexpectedToken { token: tok.to_string(),
                                                      position }.into()),
        }
    }

    /// Parses what follows an identifier. Without a `(` the identifier is a
    /// variable; with one it names a function and the argument list follows.
    fn parse_identifier_or_function(&mut self, name: String) -> ParseResult<Subtree> {
        if *self.scanner.token() != Token::LParen {
            return self.subtree(Expr::Variable(name), 1);
        }
        self.advance()?;
        let (arguments, height) = self.nested(Self::parse_arguments)?;
        self.subtree(Expr::FunctionCall { name, arguments }, height + 1)
    }

    /// Parses a parenthesized expression. The parentheses themselves do not
    /// produce a node.
    fn parse_grouping(&mut self) -> ParseResult<Subtree> {
        self.advance()?;
        let inner = self.nested(Self::parse_add_sub)?;
        self.expect_closing_paren()?;
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Expr, UnaryOperator},
        error::{ParseError, SyntaxError},
        interpreter::parser::core::{ParseOptions, ParseResult, parse_with},
    };

    fn parse(source: &str) -> ParseResult<Expr> {
        parse_with(source, &ParseOptions::default())
    }

    #[test]
    fn unary_plus_produces_no_node() {
        assert_eq!(parse("+ + 3").unwrap(), Expr::Number(3.0));
    }

    #[test]
    fn unary_minus_chains() {
        assert_eq!(parse("--5").unwrap(),
                   Expr::unary(UnaryOperator::Negate,
                               Expr::unary(UnaryOperator::Negate, Expr::Number(5.0))));
    }

    #[test]
    fn identifier_without_parenthesis_is_variable() {
        assert_eq!(parse("speed").unwrap(), Expr::Variable("speed".to_string()));
    }

    #[test]
    fn identifier_with_parenthesis_is_call() {
        assert_eq!(parse("max(1, x)").unwrap(),
                   Expr::FunctionCall { name:      "max".to_string(),
                                        arguments: vec![Expr::Number(1.0),
                                                        Expr::Variable("x".to_string())], });
    }

    #[test]
    fn parentheses_leave_no_trace() {
        assert_eq!(parse("((7))").unwrap(), Expr::Number(7.0));
    }

    #[test]
    fn missing_operand_reports_end_of_input() {
        assert_eq!(parse("-").unwrap_err(),
                   ParseError::Syntax(SyntaxError::UnexpectedEndOfInput { position: 1 }));
    }

    #[test]
    fn misplaced_token_is_reported() {
        assert_eq!(parse(")").unwrap_err(),
                   ParseError::Syntax(SyntaxError::UnexpectedToken { token:    "')'".to_string(),
                                                                     position: 0, }));
    }

    #[test]
    fn unclosed_group_is_reported() {
        assert_eq!(parse("(1 + 2").unwrap_err(),
                   ParseError::Syntax(SyntaxError::ExpectedClosingParen { position: 6 }));
    }
}
