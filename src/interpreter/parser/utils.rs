use crate::{
    ast::Expr,
    error::SyntaxError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a function argument list and its closing parenthesis.
    ///
    /// The scanner must be positioned just after the opening `(`. An
    /// immediate `)` produces an empty list. Otherwise expressions are
    /// parsed while each is followed by a comma; after the last one a `)` is
    /// mandatory.
    ///
    /// Grammar: `arguments := ")" | expression ("," expression)* ")"`
    ///
    /// # Returns
    /// The arguments in source order and the height of the tallest one.
    pub(super) fn parse_arguments(&mut self) -> ParseResult<(Vec<Expr>, usize)> {
        let mut arguments = Vec::new();
        let mut height = 0;
        if *self.scanner.token() == Token::RParen {
            self.advance()?;
            return Ok((arguments, height));
        }
        loop {
            let argument = self.parse_add_sub()?;
            height = height.max(argument.height);
            arguments.push(argument.expr);
            if *self.scanner.token() != Token::Comma {
                break;
            }
            self.advance()?;
        }
        self.expect_closing_paren()?;
        Ok((arguments, height))
    }

    /// Consumes a `)` or fails with
    /// [`SyntaxError::ExpectedClosingParen`].
    pub(super) fn expect_closing_paren(&mut self) -> ParseResult<()> {
        if *self.scanner.token() != Token::RParen {
            return Err(SyntaxError::ExpectedClosingParen { position: self.scanner.position() }.into());
        }
        self.advance()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::Expr,
        error::{ParseError, SyntaxError},
        interpreter::parser::core::{ParseOptions, ParseResult, parse_with},
    };

    fn parse(source: &str) -> ParseResult<Expr> {
        parse_with(source, &ParseOptions::default())
    }

    #[test]
    fn empty_argument_list_is_a_zero_argument_call() {
        assert_eq!(parse("now()").unwrap(),
                   Expr::FunctionCall { name:      "now".to_string(),
                                        arguments: Vec::new(), });
    }

    #[test]
    fn arguments_are_full_expressions() {
        assert_eq!(parse("f(1 + 2, -x, g(3))").unwrap().to_string(),
                   "f((1 + 2), (-x), g(3))");
    }

    #[test]
    fn missing_separator_requires_closing_paren() {
        assert_eq!(parse("f(1 2)").unwrap_err(),
                   ParseError::Syntax(SyntaxError::ExpectedClosingParen { position: 4 }));
    }

    #[test]
    fn trailing_comma_is_rejected() {
        assert!(matches!(parse("f(1,)"),
                         Err(ParseError::Syntax(SyntaxError::UnexpectedToken { .. }))));
    }

    #[test]
    fn unclosed_call_is_rejected() {
        assert!(matches!(parse("f(1, 2"),
                         Err(ParseError::Syntax(SyntaxError::ExpectedClosingParen { position: 6 }))));
    }
}
