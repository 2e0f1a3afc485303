use std::fmt;

use logos::Logos;
use tracing::trace;

use crate::error::LexicalError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens of the expression language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"\s+")]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5` or `2.`.
    ///
    /// A literal holds at most one `.`; scanning `1.2.3` yields `1.2`
    /// followed by `.3`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_float)]
    #[regex(r"\.[0-9]*", parse_float)]
    Number(f64),
    /// Identifier tokens; variable or function names such as `x` or `max`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// End of input. Never produced by the automaton; the [`Scanner`]
    /// substitutes it once the source is exhausted.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// Parses a floating-point literal from the current token slice.
///
/// Rust's float grammar uses `.` as the decimal separator regardless of
/// locale. A lone `.` has no digits and yields `None`, which the lexer
/// reports as an error.
fn parse_float(lex: &logos::Lexer<'_, Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Pull-based scanner exposing one current token at a time.
///
/// Construction primes the first token. The parser inspects
/// [`token`](Self::token) and calls [`advance`](Self::advance) to move on.
/// Once the source is exhausted the current token is [`Token::Eof`], and
/// further calls to `advance` keep it there.
///
/// ## Example
/// ```
/// use exprval::interpreter::lexer::{Scanner, Token};
///
/// let mut scanner = Scanner::new("x + 1").unwrap();
/// assert_eq!(scanner.token(), &Token::Identifier("x".to_string()));
/// scanner.advance().unwrap();
/// assert_eq!(scanner.token(), &Token::Plus);
/// scanner.advance().unwrap();
/// assert_eq!(scanner.token(), &Token::Number(1.0));
/// scanner.advance().unwrap();
/// assert_eq!(scanner.token(), &Token::Eof);
/// ```
pub struct Scanner<'src> {
    lexer:    logos::Lexer<'src, Token>,
    token:    Token,
    position: usize,
}

impl<'src> Scanner<'src> {
    /// Creates a scanner over `source` positioned on its first token.
    ///
    /// # Errors
    /// Returns a [`LexicalError`] if the first token is not recognized.
    pub fn new(source: &'src str) -> Result<Self, LexicalError> {
        let mut scanner = Self { lexer:    Token::lexer(source),
                                 token:    Token::Eof,
                                 position: 0, };
        scanner.advance()?;
        Ok(scanner)
    }

    /// The current token.
    #[must_use]
    pub const fn token(&self) -> &Token {
        &self.token
    }

    /// Byte offset of the current token. At end of input this is the length
    /// of the source.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Moves to the next token.
    ///
    /// # Errors
    /// Returns a [`LexicalError`] naming the offending text if the next
    /// character does not start any token.
    pub fn advance(&mut self) -> Result<(), LexicalError> {
        match self.lexer.next() {
            Some(Ok(token)) => {
                self.position = self.lexer.span().start;
                trace!(%token, position = self.position, "scanned token");
                self.token = token;
            },
            Some(Err(())) => {
                let position = self.lexer.span().start;
                return Err(LexicalError { text: self.lexer.slice().to_string(),
                                          position });
            },
            None => {
                self.position = self.lexer.source().len();
                self.token = Token::Eof;
            },
        }
        Ok(())
    }

    /// Takes the current token and advances past it.
    ///
    /// # Errors
    /// Propagates a [`LexicalError`] from scanning the following token.
    pub fn bump(&mut self) -> Result<Token, LexicalError> {
        let token = std::mem::replace(&mut self.token, Token::Eof);
        self.advance()?;
        Ok(token)
    }
}

/// Yields the remaining tokens, excluding the final [`Token::Eof`]. Iteration
/// stops after the first error.
impl Iterator for Scanner<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.token == Token::Eof {
            return None;
        }
        Some(self.bump())
    }
}

/// Scans the whole of `source` into a vector of tokens.
///
/// # Errors
/// Returns the first [`LexicalError`] encountered.
///
/// ## Example
/// ```
/// use exprval::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("f(2, .5)").unwrap();
/// assert_eq!(tokens,
///            vec![Token::Identifier("f".to_string()),
///                 Token::LParen,
///                 Token::Number(2.0),
///                 Token::Comma,
///                 Token::Number(0.5),
///                 Token::RParen]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    Scanner::new(source)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_between_tokens() {
        let tokens = tokenize(" \t1\n+\r\n 2 ").unwrap();
        assert_eq!(tokens, vec![Token::Number(1.0), Token::Plus, Token::Number(2.0)]);
    }

    #[test]
    fn numbers_take_at_most_one_decimal_point() {
        assert_eq!(tokenize("1.2.3").unwrap(), vec![Token::Number(1.2), Token::Number(0.3)]);
        assert_eq!(tokenize("7.").unwrap(), vec![Token::Number(7.0)]);
        assert_eq!(tokenize(".25").unwrap(), vec![Token::Number(0.25)]);
    }

    #[test]
    fn identifiers_allow_digits_and_underscores() {
        assert_eq!(tokenize("_a1 b_2").unwrap(),
                   vec![Token::Identifier("_a1".to_string()), Token::Identifier("b_2".to_string())]);
    }

    #[test]
    fn digits_followed_by_letters_split() {
        assert_eq!(tokenize("2x").unwrap(),
                   vec![Token::Number(2.0), Token::Identifier("x".to_string())]);
    }

    #[test]
    fn lone_decimal_point_is_rejected() {
        let err = tokenize("1 + .").unwrap_err();
        assert_eq!(err.text, ".");
        assert_eq!(err.position, 4);
    }

    #[test]
    fn unknown_character_is_reported_with_offset() {
        let err = tokenize("1 @ 2").unwrap_err();
        assert_eq!(err.text, "@");
        assert_eq!(err.position, 2);
    }

    #[test]
    fn eof_is_sticky() {
        let mut scanner = Scanner::new("").unwrap();
        assert_eq!(scanner.token(), &Token::Eof);
        scanner.advance().unwrap();
        scanner.advance().unwrap();
        assert_eq!(scanner.token(), &Token::Eof);
        assert_eq!(scanner.position(), 0);
    }

    #[test]
    fn construction_primes_first_token() {
        let scanner = Scanner::new("  (").unwrap();
        assert_eq!(scanner.token(), &Token::LParen);
        assert_eq!(scanner.position(), 2);
    }

    #[test]
    fn construction_fails_on_bad_first_character() {
        assert!(Scanner::new("#").is_err());
    }
}
