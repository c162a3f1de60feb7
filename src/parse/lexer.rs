use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[token("d")]
    #[token("D")]
    Die,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    // Whitespace is not skipped: a padded expression is not a valid one.
    #[error]
    Error,
}

impl TokenKind {
    pub const SIGNS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "<integer>",
            Self::Die => "'d'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
