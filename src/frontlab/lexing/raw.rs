//! Raw token definitions
//!
//! The raw tokens are defined using the logos derive macro. They are shared by all
//! grammars; [Vocabulary](super::Vocabulary) turns them into [TokenKind]s.
//!
//! [TokenKind]: crate::frontlab::token::TokenKind
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum RawToken {
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Digits,

    #[token(":=")]
    ColonAssign,
    #[token(":")]
    Colon,
    #[token("=")]
    Equal,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
}

impl RawToken {
    /// Separators allowed between the two halves of a decimal literal.
    pub fn is_decimal_separator(&self) -> bool {
        matches!(self, RawToken::Dot | RawToken::Comma)
    }
}
