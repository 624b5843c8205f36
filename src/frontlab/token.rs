//! Token types shared by the lexer, the parsers and the quad emitter.
//!
//! Token Kinds
//!
//!     [TokenKind] is the single closed set of kinds for every grammar. A grammar's
//!     vocabulary decides which kinds it can ever produce (see
//!     [vocabulary](crate::frontlab::lexing::vocabulary)); the same character may be an
//!     operator in one grammar and `Unknown` in another. New kinds are added here and
//!     at the match sites that consume them, nowhere else.
//!
//! Synthetic Tokens
//!
//!     The record validator repairs a missing mandatory token by inserting a synthetic
//!     one into the token sequence. Synthetic tokens have zero width, carry the position
//!     of the token they were inserted before, and are flagged so that traces and
//!     tooling can tell them apart from source tokens.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Statement keywords
    For,
    To,
    Do,
    // Record keywords
    Type,
    Record,
    End,
    Integer,
    Real,
    Char,
    Boolean,
    StringType,
    // Atoms
    Identifier,
    Number,
    // Operators and punctuation
    Assign,
    Equal,
    Plus,
    Minus,
    Mul,
    Div,
    LParen,
    RParen,
    Colon,
    Comma,
    Semicolon,
    // Sentinels
    Unknown,
    EndOfInput,
}

impl TokenKind {
    /// The record grammar's built-in type names.
    pub const TYPE_KEYWORDS: [TokenKind; 5] = [
        TokenKind::Integer,
        TokenKind::Real,
        TokenKind::Char,
        TokenKind::Boolean,
        TokenKind::StringType,
    ];

    pub fn is_type_keyword(&self) -> bool {
        Self::TYPE_KEYWORDS.contains(self)
    }

    /// Human readable name used in diagnostics ("'do'", "identifier", ...).
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::For => "'for'",
            TokenKind::To => "'to'",
            TokenKind::Do => "'do'",
            TokenKind::Type => "'type'",
            TokenKind::Record => "'record'",
            TokenKind::End => "'end'",
            TokenKind::Integer => "'integer'",
            TokenKind::Real => "'real'",
            TokenKind::Char => "'char'",
            TokenKind::Boolean => "'boolean'",
            TokenKind::StringType => "'string'",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Assign => "':='",
            TokenKind::Equal => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Unknown => "invalid character",
            TokenKind::EndOfInput => "end of input",
        }
    }

    /// Canonical source text for kinds that have exactly one spelling.
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::For => "for",
            TokenKind::To => "to",
            TokenKind::Do => "do",
            TokenKind::Type => "type",
            TokenKind::Record => "record",
            TokenKind::End => "end",
            TokenKind::Integer => "integer",
            TokenKind::Real => "real",
            TokenKind::Char => "char",
            TokenKind::Boolean => "boolean",
            TokenKind::StringType => "string",
            TokenKind::Assign => ":=",
            TokenKind::Equal => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Unknown
            | TokenKind::EndOfInput => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Option<String>,
    /// Byte offset of the first character in the source.
    pub position: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            position,
            synthetic: false,
        }
    }

    pub fn end_of_input(position: usize) -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            text: None,
            position,
            synthetic: false,
        }
    }

    /// A zero-width token standing in for one the source is missing.
    pub fn synthetic(kind: TokenKind, position: usize) -> Self {
        Self {
            kind,
            text: kind.spelling().map(str::to_string),
            position,
            synthetic: true,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Byte offset just past the token. Synthetic tokens occupy no source text.
    pub fn end(&self) -> usize {
        if self.synthetic {
            self.position
        } else {
            self.position + self.text().len()
        }
    }

    /// Length in characters used when pointing a diagnostic at this token, never 0.
    pub fn display_len(&self) -> usize {
        match &self.text {
            Some(text) if !self.synthetic && !text.is_empty() => text.chars().count(),
            _ => 1,
        }
    }

    /// How the token reads inside a diagnostic message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            _ => format!("'{}'", self.text()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}({:?})@{}", self.kind, text, self.position),
            None => write!(f, "{}@{}", self.kind, self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_len_uses_characters() {
        let token = Token::new(TokenKind::Unknown, "ж", 0);
        assert_eq!(token.display_len(), 1);
        assert_eq!(token.end(), 2);
    }

    #[test]
    fn test_end_of_input_has_no_text() {
        let token = Token::end_of_input(7);
        assert_eq!(token.text, None);
        assert_eq!(token.display_len(), 1);
        assert_eq!(token.end(), 7);
        assert_eq!(token.describe(), "end of input");
    }

    #[test]
    fn test_synthetic_token_is_zero_width() {
        let token = Token::synthetic(TokenKind::End, 12);
        assert_eq!(token.text.as_deref(), Some("end"));
        assert!(token.synthetic);
        assert_eq!(token.end(), 12);
    }

    #[test]
    fn test_type_keywords() {
        assert!(TokenKind::Boolean.is_type_keyword());
        assert!(!TokenKind::Record.is_type_keyword());
    }
}
