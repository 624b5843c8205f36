//! Per-grammar keyword and operator tables
//!
//! The tables are process-wide, read-only and built once on first use. A grammar's
//! vocabulary is the only thing that differs between grammars at the lexical level:
//! `*` is an operator for the expression grammar and an invalid character for the
//! statement grammar, `record` is a keyword for one grammar and an identifier for the
//! others.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use super::raw::RawToken;
use crate::frontlab::grammar::Grammar;
use crate::frontlab::token::TokenKind;

#[derive(Debug)]
pub struct Vocabulary {
    keywords: HashMap<&'static str, TokenKind>,
    operators: HashSet<RawToken>,
    decimal_numbers: bool,
}

static STATEMENT: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    keywords: HashMap::from([
        ("for", TokenKind::For),
        ("to", TokenKind::To),
        ("do", TokenKind::Do),
    ]),
    operators: HashSet::from([
        RawToken::ColonAssign,
        RawToken::Equal,
        RawToken::Plus,
        RawToken::Minus,
        RawToken::Semicolon,
    ]),
    decimal_numbers: false,
});

static EXPRESSION: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    keywords: HashMap::new(),
    operators: HashSet::from([
        RawToken::Equal,
        RawToken::Plus,
        RawToken::Minus,
        RawToken::Star,
        RawToken::Slash,
        RawToken::LParen,
        RawToken::RParen,
        RawToken::Semicolon,
    ]),
    decimal_numbers: true,
});

static RECORD: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    keywords: HashMap::from([
        ("type", TokenKind::Type),
        ("record", TokenKind::Record),
        ("end", TokenKind::End),
        ("integer", TokenKind::Integer),
        ("real", TokenKind::Real),
        ("char", TokenKind::Char),
        ("boolean", TokenKind::Boolean),
        ("string", TokenKind::StringType),
    ]),
    operators: HashSet::from([
        RawToken::Equal,
        RawToken::Colon,
        RawToken::Comma,
        RawToken::Semicolon,
    ]),
    decimal_numbers: false,
});

impl Vocabulary {
    pub fn for_grammar(grammar: Grammar) -> &'static Vocabulary {
        match grammar {
            Grammar::Statement => &STATEMENT,
            Grammar::Expression => &EXPRESSION,
            Grammar::Record => &RECORD,
        }
    }

    pub fn keyword(&self, word: &str) -> Option<TokenKind> {
        self.keywords.get(word).copied()
    }

    pub fn accepts(&self, raw: RawToken) -> bool {
        match raw {
            RawToken::Word | RawToken::Digits => true,
            operator => self.operators.contains(&operator),
        }
    }

    pub fn decimal_numbers(&self) -> bool {
        self.decimal_numbers
    }

    /// Classify a raw token and its slice. Operators outside the vocabulary are `Unknown`.
    pub fn classify(&self, raw: RawToken, slice: &str) -> TokenKind {
        if !self.accepts(raw) {
            return TokenKind::Unknown;
        }
        match raw {
            RawToken::Word => self.keyword(slice).unwrap_or(TokenKind::Identifier),
            RawToken::Digits => TokenKind::Number,
            RawToken::ColonAssign => TokenKind::Assign,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Equal => TokenKind::Equal,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Mul,
            RawToken::Slash => TokenKind::Div,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Unknown,
        }
    }
}
