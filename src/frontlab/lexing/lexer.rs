//! Pull-based lexer over the raw logos token stream
//!
//! [Lexer::next_token] can be called any number of times; once the input is
//! exhausted it keeps returning the end-of-input token. [Lexer::peek_token] looks one
//! token ahead by running a clone of the lexer, leaving this one untouched.

use std::collections::VecDeque;
use std::ops::Range;

use logos::Logos;

use super::raw::RawToken;
use super::vocabulary::Vocabulary;
use crate::frontlab::grammar::Grammar;
use crate::frontlab::token::{Token, TokenKind};

#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    raw: logos::Lexer<'src, RawToken>,
    vocabulary: &'static Vocabulary,
    /// Tokens already produced from a single raw token (split operators, invalid runs).
    pending: VecDeque<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, grammar: Grammar) -> Self {
        Self {
            source,
            raw: RawToken::lexer(source),
            vocabulary: Vocabulary::for_grammar(grammar),
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        match self.raw.next() {
            None => Token::end_of_input(self.source.len()),
            Some(Err(())) => {
                let span = self.raw.span();
                self.invalid_characters(span)
            }
            Some(Ok(raw)) => self.classify(raw),
        }
    }

    pub fn peek_token(&self) -> Token {
        self.clone().next_token()
    }

    fn classify(&mut self, raw: RawToken) -> Token {
        let span = self.raw.span();
        match raw {
            RawToken::Digits if self.vocabulary.decimal_numbers() => self.number(span),
            // `:=` outside the vocabulary still lets the `=` through on its own.
            RawToken::ColonAssign if !self.vocabulary.accepts(raw) => {
                let equal = self.vocabulary.classify(RawToken::Equal, "=");
                self.pending.push_back(Token::new(equal, "=", span.start + 1));
                Token::new(TokenKind::Unknown, ":", span.start)
            }
            _ => {
                let slice = &self.source[span.clone()];
                Token::new(self.vocabulary.classify(raw, slice), slice, span.start)
            }
        }
    }

    /// Digits, optionally joined with `.`/`,` and more digits when they touch.
    fn number(&mut self, span: Range<usize>) -> Token {
        let mut end = span.end;
        let mut lookahead = self.raw.clone();

        if let Some(Ok(separator)) = lookahead.next() {
            let separator_span = lookahead.span();
            if separator.is_decimal_separator() && separator_span.start == end {
                if let Some(Ok(RawToken::Digits)) = lookahead.next() {
                    if lookahead.span().start == separator_span.end {
                        end = lookahead.span().end;
                        self.raw = lookahead;
                    }
                }
            }
        }

        Token::new(TokenKind::Number, &self.source[span.start..end], span.start)
    }

    /// One `Unknown` token per character of an unmatched span.
    ///
    /// The span is widened to whole characters; a span starting inside a character
    /// that was already reported yields nothing.
    fn invalid_characters(&mut self, span: Range<usize>) -> Token {
        let source = self.source;
        let start = span.start;
        if !source.is_char_boundary(start) {
            return self.next_token();
        }
        let mut end = span.end.max(start + 1).min(source.len());
        while !source.is_char_boundary(end) {
            end += 1;
        }

        let mut tokens = source[start..end]
            .char_indices()
            .map(|(offset, ch)| Token::new(TokenKind::Unknown, ch, start + offset));

        match tokens.next() {
            Some(first) => {
                self.pending.extend(tokens);
                first
            }
            None => self.next_token(),
        }
    }
}

/// Convenience function to tokenize a whole source, end-of-input sentinel included.
pub fn tokenize(source: &str, grammar: Grammar) -> Vec<Token> {
    let mut lexer = Lexer::new(source, grammar);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.is(TokenKind::EndOfInput);
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}
