//! Single-pass-with-backtracking reader over a token sequence.
//!
//! The cursor is the only mutable state a parser carries: an explicit
//! position into an immutable token slice. All parsers in the toolkit,
//! including recursive ones, share one cursor per parse call; a nested
//! [`Cursor::run`] must leave the position exactly one token past whatever
//! closed the nested construct, so the caller's own iteration resumes with no
//! re-scanning and no duplicated or skipped tokens. That contract is tested
//! here, independent of any concrete parser.

use crate::tokenizer::{Token, TokenKind};

/// A positioned reader over `tokens`.
///
/// Consuming past the end keeps advancing the position, mirroring the way
/// a caller distinguishes "a nested run stopped on its closing token"
/// (`current()` is that token) from "a nested run ran out of input"
/// (`current()` is `None`).
#[derive(Debug)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Consumes and returns the next token, or `None` at end of input.
    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    /// Retreats the position by one token.
    pub fn back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// The most recently consumed token.
    pub fn current(&self) -> Option<&'t Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Non-consuming look at the next token.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Non-consuming look `k` tokens ahead; `peek_ahead(1)` equals `peek()`.
    pub fn peek_ahead(&self, k: usize) -> Option<&'t Token> {
        (self.pos + k).checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// The token before the most recently consumed one.
    pub fn peek_back(&self) -> Option<&'t Token> {
        self.pos.checked_sub(2).and_then(|i| self.tokens.get(i))
    }

    /// Consumes and returns the next token only if it matches `kind`.
    pub fn take(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().map(|t| t.kind) == Some(kind) {
            self.next()
        } else {
            None
        }
    }

    /// Consumes a maximal run of tokens of `kind` into a list.
    pub fn take_many(&mut self, kind: TokenKind) -> Vec<Token> {
        let mut taken = Vec::new();
        while let Some(token) = self.take(kind) {
            taken.push(token);
        }
        taken
    }

    /// Skips zero or more consecutive tokens of `kind`, returning the cursor
    /// itself for chaining.
    pub fn eat(&mut self, kind: TokenKind) -> &mut Self {
        while self.peek().map(|t| t.kind) == Some(kind) {
            self.pos += 1;
        }
        self
    }

    /// True when no tokens remain to consume.
    pub fn done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Core recursion primitive: advances one token at a time, invoking
    /// `handler(token, &mut acc, self)` until the handler returns `false` or
    /// input is exhausted, then returns the accumulator.
    ///
    /// A handler may hand the same cursor to a nested `run` for a bracketed
    /// construct; when the nested handler stops on the closing token, the
    /// outer loop resumes exactly one token past it.
    pub fn run<A, F>(&mut self, mut handler: F, mut acc: A) -> A
    where
        F: FnMut(Token, &mut A, &mut Cursor<'t>) -> bool,
    {
        while let Some(token) = self.next() {
            if !handler(token, &mut acc, self) {
                break;
            }
        }
        acc
    }

    /// Fallible variant of [`Cursor::run`] for parsers that abort on error.
    pub fn try_run<A, E, F>(&mut self, mut handler: F, mut acc: A) -> Result<A, E>
    where
        F: FnMut(Token, &mut A, &mut Cursor<'t>) -> Result<bool, E>,
    {
        while let Some(token) = self.next() {
            if !handler(token, &mut acc, self)? {
                break;
            }
        }
        Ok(acc)
    }
}
