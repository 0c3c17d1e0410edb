//! Generic tokenizer engine.
//!
//! The engine performs a single left-to-right scan over a source string and
//! produces a flat sequence of typed, positioned tokens. It has no knowledge
//! of any particular grammar: the character classes (delimiters, whitespace,
//! string quotes, comment markers) are supplied through a [`TokenizerGrammar`]
//! implementation, so the same scanner drives every parser built on top of it.
//!
//! Every byte of the input is covered by exactly one token, tokens are emitted
//! in strictly increasing source order, and each token's `value` equals the
//! source slice between its `start` and `end` offsets. This is the invariant
//! that makes lossless stringification possible further up the stack.

use std::fmt;

/// Comment flavor recognised by a grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentKind {
    /// A comment that runs to the end of the line (`// ...`).
    Line,
    /// A block comment with an explicit terminator (`/* ... */`).
    Multi,
}

/// The closed set of token classifications the engine can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A maximal run of characters that are not whitespace, delimiters,
    /// string or comment starts.
    Text,
    /// A maximal run of whitespace characters.
    Space,
    /// A complete quoted string, quotes included.
    String,
    /// A string that was still open at end of input.
    UnclosedString,
    /// A line comment, including its terminating newline when present.
    LineComment,
    /// A complete block comment, markers included.
    MultiComment,
    /// A block comment that was still open at end of input.
    UnclosedComment,
    /// A single delimiter character.
    Delim(char),
}

impl TokenKind {
    /// Returns true for any of the comment classifications.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::LineComment | TokenKind::MultiComment | TokenKind::UnclosedComment
        )
    }
}

/// A single token. Immutable once produced; `start` and `end` are byte
/// offsets into the original source (plus the tokenizer offset, if any).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, start: usize, end: usize) -> Self {
        Self {
            kind,
            value,
            start,
            end,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Character-class configuration for a concrete grammar.
///
/// The required methods mirror the predicates a grammar must supply; the
/// provided methods have defaults that almost every grammar keeps.
/// `prev` is the previously scanned character (one character of lookback,
/// which lets a grammar treat `\,` differently from `,`).
pub trait TokenizerGrammar {
    /// Is `ch` a single-character delimiter token?
    fn is_delimiter(&self, ch: char, prev: Option<char>) -> bool;

    /// Does `ch` open (or close) a quoted string?
    fn is_string_delimiter(&self, ch: char, prev: Option<char>) -> bool;

    /// Is `ch` whitespace?
    fn is_whitespace(&self, ch: char) -> bool;

    /// Does `ch` (with one character of lookahead) start a comment?
    fn comment_start(&self, ch: char, next: Option<char>) -> Option<CommentKind>;

    /// Does `ch` terminate a comment of the given kind?
    fn is_comment_end(&self, kind: CommentKind, ch: char, prev: Option<char>) -> bool;

    /// Final filter over produced tokens. Kept for grammars that want to drop
    /// trivia; the stock grammars keep everything so stringification stays
    /// lossless.
    fn should_add_token(&self, _token: &Token) -> bool {
        true
    }

    /// Classification for a comment still open at end of input.
    fn unclosed_comment(&self, kind: CommentKind) -> TokenKind {
        match kind {
            CommentKind::Line => TokenKind::LineComment,
            CommentKind::Multi => TokenKind::UnclosedComment,
        }
    }

    /// Token construction hook.
    fn create_token(&self, kind: TokenKind, value: String, start: usize, end: usize) -> Token {
        Token::new(kind, value, start, end)
    }
}

/// Tokenizes `source` with positions starting at offset 0.
pub fn tokenize<G: TokenizerGrammar>(source: &str, grammar: &G) -> Vec<Token> {
    tokenize_at(source, grammar, 0)
}

/// Tokenizes `source` with all token positions shifted by `offset`, for
/// tokenizing an embedded sub-string at a non-zero base position.
pub fn tokenize_at<G: TokenizerGrammar>(source: &str, grammar: &G, offset: usize) -> Vec<Token> {
    Scanner {
        source,
        grammar,
        offset,
        tokens: Vec::new(),
        buf_start: 0,
        buf_len: 0,
        mode: Mode::Plain,
        prev: None,
    }
    .scan()
}

/// Returns the raw source text spanned by `tokens[from..to]`.
///
/// Token positions must be relative to `source` (offset 0). The result is
/// empty for an empty or out-of-bounds range.
pub fn text_between(tokens: &[Token], from: usize, to: usize, source: &str) -> String {
    if from >= to {
        return String::new();
    }
    let (Some(first), Some(last)) = (tokens.get(from), tokens.get(to - 1)) else {
        return String::new();
    };
    source.get(first.start..last.end).unwrap_or("").to_string()
}

#[derive(Clone, Copy)]
enum Mode {
    Plain,
    InString(char),
    InComment(CommentKind),
}

struct Scanner<'s, G> {
    source: &'s str,
    grammar: &'s G,
    offset: usize,
    tokens: Vec<Token>,
    buf_start: usize,
    buf_len: usize,
    mode: Mode,
    prev: Option<char>,
}

impl<G: TokenizerGrammar> Scanner<'_, G> {
    fn scan(mut self) -> Vec<Token> {
        let mut iter = self.source.char_indices().peekable();
        while let Some((idx, ch)) = iter.next() {
            let next_ch = iter.peek().map(|&(_, c)| c);
            self.step(idx, ch, next_ch);
            self.prev = Some(ch);
        }

        match self.mode {
            Mode::InComment(kind) => {
                let kind = self.grammar.unclosed_comment(kind);
                self.flush(Some(kind));
            }
            Mode::InString(_) => self.flush(Some(TokenKind::UnclosedString)),
            Mode::Plain => self.flush(None),
        }

        self.tokens
    }

    fn step(&mut self, idx: usize, ch: char, next_ch: Option<char>) {
        match self.mode {
            Mode::InString(quote) => {
                self.push_char(idx, ch);
                if ch == quote && self.grammar.is_string_delimiter(ch, self.prev) {
                    self.mode = Mode::Plain;
                    self.flush(Some(TokenKind::String));
                }
            }
            Mode::InComment(kind) => {
                self.push_char(idx, ch);
                if self.grammar.is_comment_end(kind, ch, self.prev) {
                    self.mode = Mode::Plain;
                    self.flush(Some(match kind {
                        CommentKind::Line => TokenKind::LineComment,
                        CommentKind::Multi => TokenKind::MultiComment,
                    }));
                }
            }
            Mode::Plain => {
                if self.grammar.is_string_delimiter(ch, self.prev) {
                    self.flush(None);
                    self.push_char(idx, ch);
                    self.mode = Mode::InString(ch);
                } else if let Some(kind) = self.grammar.comment_start(ch, next_ch) {
                    self.flush(None);
                    self.push_char(idx, ch);
                    self.mode = Mode::InComment(kind);
                } else if self.grammar.is_delimiter(ch, self.prev) {
                    self.flush(None);
                    self.push_char(idx, ch);
                    self.flush(Some(TokenKind::Delim(ch)));
                } else {
                    // A whitespace/text boundary closes the current run.
                    let prev_ws = self.prev.map_or(false, |p| self.grammar.is_whitespace(p));
                    if self.grammar.is_whitespace(ch) != prev_ws {
                        self.flush(None);
                    }
                    self.push_char(idx, ch);
                }
            }
        }
    }

    fn push_char(&mut self, idx: usize, ch: char) {
        if self.buf_len == 0 {
            self.buf_start = idx;
        }
        self.buf_len += ch.len_utf8();
    }

    fn flush(&mut self, kind: Option<TokenKind>) {
        if self.buf_len == 0 {
            return;
        }
        let start = self.buf_start;
        let end = start + self.buf_len;
        let value = self.source.get(start..end).unwrap_or("").to_string();
        let kind = kind.unwrap_or_else(|| {
            let first_ws = value
                .chars()
                .next()
                .map_or(false, |c| self.grammar.is_whitespace(c));
            if first_ws {
                TokenKind::Space
            } else {
                TokenKind::Text
            }
        });

        let token = self
            .grammar
            .create_token(kind, value, self.offset + start, self.offset + end);
        if self.grammar.should_add_token(&token) {
            log::trace!("{:?}", token);
            self.tokens.push(token);
        }

        self.buf_start = end;
        self.buf_len = 0;
    }
}
