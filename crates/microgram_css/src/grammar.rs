//! Concrete tokenizer grammars for the CSS micro-grammars in this crate.

use microgram_shared::tokenizer::{tokenize, CommentKind, Token, TokenizerGrammar};

/// CSS whitespace.
pub(crate) fn is_css_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{c}')
}

/// Grammar for CSS selectors.
///
/// Strings are recognised so that quoted attribute values (`[href="a]b"]`)
/// keep their brackets out of the token stream; comments are `/* */` and,
/// when `line_comments` is set, `//` to end of line.
pub struct SelectorGrammar {
    pub line_comments: bool,
}

impl TokenizerGrammar for SelectorGrammar {
    fn is_delimiter(&self, ch: char, _prev: Option<char>) -> bool {
        matches!(
            ch,
            '[' | ']'
                | '('
                | ')'
                | ','
                | '*'
                | '|'
                | ':'
                | '.'
                | '#'
                | '>'
                | '~'
                | '+'
                | '{'
                | '}'
        )
    }

    fn is_string_delimiter(&self, ch: char, _prev: Option<char>) -> bool {
        ch == '\'' || ch == '"'
    }

    fn is_whitespace(&self, ch: char) -> bool {
        is_css_whitespace(ch)
    }

    fn comment_start(&self, ch: char, next: Option<char>) -> Option<CommentKind> {
        if ch != '/' {
            return None;
        }
        match next {
            Some('*') => Some(CommentKind::Multi),
            Some('/') if self.line_comments => Some(CommentKind::Line),
            _ => None,
        }
    }

    fn is_comment_end(&self, kind: CommentKind, ch: char, prev: Option<char>) -> bool {
        match kind {
            CommentKind::Line => ch == '\n',
            CommentKind::Multi => ch == '/' && prev == Some('*'),
        }
    }
}

/// Grammar for the value-definition syntax (`<length> | auto` and friends).
///
/// Quotes are plain text here: `<'background-color'>` and enclosed literals
/// arrive as text runs and are interpreted by the parser. There are no
/// comments in this grammar.
pub struct SyntaxGrammar;

impl TokenizerGrammar for SyntaxGrammar {
    fn is_delimiter(&self, ch: char, _prev: Option<char>) -> bool {
        matches!(
            ch,
            '<' | '>'
                | '['
                | ']'
                | ','
                | '/'
                | '|'
                | '&'
                | '#'
                | '('
                | ')'
                | '{'
                | '}'
                | '?'
                | '!'
                | '*'
                | '+'
        )
    }

    fn is_string_delimiter(&self, _ch: char, _prev: Option<char>) -> bool {
        false
    }

    fn is_whitespace(&self, ch: char) -> bool {
        is_css_whitespace(ch)
    }

    fn comment_start(&self, _ch: char, _next: Option<char>) -> Option<CommentKind> {
        None
    }

    fn is_comment_end(&self, _kind: CommentKind, _ch: char, _prev: Option<char>) -> bool {
        false
    }
}

/// Grammar that only separates comments and strings from everything else,
/// used by [`strip_comments`].
struct CommentGrammar;

impl TokenizerGrammar for CommentGrammar {
    fn is_delimiter(&self, _ch: char, _prev: Option<char>) -> bool {
        false
    }

    fn is_string_delimiter(&self, ch: char, prev: Option<char>) -> bool {
        prev != Some('\\') && (ch == '\'' || ch == '"')
    }

    fn is_whitespace(&self, _ch: char) -> bool {
        false
    }

    fn comment_start(&self, ch: char, next: Option<char>) -> Option<CommentKind> {
        if ch == '/' && next == Some('*') {
            Some(CommentKind::Multi)
        } else {
            None
        }
    }

    fn is_comment_end(&self, _kind: CommentKind, ch: char, prev: Option<char>) -> bool {
        ch == '/' && prev == Some('*')
    }
}

/// Removes all `/* */` comments from `source`, leaving everything else
/// byte-for-byte intact. Comments inside quoted strings are preserved.
pub fn strip_comments(source: &str) -> String {
    tokenize(source, &CommentGrammar)
        .iter()
        .filter(|t| !t.kind.is_comment())
        .map(|t| t.value.as_str())
        .collect()
}

/// Tokenizes a selector source string.
pub fn tokenize_selector(source: &str, line_comments: bool) -> Vec<Token> {
    tokenize(source, &SelectorGrammar { line_comments })
}

/// Tokenizes a value-definition-syntax source string.
pub fn tokenize_syntax(source: &str) -> Vec<Token> {
    tokenize(source, &SyntaxGrammar)
}
