//! Error results shared by the parsers built on this crate.

use std::fmt::{Display, Formatter};

/// Parser error carrying a message and, when available, the byte offset the
/// parser had reached in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte offset of the error in the source, if available
    pub offset: Option<usize>,
}

impl ParseError {
    #[must_use]
    pub fn new(message: &str) -> Self {
        ParseError {
            message: message.to_string(),
            offset: None,
        }
    }

    #[must_use]
    pub fn with_offset(message: &str, offset: usize) -> Self {
        ParseError {
            message: message.to_string(),
            offset: Some(offset),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} at offset {}", self.message, offset),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;
