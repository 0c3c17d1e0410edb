//! Errors raised by the fail-fast value-definition-syntax parser.
//!
//! Unlike the selector parser, which degrades malformed constructs into
//! `invalid` AST nodes and keeps going, a malformed grammar definition has no
//! useful degraded interpretation, so every condition here aborts the parse.

use crate::syntax::GroupCombinators;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("missing data type name")]
    MissingDataTypeName,

    #[error("missing '>' to close the data type")]
    UnclosedTypeDefinition,

    #[error("invalid range")]
    InvalidRange,

    #[error("invalid number '{0}' in range")]
    InvalidNumber(String),

    #[error("missing range start value")]
    MissingRangeStart,

    #[error("missing range end value")]
    MissingRangeEnd,

    #[error("missing '}}' to close the range")]
    UnclosedRange,

    #[error("unexpected modifier")]
    UnexpectedModifier,

    #[error("multiple range multipliers on the same component")]
    DuplicateMultiplier,

    #[error("unclosed or empty literal")]
    UnclosedOrEmptyLiteral,

    #[error("invalid literal '{0}'")]
    InvalidLiteral(String),

    #[error("expected '&&' but found a single '&'")]
    SingleAmpersand,

    #[error("missing component before '{0}'")]
    MissingComponentBefore(GroupCombinators),

    #[error("missing component after '{0}'")]
    MissingComponentAfter(GroupCombinators),

    #[error("invalid grouping")]
    InvalidGrouping,

    #[error("could not reduce the syntax to a single component")]
    AmbiguousSyntax,

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unclosed group")]
    UnclosedGroup,

    #[error("empty syntax")]
    EmptySyntax,

    #[error("group nesting is too deep")]
    NestingTooDeep,

    #[error("cannot stringify a {0} component")]
    UnsupportedStringify(&'static str),
}
