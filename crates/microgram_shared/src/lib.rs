//! Shared building blocks for the microgram parsers.
//!
//! This crate knows nothing about any specific CSS sub-grammar. It provides
//! the generic tokenizer engine (a grammar-parameterised scanner producing a
//! flat, positioned token sequence), the backtracking [`cursor::Cursor`] that
//! every parser reads tokens through, and the common [`errors::ParseError`]
//! type for parsers that report positioned failures.

pub mod cursor;
pub mod errors;
pub mod tokenizer;
