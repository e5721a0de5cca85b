//! # JSON Token
//!
//! Defines possible tokens from scanning a JSON document. A [`Token`] borrows
//! its text from the input buffer and never owns a copy of it.
use serde::Serialize;
use std::fmt::Display;
use std::ops::Range;

use crate::tokenizer::{ErrorKind, LexError};

/// Represents the kind of a token from a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /* Values */
    /// String value, quotes excluded from the text
    String,

    /// Numeric value, kept as written
    Number,

    /// `true` literal
    True,

    /// `false` literal
    False,

    /// `null` literal
    Null,

    /* Delimiters */
    /// Opening curly brace
    ObjectStart,

    /// Closing curly brace
    ObjectEnd,

    /// Opening square bracket
    ArrayStart,

    /// Closing square bracket
    ArrayEnd,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Reserved */
    /// End of input
    EndOfInput,

    /// Malformed lexeme
    Error(ErrorKind),
}

impl TokenKind {
    /// Whether this is one of the six punctuation tokens.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::ObjectStart
                | Self::ObjectEnd
                | Self::ArrayStart
                | Self::ArrayEnd
                | Self::Colon
                | Self::Comma
        )
    }

    /// Whether this token carries a JSON value.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::True | Self::False | Self::Null
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "STRING"),
            Self::Number => write!(f, "NUMBER"),
            Self::True => write!(f, "TRUE"),
            Self::False => write!(f, "FALSE"),
            Self::Null => write!(f, "NULL"),
            Self::ObjectStart => write!(f, "OBJECT_START"),
            Self::ObjectEnd => write!(f, "OBJECT_END"),
            Self::ArrayStart => write!(f, "ARRAY_START"),
            Self::ArrayEnd => write!(f, "ARRAY_END"),
            Self::Colon => write!(f, "COLON"),
            Self::Comma => write!(f, "COMMA"),
            Self::EndOfInput => write!(f, "END_OF_INPUT"),
            Self::Error(kind) => write!(f, "ERROR({kind})"),
        }
    }
}

/// A token scanned from a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// The kind of token
    pub kind: TokenKind,
    /// Lexeme text borrowed from the input
    // NOTE: for strings this excludes the quotes; for error tokens it is the
    // raw input consumed while scanning the malformed lexeme
    pub text: &'a str,
    /// 1-based line of the first character
    pub line: usize,
    /// 1-based column of the first character
    pub column: usize,
    /// Byte offset of the first character in the input
    pub offset: usize,
    /// Byte length of the full source lexeme, quotes included
    pub len: usize,
}

impl<'a> Token<'a> {
    /// Creates a token at the start of the input whose source lexeme is
    /// exactly `text`.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'a str) -> Self {
        Self {
            kind,
            text,
            line: 1,
            column: 1,
            offset: 0,
            len: text.len(),
        }
    }

    /// Returns `true` unless this is an error token.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !self.is_error()
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    /// The error carried by this token, if any.
    #[must_use]
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self.kind {
            TokenKind::Error(kind) => Some(kind),
            _ => None,
        }
    }

    /// Builds a position-anchored error report for an error token.
    #[must_use]
    pub const fn to_error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(kind) => Some(LexError {
                kind,
                line: self.line,
                column: self.column,
                offset: self.offset,
            }),
            _ => None,
        }
    }

    /// Byte range of the full source lexeme in the input.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}
