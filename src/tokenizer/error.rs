//! # Lexical Errors
//!
//! Defines the taxonomy of scan-time errors. Errors travel through the token
//! stream as [`TokenKind::Error`](crate::tokenizer::TokenKind::Error) tokens;
//! [`LexError`] is the position-anchored report derived from such a token.
use serde::Serialize;
use std::error::Error;
use std::fmt;

/// Reason a lexeme could not be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Input ended before the closing quote of a string.
    UnterminatedString,
    /// Input ended right after a backslash inside a string.
    UnterminatedStringEscape,
    /// A word starting with `t`, `f` or `n` is not `true`, `false` or `null`.
    InvalidLiteral,
    /// A number has no integer digits, or has a leading zero.
    InvalidNumberFormat,
    /// A `.` in a number is not followed by a digit.
    MissingFractionalDigits,
    /// An exponent marker in a number is not followed by a digit.
    MissingExponentDigits,
    /// A character that cannot start any JSON token.
    UnexpectedCharacter,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedStringEscape => "unterminated string escape",
            Self::InvalidLiteral => "invalid literal",
            Self::InvalidNumberFormat => "invalid number format",
            Self::MissingFractionalDigits => {
                "invalid number format: missing fractional digits"
            }
            Self::MissingExponentDigits => {
                "invalid number format: missing exponent digits"
            }
            Self::UnexpectedCharacter => "unexpected character",
        };
        write!(f, "{msg}")
    }
}

/// A lexical error anchored at the start of the offending lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// 1-based line of the lexeme's first character.
    pub line: usize,
    /// 1-based column of the lexeme's first character.
    pub column: usize,
    /// Byte offset of the lexeme's first character.
    pub offset: usize,
}

impl Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind, self.line, self.column
        )
    }
}
