//! # Tokenizer/ Lexer
//!
//! Scans a JSON document held in memory into a stream of borrowed tokens.
pub mod error;
pub mod lexer;
pub mod token;

// Re-exports
pub use error::{ErrorKind, LexError};
pub use lexer::{Tokenizer, tokenize};
pub use token::{Token, TokenKind};
