/*!
# `jsonlex` Library

A pull-style, zero-copy tokenizer for JSON text.

```rust
use jsonlex::{Tokenizer, TokenKind};

let mut tokenizer = Tokenizer::new(r#"{"id": 7}"#);
assert_eq!(tokenizer.next_token().kind, TokenKind::ObjectStart);

let key = tokenizer.next_token();
assert_eq!(key.text, "id");
assert_eq!((key.line, key.column), (1, 2));
```
*/

pub mod commands;
pub mod extract;
pub mod tokenizer;
pub mod utils;

pub use extract::{extract_boolean, extract_number, extract_string};
pub use tokenizer::{ErrorKind, LexError, Token, TokenKind, Tokenizer, tokenize};
