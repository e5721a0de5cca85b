/*!
# Value Extraction

Converts the raw text of value tokens into Rust values. Every helper returns
[`None`] when handed a token of the wrong kind, including error and
structural tokens.

```rust
use jsonlex::{Tokenizer, extract_number, extract_string};

let mut tokenizer = Tokenizer::new(r#"["id", 42.5]"#);
tokenizer.next_token();
let key = tokenizer.next_token();
assert_eq!(extract_string(&key), Some("id"));
assert_eq!(extract_number(&key), None);
tokenizer.next_token();
assert_eq!(extract_number(&tokenizer.next_token()), Some(42.5));
```
*/
use crate::tokenizer::{Token, TokenKind};

/// Returns the raw text of a `String` token, escapes left as written.
#[must_use]
pub const fn extract_string<'a>(token: &Token<'a>) -> Option<&'a str> {
    match token.kind {
        TokenKind::String => Some(token.text),
        _ => None,
    }
}

/// Returns the value of a `True` or `False` token.
#[must_use]
pub const fn extract_boolean(token: &Token<'_>) -> Option<bool> {
    match token.kind {
        TokenKind::True => Some(true),
        TokenKind::False => Some(false),
        _ => None,
    }
}

/// Parses a `Number` token as an `f64`.
///
/// Returns [`None`] when the lexeme does not fit in a finite `f64`.
#[must_use]
pub fn extract_number(token: &Token<'_>) -> Option<f64> {
    if token.kind != TokenKind::Number {
        return None;
    }
    token.text.parse::<f64>().ok().filter(|n| n.is_finite())
}
