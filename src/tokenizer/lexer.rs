//! # JSON Lexer
//!
//! Pull-style scanner over an in-memory JSON document. Each call to
//! [`Tokenizer::next_token`] produces one [`Token`] borrowing its text from the
//! input. Malformed lexemes come back as [`TokenKind::Error`] tokens and the
//! cursor always moves past them, so a caller can keep pulling tokens to
//! collect every error in one pass.
use std::iter::FusedIterator;
use std::ops::Range;

use crate::tokenizer::{ErrorKind, Token, TokenKind};

/// Start position of the token being scanned.
#[derive(Debug, Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    column: usize,
}

/// A tokenizer that turns a JSON document into a stream of tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    /// The input document
    input: &'a str,
    /// Byte offset of the current character
    position: usize,
    /// 1-based line of the current character
    line: usize,
    /// 1-based column of the current character
    column: usize,
    /// Set once the iterator has handed out `EndOfInput`
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Returns the character under the cursor without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// 1-based line of the cursor.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the cursor.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the next token in the input from the current position.
    ///
    /// Once the input is exhausted every call returns
    /// [`TokenKind::EndOfInput`] at the same position.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let start = self.mark();
        let Some(byte) = self.current() else {
            let empty = self.slice(start.offset..start.offset);
            return self.emit(TokenKind::EndOfInput, start, empty);
        };

        match byte {
            b'{' => self.single(TokenKind::ObjectStart, start),
            b'}' => self.single(TokenKind::ObjectEnd, start),
            b'[' => self.single(TokenKind::ArrayStart, start),
            b']' => self.single(TokenKind::ArrayEnd, start),
            b':' => self.single(TokenKind::Colon, start),
            b',' => self.single(TokenKind::Comma, start),
            b'"' => self.scan_string(start),
            b't' => self.scan_literal("true", TokenKind::True, start),
            b'f' => self.scan_literal("false", TokenKind::False, start),
            b'n' => self.scan_literal("null", TokenKind::Null, start),
            b'-' | b'0'..=b'9' => self.scan_number(start),
            _ => {
                // step over the whole character so the next call makes progress
                self.advance();
                self.fail(ErrorKind::UnexpectedCharacter, start)
            }
        }
    }

    /// Byte under the cursor.
    fn current(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn at_digit(&self) -> bool {
        self.current().is_some_and(|b| b.is_ascii_digit())
    }

    /// Consumes one character, keeping line and column in step with the
    /// cursor. This is the only place the cursor moves.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consume whitespace byte(s) starting from the current position.
    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.advance();
        }
    }

    fn skip_digits(&mut self) {
        while self.at_digit() {
            self.advance();
        }
    }

    const fn mark(&self) -> Mark {
        Mark {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn slice(&self, range: Range<usize>) -> &'a str {
        &self.input[range]
    }

    /// Builds a token that starts at `start` and ends at the cursor.
    fn emit(&self, kind: TokenKind, start: Mark, text: &'a str) -> Token<'a> {
        let token = Token {
            kind,
            text,
            line: start.line,
            column: start.column,
            offset: start.offset,
            len: self.position - start.offset,
        };
        log::trace!("{}:{} {} {:?}", token.line, token.column, kind, text);
        token
    }

    /// Builds an error token covering everything consumed since `start`.
    fn fail(&self, kind: ErrorKind, start: Mark) -> Token<'a> {
        log::debug!(
            "{kind} at line {}, column {}",
            start.line,
            start.column
        );
        self.emit(
            TokenKind::Error(kind),
            start,
            self.slice(start.offset..self.position),
        )
    }

    fn single(&mut self, kind: TokenKind, start: Mark) -> Token<'a> {
        self.advance();
        self.emit(kind, start, self.slice(start.offset..start.offset))
    }

    /// Reads a string and returns its content between the quotes, escapes
    /// left as written.
    fn scan_string(&mut self, start: Mark) -> Token<'a> {
        // Skip opening quote
        self.advance();
        let content_start = self.position;

        loop {
            match self.current() {
                None => return self.fail(ErrorKind::UnterminatedString, start),
                Some(b'"') => break,
                Some(b'\\') => {
                    // skip the escaped character to avoid premature
                    // termination with `\"`
                    self.advance();
                    if self.current().is_none() {
                        return self
                            .fail(ErrorKind::UnterminatedStringEscape, start);
                    }
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }

        let content_end = self.position;
        self.advance();

        self.emit(
            TokenKind::String,
            start,
            self.slice(content_start..content_end),
        )
    }

    /// Matches `literal` byte for byte. On a mismatch the matched prefix
    /// stays consumed.
    fn scan_literal(
        &mut self,
        literal: &'static str,
        kind: TokenKind,
        start: Mark,
    ) -> Token<'a> {
        for expected in literal.bytes() {
            if self.current() != Some(expected) {
                return self.fail(ErrorKind::InvalidLiteral, start);
            }
            self.advance();
        }
        self.emit(kind, start, self.slice(start.offset..self.position))
    }

    /// Reads a JSON number (int, frac, exp) and returns a `Number` token with
    /// the lexeme as written.
    fn scan_number(&mut self, start: Mark) -> Token<'a> {
        // optional leading '-'
        if self.current() == Some(b'-') {
            self.advance();
        }

        // integer part
        match self.current() {
            Some(b'0') => {
                self.advance();
                if self.at_digit() {
                    return self.fail(ErrorKind::InvalidNumberFormat, start);
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return self.fail(ErrorKind::InvalidNumberFormat, start),
        }

        // fractional part
        if self.current() == Some(b'.') {
            self.advance();
            if !self.at_digit() {
                return self.fail(ErrorKind::MissingFractionalDigits, start);
            }
            self.skip_digits();
        }

        // exponent part
        if matches!(self.current(), Some(b'e' | b'E')) {
            self.advance();
            if matches!(self.current(), Some(b'+' | b'-')) {
                self.advance();
            }
            if !self.at_digit() {
                return self.fail(ErrorKind::MissingExponentDigits, start);
            }
            self.skip_digits();
        }

        self.emit(
            TokenKind::Number,
            start,
            self.slice(start.offset..self.position),
        )
    }
}

/// Yields every token up to and including the first `EndOfInput`.
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::EndOfInput;
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenize a JSON document into tokens, returning both the token sequence
/// (terminated by `EndOfInput`) and the number of bytes of the input read.
#[must_use]
pub fn tokenize(text: &str) -> (Vec<Token<'_>>, usize) {
    let mut tokenizer = Tokenizer::new(text);
    let tokens: Vec<Token<'_>> = tokenizer.by_ref().collect();

    (tokens, tokenizer.position())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).0.iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).0.iter().map(|t| t.text).collect()
    }

    fn first(input: &str) -> Token<'_> {
        Tokenizer::new(input).next_token()
    }

    fn err(kind: ErrorKind) -> TokenKind {
        TokenKind::Error(kind)
    }

    #[test]
    fn test_empty() {
        let (tokens, bytes_read) = tokenize("");

        assert_eq!(bytes_read, 0);
        assert_eq!(tokens.len(), 1); // Including EOF
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].text, "");
    }

    #[test]
    fn whitespace_only() {
        let mut tokenizer = Tokenizer::new(" \t\r\n  \n");
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::EndOfInput);
        assert_eq!((token.line, token.column), (3, 1));
        assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds("null true false"),
            vec![
                TokenKind::Null,
                TokenKind::True,
                TokenKind::False,
                TokenKind::EndOfInput
            ]
        );
        assert_eq!(texts("null true false"), vec!["null", "true", "false", ""]);
    }

    #[test]
    fn simple_string() {
        let token = first(r#""hello world""#);
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.text, "hello world");
        assert_eq!((token.line, token.column), (1, 1));
        assert_eq!(token.len, 13);
    }

    #[test]
    fn test_number_variants() {
        let cases = [
            "0", "-0", "123", "-123", "3.14", "0.001e-10", "-42.5", "12345",
            "1.23e+10", "6E9",
        ];
        for s in cases {
            let (tokens, bytes_read) = tokenize(s);
            assert_eq!(tokens.len(), 2, "{s}");
            assert_eq!(tokens[0].kind, TokenKind::Number, "{s}");
            assert_eq!(tokens[0].text, s);
            assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
            assert_eq!(bytes_read, s.len());
        }
    }

    #[test]
    fn test_string_with_escape() {
        let input = r#""hello\nworld\"!""#;
        let (tokens, _) = tokenize(input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#"hello\nworld\"!"#);
        assert_eq!(tokens[0].span(), 0..input.len());
    }

    #[test]
    fn test_escape_sequences() {
        let cases = [
            r#""Test \"quoted\" text""#,        // Double quote
            r#""Backslash: \\""#,               // Backslash
            r#""Forward slash: \/""#,           // Forward slash
            r#""Backspace: \b""#,               // Backspace
            r#""Form feed: \f""#,               // Form feed
            r#""Newline: \n""#,                 // Newline
            r#""Carriage return: \r""#,         // Carriage return
            r#""Tab: \t""#,                     // Tab
            r#""Unicode: \u0041\u0042\u0043""#, // Unicode escape
            r#""Mixed: \"\\\n\t\u0020""#,       // Mixed escapes
        ];

        for input in cases {
            let (tokens, _) = tokenize(input);
            assert_eq!(tokens.len(), 2); // String token + EOF
            assert_eq!(tokens[0].kind, TokenKind::String);
            assert_eq!(tokens[0].text, &input[1..input.len() - 1]);
        }
    }

    #[test]
    fn simple_object() {
        let (tokens, _) = tokenize(r#"{"key": "value"}"#);
        let got: Vec<(TokenKind, &str)> =
            tokens.iter().map(|t| (t.kind, t.text)).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::ObjectStart, ""),
                (TokenKind::String, "key"),
                (TokenKind::Colon, ""),
                (TokenKind::String, "value"),
                (TokenKind::ObjectEnd, ""),
                (TokenKind::EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn simple_array() {
        assert_eq!(
            kinds("[1, 2, 3]"),
            vec![
                TokenKind::ArrayStart,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::ArrayEnd,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(texts("[1, 2, 3]"), vec!["", "1", "", "2", "", "3", "", ""]);
    }

    #[test]
    fn position_tracking() {
        let (tokens, _) = tokenize("{\n  \"key\": \"value\"\n}");
        let positions: Vec<(usize, usize)> =
            tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (2, 3), (2, 8), (2, 10), (3, 1), (3, 2)]
        );
    }

    #[test]
    fn columns_count_characters() {
        let (tokens, _) = tokenize("\"h\u{e9}llo\" @");
        assert_eq!(tokens[0].text, "h\u{e9}llo");
        assert_eq!(tokens[1].kind, err(ErrorKind::UnexpectedCharacter));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 9));
        assert_eq!(tokens[1].offset, 9);
    }

    #[test]
    fn unexpected_character() {
        let mut tokenizer = Tokenizer::new("@");
        let token = tokenizer.next_token();
        assert_eq!(token.kind, err(ErrorKind::UnexpectedCharacter));
        assert_eq!(token.text, "@");
        assert!(token.is_error());
        assert_eq!((token.line, token.column), (1, 1));
        assert_eq!(tokenizer.position(), 1);
        assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn unexpected_multibyte_character() {
        let mut tokenizer = Tokenizer::new("\u{e9}");
        let token = tokenizer.next_token();
        assert_eq!(token.text, "\u{e9}");
        assert_eq!(tokenizer.position(), 2);
        assert_eq!(tokenizer.column(), 2);
    }

    #[test]
    fn end_of_input_is_idempotent() {
        let mut tokenizer = Tokenizer::new("[]  ");
        tokenizer.next_token();
        tokenizer.next_token();
        for _ in 0..3 {
            let token = tokenizer.next_token();
            assert_eq!(token.kind, TokenKind::EndOfInput);
            assert_eq!(token.offset, 4);
            assert_eq!(tokenizer.position(), 4);
            assert_eq!((tokenizer.line(), tokenizer.column()), (1, 5));
            assert_eq!(tokenizer.peek(), None);
        }
    }

    #[test]
    fn unterminated_strings() {
        let token = first(r#"  "abc"#);
        assert_eq!(token.kind, err(ErrorKind::UnterminatedString));
        assert_eq!(token.column, 3);
        assert_eq!(token.text, r#""abc"#);

        let token = first(r#""abc\"#);
        assert_eq!(token.kind, err(ErrorKind::UnterminatedStringEscape));
        assert_eq!(token.column, 1);

        let token = first(r#""abc\""#);
        assert_eq!(token.kind, err(ErrorKind::UnterminatedString));
    }

    #[test]
    fn invalid_literals() {
        assert_eq!(
            kinds("tru"),
            vec![err(ErrorKind::InvalidLiteral), TokenKind::EndOfInput]
        );
        assert_eq!(texts("nul"), vec!["nul", ""]);
        assert_eq!(
            kinds("fals e"),
            vec![
                err(ErrorKind::InvalidLiteral),
                err(ErrorKind::UnexpectedCharacter),
                TokenKind::EndOfInput
            ]
        );
        assert_eq!(texts("trUe"), vec!["tr", "U", "e", ""]);
    }

    #[test]
    fn literal_followed_by_garbage() {
        assert_eq!(
            kinds("truex"),
            vec![
                TokenKind::True,
                err(ErrorKind::UnexpectedCharacter),
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn invalid_numbers() {
        let cases = [
            ("-", ErrorKind::InvalidNumberFormat, "-"),
            ("-x", ErrorKind::InvalidNumberFormat, "-"),
            ("01", ErrorKind::InvalidNumberFormat, "0"),
            ("-007", ErrorKind::InvalidNumberFormat, "-0"),
            ("1.", ErrorKind::MissingFractionalDigits, "1."),
            ("1.e5", ErrorKind::MissingFractionalDigits, "1."),
            ("1e", ErrorKind::MissingExponentDigits, "1e"),
            ("2E+", ErrorKind::MissingExponentDigits, "2E+"),
            ("3e-x", ErrorKind::MissingExponentDigits, "3e-"),
        ];
        for (input, kind, text) in cases {
            let token = first(input);
            assert_eq!(token.kind, err(kind), "{input}");
            assert_eq!(token.text, text, "{input}");
            assert_eq!((token.line, token.column), (1, 1));
        }
    }

    #[test]
    fn leading_zero_resumes_after_zero() {
        assert_eq!(texts("01"), vec!["0", "1", ""]);
    }

    #[test]
    fn errors_do_not_stop_the_stream() {
        assert_eq!(
            kinds("[@, tru]"),
            vec![
                TokenKind::ArrayStart,
                err(ErrorKind::UnexpectedCharacter),
                TokenKind::Comma,
                err(ErrorKind::InvalidLiteral),
                TokenKind::ArrayEnd,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn iterator_stops_after_end_of_input() {
        let mut tokenizer = Tokenizer::new("null");
        assert_eq!(tokenizer.next().map(|t| t.kind), Some(TokenKind::Null));
        assert_eq!(
            tokenizer.next().map(|t| t.kind),
            Some(TokenKind::EndOfInput)
        );
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut tokenizer = Tokenizer::new("  [");
        assert_eq!(tokenizer.peek(), Some(' '));
        tokenizer.next_token();
        assert_eq!(tokenizer.peek(), None);
        assert_eq!(tokenizer.position(), 3);
    }
}
