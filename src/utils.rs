//! Token rendering for the `jlex` binary.

use anyhow::Context as _;
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

use crate::tokenizer::{Token, TokenKind};

/// Whether `err` is a closed pipe on the reading end, e.g. when the output
/// is piped into `head`.
#[must_use]
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        let kind = cause
            .downcast_ref::<io::Error>()
            .map(io::Error::kind)
            .or_else(|| {
                cause
                    .downcast_ref::<serde_json::Error>()
                    .and_then(serde_json::Error::io_error_kind)
            });
        kind == Some(io::ErrorKind::BrokenPipe)
    })
}

// ==============================================================================
// Colorized Token Output
// ==============================================================================

/// Write a single token as `[line:column] KIND = "text"` to `writer`.
/// The text part is omitted for tokens with empty text.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_token<W: Write>(
    writer: &mut W,
    token: &Token<'_>,
) -> anyhow::Result<()> {
    let position = format!("[{}:{}]", token.line, token.column);
    write!(writer, "{} {}", position.dimmed(), paint_kind(token.kind))?;
    if !token.text.is_empty() {
        write!(writer, " = \"{}\"", paint_text(token.kind, token.text))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write a single token as one line of JSON to `writer`.
///
/// # Errors
///
/// Returns an error if serialization or writing to `writer` fails.
pub fn write_json_token<W: Write>(
    writer: &mut W,
    token: &Token<'_>,
) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, token)
        .context("serialize token as JSON")?;
    writeln!(writer)?;
    Ok(())
}

fn paint_kind(kind: TokenKind) -> ColoredString {
    let name = kind.to_string();
    match kind {
        TokenKind::Error(_) => name.red().bold(),
        TokenKind::EndOfInput => name.dimmed(),
        k if k.is_structural() => name.bold(),
        _ => name.normal(),
    }
}

fn paint_text(kind: TokenKind, text: &str) -> ColoredString {
    match kind {
        TokenKind::String => text.green(),
        TokenKind::Number => text.yellow(),
        TokenKind::True | TokenKind::False => text.yellow().bold(),
        TokenKind::Null => text.red().dimmed(),
        TokenKind::Error(_) => text.red(),
        _ => text.normal(),
    }
}
