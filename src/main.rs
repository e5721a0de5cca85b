/*!
Main binary for jsonlex.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use memmap2::Mmap;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use jsonlex::{Tokenizer, commands, utils};

/// Tokenize a JSON document and print one token per line.
#[derive(Parser)]
#[command(name = "jlex", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Print each token as a line of JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
    /// Display the total number of tokens
    #[arg(long, action = ArgAction::SetTrue)]
    count: bool,
    /// Stop after this many tokens
    #[arg(long, value_name = "N")]
    max_tokens: Option<usize>,
    /// Do not display tokens
    #[arg(short, long, action = ArgAction::SetTrue)]
    no_display: bool,
    /// Stop at the first lexical error
    #[arg(long, action = ArgAction::SetTrue)]
    stop_on_error: bool,
    #[command(flatten)]
    verbose: Verbosity,
}

/// Available subcommands for `jlex`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jlex to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// How the token stream is printed.
#[allow(clippy::struct_excessive_bools)]
struct DumpOptions {
    json: bool,
    count: bool,
    display: bool,
    stop_on_error: bool,
    max_tokens: Option<usize>,
}

impl From<&Args> for DumpOptions {
    fn from(args: &Args) -> Self {
        Self {
            json: args.json,
            count: args.count,
            display: !args.no_display,
            stop_on_error: args.stop_on_error,
            max_tokens: args.max_tokens,
        }
    }
}

#[derive(Debug, Default)]
struct Summary {
    tokens: usize,
    errors: usize,
}

/// Input document, memory-mapped when read from a file.
enum Document {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Document {
    fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let metadata = file
            .metadata()
            .with_context(|| format!("Failed to stat file {}", path.display()))?;

        // Pipes and character devices report a length of 0, so only regular
        // files with content are mapped.
        if !metadata.is_file() || metadata.len() == 0 {
            let mut buffer = Vec::new();
            file.read_to_end(&mut buffer).with_context(|| {
                format!("Failed to read file {}", path.display())
            })?;
            return Ok(Self::Owned(buffer));
        }

        // SAFETY: the map is read-only; the file must not be truncated by
        // another process while it is mapped.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map file {}", path.display()))?;
        log::debug!("mapped {} ({} bytes)", path.display(), metadata.len());
        Ok(Self::Mapped(map))
    }

    fn as_str(&self) -> Result<&str> {
        let bytes: &[u8] = match self {
            Self::Mapped(map) => &map[..],
            Self::Owned(buf) => buf,
        };
        std::str::from_utf8(bytes).context("Input is not valid UTF-8")
    }
}

/// Entry point for main binary.
///
/// This tokenizes the input file, or STDIN when it is piped in, and prints
/// the tokens to STDOUT. Lexical errors are reported on STDERR and make the
/// process exit with a failure status.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                commands::generate::generate_completions(
                    *shell,
                    &mut Args::command(),
                    &mut io::stdout().lock(),
                );
            }
            GenerateCommand::Man { output_dir } => {
                let written = commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir.clone(),
                )?;
                for path in written {
                    println!("Generated: {}", path.display());
                }
            }
        },
        None => {
            let document = if let Some(path) = &args.input {
                Document::open(path)?
            } else {
                if io::stdin().is_terminal() {
                    // No piped input and no file specified
                    let mut cmd = Args::command();
                    return Ok(cmd.print_help()?);
                }
                let mut buffer = Vec::new();
                io::stdin()
                    .read_to_end(&mut buffer)
                    .context("Failed to read STDIN")?;
                Document::Owned(buffer)
            };

            let summary = dump_tokens(
                document.as_str()?,
                &DumpOptions::from(&args),
                io::stdout().lock(),
            )?;
            log::info!(
                "{} tokens, {} lexical errors",
                summary.tokens,
                summary.errors
            );

            if summary.errors > 0 {
                anyhow::bail!("found {} lexical error(s)", summary.errors);
            }
        }
    }

    Ok(())
}

/// Pulls tokens from `text` and prints them to `out` according to `opts`.
///
/// Once `out` turns out to be a closed pipe printing stops, but the rest of
/// the input is still scanned so that lexical errors are counted.
fn dump_tokens<W: Write>(
    text: &str,
    opts: &DumpOptions,
    out: W,
) -> Result<Summary> {
    let mut out = BufWriter::new(out);
    let mut summary = Summary::default();
    let mut closed = false;

    for token in Tokenizer::new(text) {
        if opts.max_tokens.is_some_and(|max| summary.tokens >= max) {
            if !closed {
                let notice = if opts.json {
                    writeln!(
                        out,
                        "{}",
                        json!({ "truncated_after": summary.tokens })
                    )
                } else {
                    writeln!(
                        out,
                        "... (truncated after {} tokens)",
                        summary.tokens
                    )
                };
                closed = ignore_broken_pipe(notice.map_err(Into::into))?;
            }
            break;
        }
        summary.tokens += 1;

        if opts.display && !closed {
            let written = if opts.json {
                utils::write_json_token(&mut out, &token)
            } else {
                utils::write_colored_token(&mut out, &token)
            };
            closed = ignore_broken_pipe(written)?;
        }

        if let Some(err) = token.to_error() {
            summary.errors += 1;
            eprintln!("error: {err}");
            if opts.stop_on_error {
                break;
            }
        }
    }

    if opts.count && !closed {
        let count = if opts.json {
            writeln!(out, "{}", json!({ "total_tokens": summary.tokens }))
        } else {
            writeln!(out, "Total tokens: {}", summary.tokens)
        };
        closed = ignore_broken_pipe(count.map_err(Into::into))?;
    }
    if !closed {
        ignore_broken_pipe(out.flush().map_err(Into::into))?;
    }

    Ok(summary)
}

/// Returns `true` if `result` failed because the reader closed the pipe,
/// propagating every other error.
fn ignore_broken_pipe(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(false),
        Err(err) if utils::is_broken_pipe(&err) => {
            log::debug!("stdout closed, output stopped");
            Ok(true)
        }
        Err(err) => Err(err),
    }
}
