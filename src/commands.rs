//! Subcommands of the `jlex` binary.
pub mod generate;
