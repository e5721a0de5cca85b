//! `generate` subcommand: shell completions and man pages for `jlex`.
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes completions for `shell` to `writer`.
pub fn generate_completions<W: Write>(
    shell: clap_complete::Shell,
    cmd: &mut clap::Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    log::debug!("generating {shell} completions for {name}");
    clap_complete::generate(shell, cmd, name, writer);
}

/// Generates the man page of `cmd` and one page per (nested) subcommand into
/// `output_dir`, or the current directory when none is given. Returns the
/// paths written.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page could not
/// be created.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };

    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    let mut written = Vec::new();
    let main_path = output_dir.join(format!("{}.1", cmd.get_name()));
    render_page(cmd.clone(), &main_path)?;
    written.push(main_path);

    generate_subcommand_man_pages(
        cmd,
        &output_dir,
        cmd.get_name(),
        &mut written,
    )?;

    Ok(written)
}

/// Generate subcommand Man pages recursively, named `<prefix>-<sub>.1`.
fn generate_subcommand_man_pages(
    cmd: &clap::Command,
    output_dir: &Path,
    prefix: &str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    for subcmd in cmd.get_subcommands() {
        let prefixed_name = format!("{prefix}-{}", subcmd.get_name());

        // NAME, SYNOPSIS and SEE ALSO take the command name, so the page is
        // rendered from a renamed copy. `Command::name` wants a `'static`
        // name; leaking is fine for a one-shot command.
        let leaked_name: &'static str =
            Box::leak(prefixed_name.clone().into_boxed_str());
        let renamed = subcmd
            .clone()
            .name(leaked_name)
            .disable_help_subcommand(true);

        let man_path = output_dir.join(format!("{prefixed_name}.1"));
        render_page(renamed, &man_path)?;
        written.push(man_path);

        if subcmd.has_subcommands() {
            generate_subcommand_man_pages(
                subcmd,
                output_dir,
                &prefixed_name,
                written,
            )?;
        }
    }

    Ok(())
}

fn render_page(cmd: clap::Command, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd).render(&mut file)?;
    log::info!("generated {}", path.display());
    Ok(())
}
