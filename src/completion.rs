//! Shell completion scripts for the revsent CLI.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Generator, Shell as CompletionShell, generate};
use std::io::{self, Write};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};
use crate::infra::io::write_atomic;

const BIN_NAME: &str = "revsent";

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

/// Render the completion script for `shell` into memory.
pub fn script(shell: CompletionShell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buf);
    buf
}

pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    let shell: CompletionShell = args.shell.into();
    let bytes = script(shell);

    if args.stdout {
        io::stdout().write_all(&bytes).context("write completion to stdout")?;
        return Ok(());
    }

    let dir = args
        .out_dir
        .ok_or_else(|| anyhow::anyhow!("--out-dir is required unless --stdout is set"))?;
    let path = dir.join(shell.file_name(BIN_NAME));

    if ctx.dry_run {
        if !ctx.quiet {
            println!("DRY RUN: would write {} ({} bytes)", path.display(), bytes.len());
        }
        return Ok(());
    }

    write_atomic(&path, &bytes)?;
    if !ctx.quiet {
        eprintln!("Wrote completion to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_lists_subcommands() {
        let text = String::from_utf8(script(CompletionShell::Bash)).unwrap();
        for sub in ["analyze", "words", "products", "init"] {
            assert!(text.contains(sub), "missing {sub}");
        }
    }

    #[test]
    fn test_writes_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let args = CompletionsArgs {
            shell: Shell::Fish,
            out_dir: Some(dir.path().to_path_buf()),
            stdout: false,
        };
        run(args, &AppContext { quiet: true, ..AppContext::default() }).unwrap();
        assert!(dir.path().join("revsent.fish").exists());
    }

    #[test]
    fn test_out_dir_required_without_stdout() {
        let args = CompletionsArgs { shell: Shell::Zsh, out_dir: None, stdout: false };
        assert!(run(args, &AppContext::default()).is_err());
    }
}
