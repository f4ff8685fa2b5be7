// SPDX-License-Identifier: MIT
//
// subword: run sub-word motions over a marked-up document from the shell.
//
//   stdin / --input → markup::parse → Editor::execute per step → markup::render → stdout
//
// Example:
//
//   $ echo 'thisIsA^CamelCaseWord' | subword move-right select-right
//   thisIsACamel[Case}Word
//
// Logs go to stderr, filtered by RUST_LOG or the -v flags.

use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use subword_core::command::{Command, UnknownCommand};
use subword_core::editor::Editor;

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "subword")]
#[command(about = "Move, select and delete by sub-word boundaries")]
#[command(version)]
struct Args {
    /// Marked-up document to read (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Log more to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Steps to apply in order: move-right, move-left, select-right,
    /// select-left, delete, backspace, undo, redo
    #[arg(required = true, value_name = "COMMAND")]
    steps: Vec<Step>,
}

/// One step on the command line: a command, or a trip through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Run(Command),
    Undo,
    Redo,
}

impl FromStr for Step {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            _ => s.parse().map(Self::Run),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run(cmd) => f.write_str(cmd.name()),
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

// ─── Running ────────────────────────────────────────────────────────────────

/// Apply `steps` to the marked-up document and return the result as markup.
fn run(marked: &str, steps: &[Step]) -> Result<String> {
    let mut editor = Editor::from_markup(marked).context("invalid input markup")?;

    for step in steps {
        match step {
            Step::Run(cmd) => editor
                .execute(*cmd)
                .with_context(|| format!("`{step}` failed"))?,
            Step::Undo => {
                if !editor.undo().context("`undo` failed")? {
                    debug!("undo had no effect");
                }
            }
            Step::Redo => {
                if !editor.redo().context("`redo` failed")? {
                    debug!("redo had no effect");
                }
            }
        }
    }

    Ok(editor.to_markup())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    Ok(text)
}

fn setup_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn try_main(args: &Args) -> Result<()> {
    let marked = read_input(args.input.as_deref())?;
    debug!(steps = args.steps.len(), bytes = marked.len(), "input read");

    let output = run(&marked, &args.steps)?;
    io::stdout()
        .write_all(output.as_bytes())
        .context("failed to write stdout")?;
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("subword: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
