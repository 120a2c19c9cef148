//! CLI module for the `mathlingua` developer binary
//!
//! ## Commands
//!
//! - `lex <TEXT>` - Print one token per line (`row:col kind text`)
//! - `parse <TEXT>` - Print the debug tree (`--raw`, `--no-operators` limit resolution)
//! - `code <TEXT>` - Print the canonical code of the parsed tree
//!
//! Every command also accepts `--file <PATH>` instead of the positional text.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::version::MATHLINGUA_VERSION;
use commands::ResolveOptions;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Inspect how TexTalk statements lex and resolve
#[derive(Parser, Debug)]
#[command(name = "mathlingua")]
#[command(version = MATHLINGUA_VERSION)]
#[command(about = "Inspect how TexTalk statements lex and resolve", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the statement text comes from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// TexTalk text (quote it for your shell)
    #[arg(value_name = "TEXT", required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,
    /// Read the text from a file instead
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

/// How far to resolve the parsed tree.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Skip relation and operator resolution
    #[arg(long)]
    pub raw: bool,
    /// Resolve `is`/`in`/`:=` but leave operators flat
    #[arg(long = "no-operators", conflicts_with = "raw")]
    pub no_operators: bool,
}

impl From<ResolveArgs> for ResolveOptions {
    fn from(args: ResolveArgs) -> Self {
        ResolveOptions {
            raw: args.raw,
            no_operators: args.no_operators,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream
    Lex {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the debug tree
    Parse {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Print canonical code
    Code {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        resolve: ResolveArgs,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { input } => {
            let source = commands::read_input(input.text, input.file.as_deref())?;
            commands::lex_source(&source)
        }
        Command::Parse { input, resolve } => {
            let source = commands::read_input(input.text, input.file.as_deref())?;
            commands::parse_source(&source, resolve.into())
        }
        Command::Code { input, resolve } => {
            let source = commands::read_input(input.text, input.file.as_deref())?;
            commands::code_source(&source, resolve.into())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
