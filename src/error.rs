//! Error taxonomy shared by the dispatcher, handlers and process runner.
//!
//! Handlers never catch these; they bubble up to `main`, which prints the
//! message and maps the variant to a process exit code (`exit_code`).

use std::path::PathBuf;

use thiserror::Error;

use crate::cmd::command::CommandName;

/// Failure of a single `tease` invocation.
#[derive(Debug, Error)]
pub enum TeaseError {
    /// Requested command is not in the command table.
    #[error("unknown command '{name}' (available: {available})")]
    UnknownCommand { name: String, available: String },

    /// Child exited with a non-zero status code.
    #[error("{name} exited with code {code}")]
    ProcessExit { name: String, code: i32 },

    /// Child was terminated by a signal.
    #[error("{name} was terminated by signal {signal}")]
    ProcessSignal {
        name: String,
        signal: String,
        number: i32,
    },

    /// The OS could not start the child at all.
    #[error("failed to start {name} ({program}): {source}")]
    Spawn {
        name: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Handler-level flag parsing failed (or `--help` was requested).
    #[error(transparent)]
    Usage(#[from] clap::Error),
}

impl TeaseError {
    pub fn unknown_command(name: impl Into<String>) -> Self {
        TeaseError::UnknownCommand {
            name: name.into(),
            available: CommandName::names().join(", "),
        }
    }

    /// Exit code the `tease` process should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TeaseError::ProcessExit { code, .. } if *code != 0 => *code,
            TeaseError::ProcessSignal { number, .. } => 128 + number,
            TeaseError::UnknownCommand { .. } | TeaseError::Config(_) => 2,
            TeaseError::Usage(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Settings file could not be read, parsed or validated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid settings in {}: `{field}` {reason}", .path.display())]
    Invalid {
        path: PathBuf,
        field: String,
        reason: String,
    },
}
