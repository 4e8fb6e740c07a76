//! Process runner: spawn one external tool and await its exit.
//!
//! RunRequest -> Runner::run -> Ok(()) | TeaseError::{ProcessExit, ProcessSignal, Spawn}
//! The child inherits stdin/stdout/stderr; nothing is buffered or intercepted.
//!
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::error::TeaseError;
use crate::utils::output::{Color, color};
use crate::{log_debug, log_info};

/// One spawn of one external executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Display name used in log lines and error messages.
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl RunRequest {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<PathBuf>,
        args: Vec<String>,
        cwd: impl AsRef<Path>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Shell-quoted command line, for display only.
    pub fn command_line(&self) -> String {
        let program = self.program.to_string_lossy();
        shell_words::join(
            std::iter::once(program.as_ref()).chain(self.args.iter().map(String::as_str)),
        )
    }
}

impl fmt::Display for RunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.command_line())
    }
}

/// Something that can carry out a `RunRequest`.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn run(&self, request: RunRequest) -> Result<(), TeaseError>;
}

/// Runs requests as real OS child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

#[async_trait]
impl Runner for ProcessRunner {
    async fn run(&self, request: RunRequest) -> Result<(), TeaseError> {
        log_info!("{} {request}", color(Color::Cyan, "Starting"));
        log_debug!("cwd={}", request.cwd.display());

        let status = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| TeaseError::Spawn {
                name: request.name.clone(),
                program: request.program.to_string_lossy().into_owned(),
                source,
            })?;

        log_debug!("{} finished: {status}", request.name);
        check_status(&request.name, status)
    }
}

/// Map an exit status to the runner's result.
pub fn check_status(name: &str, status: ExitStatus) -> Result<(), TeaseError> {
    if status.success() {
        return Ok(());
    }
    if let Some(code) = status.code() {
        return Err(TeaseError::ProcessExit {
            name: name.to_string(),
            code,
        });
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(number) = status.signal() {
            return Err(TeaseError::ProcessSignal {
                name: name.to_string(),
                signal: signal_name(number),
                number,
            });
        }
    }
    Err(TeaseError::ProcessExit {
        name: name.to_string(),
        code: 1,
    })
}

/// Conventional name for a signal number. Only numbers that agree across
/// Linux and the BSDs are named.
pub fn signal_name(number: i32) -> String {
    let name = match number {
        1 => "SIGHUP",
        2 => "SIGINT",
        3 => "SIGQUIT",
        4 => "SIGILL",
        5 => "SIGTRAP",
        6 => "SIGABRT",
        8 => "SIGFPE",
        9 => "SIGKILL",
        11 => "SIGSEGV",
        13 => "SIGPIPE",
        14 => "SIGALRM",
        15 => "SIGTERM",
        n => return format!("signal {n}"),
    };
    name.to_string()
}

/// Runner double that records every request instead of spawning.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: Mutex<Vec<RunRequest>>,
        fail: Option<(String, i32)>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every request named `name` fail with exit `code`.
        pub fn failing(name: &str, code: i32) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: Some((name.to_string(), code)),
            }
        }

        pub fn calls(&self) -> Vec<RunRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn names(&self) -> Vec<String> {
            self.calls().into_iter().map(|r| r.name).collect()
        }
    }

    #[async_trait]
    impl Runner for RecordingRunner {
        async fn run(&self, request: RunRequest) -> Result<(), TeaseError> {
            let name = request.name.clone();
            self.calls.lock().unwrap().push(request);
            match &self.fail {
                Some((target, code)) if *target == name => {
                    Err(TeaseError::ProcessExit { name, code: *code })
                }
                _ => Ok(()),
            }
        }
    }
}
