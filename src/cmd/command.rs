/*!
Command table: the closed set of `tease` subcommands.

Variants:
  build, pre-commit, format, specs, test, lint, check, install

Helpers:
  - variants() / names()
  - as_str()
  - describe()
  - FromStr (exact match, unknown names -> TeaseError::UnknownCommand)
*/

use std::fmt;
use std::str::FromStr;

use crate::error::TeaseError;

/// Every command `tease` can dispatch to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CommandName {
    Build,
    PreCommit,
    Format,
    Specs,
    Test,
    Lint,
    Check,
    Install,
}

impl CommandName {
    /// Return a static slice of all variants (order matters for help display).
    pub const fn variants() -> &'static [CommandName] {
        &[
            CommandName::Build,
            CommandName::PreCommit,
            CommandName::Format,
            CommandName::Specs,
            CommandName::Test,
            CommandName::Lint,
            CommandName::Check,
            CommandName::Install,
        ]
    }

    pub fn names() -> Vec<&'static str> {
        Self::variants().iter().map(CommandName::as_str).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Build => "build",
            CommandName::PreCommit => "pre-commit",
            CommandName::Format => "format",
            CommandName::Specs => "specs",
            CommandName::Test => "test",
            CommandName::Lint => "lint",
            CommandName::Check => "check",
            CommandName::Install => "install",
        }
    }

    /// One-line summary for help output.
    pub fn describe(&self) -> &'static str {
        match self {
            CommandName::Build => "Clean outputs, then compile every build descriptor",
            CommandName::PreCommit => "Auto-fix staged files",
            CommandName::Format => "Rewrite files with the formatter",
            CommandName::Specs => "Run the test runner with coverage",
            CommandName::Test => "check + specs (CI mode) + build (no clean)",
            CommandName::Lint => "Lint and auto-fix sources",
            CommandName::Check => "Lint and verify formatting without changing files",
            CommandName::Install => "Install git hooks (skipped in CI)",
        }
    }

    /// Formatted command listing used as clap `after_help`.
    pub fn help_listing() -> String {
        let mut out = String::from("Commands:\n");
        for c in Self::variants() {
            out.push_str(&format!("  {:<12}{}\n", c.as_str(), c.describe()));
        }
        out
    }
}

impl FromStr for CommandName {
    type Err = TeaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| TeaseError::unknown_command(s))
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------- Tests ---------------------------------- */
