//! External collaborators and where to find them.
//!
//! Every tool is looked up in this order:
//!   1. `tools.<key>` override from the settings file
//!   2. `<cwd>/<bin_dir>/<program>` when that file exists
//!   3. bare `<program>`, left to the OS `PATH` search

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::process::RunRequest;

/// Config file handed to the linter.
pub const LINTER_CONFIG: &str = ".eslintrc.json";
/// Config file handed to the test runner.
pub const TEST_RUNNER_CONFIG: &str = "jest.config.js";
/// Config file handed to the staged-file fixer.
pub const STAGED_CONFIG: &str = ".lintstagedrc.json";
/// Directory holding the git hook scripts.
pub const HOOKS_DIR: &str = ".husky";
/// Extension of the compiler's incremental build cache.
pub const BUILD_CACHE_EXT: &str = "tsbuildinfo";

/// The external tools `tease` knows how to drive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Tool {
    Compiler,
    Linter,
    Formatter,
    TestRunner,
    Staged,
    Cleaner,
    Hooks,
}

impl Tool {
    pub const fn variants() -> &'static [Tool] {
        &[
            Tool::Compiler,
            Tool::Linter,
            Tool::Formatter,
            Tool::TestRunner,
            Tool::Staged,
            Tool::Cleaner,
            Tool::Hooks,
        ]
    }

    /// Key used in the `tools` settings map and in log lines.
    pub fn key(&self) -> &'static str {
        match self {
            Tool::Compiler => "compiler",
            Tool::Linter => "linter",
            Tool::Formatter => "formatter",
            Tool::TestRunner => "test-runner",
            Tool::Staged => "staged",
            Tool::Cleaner => "cleaner",
            Tool::Hooks => "hooks",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Tool::variants().iter().copied().find(|t| t.key() == s.trim())
    }

    /// Executable name used when no override is configured.
    pub fn default_program(&self) -> &'static str {
        match self {
            Tool::Compiler => "tsc",
            Tool::Linter => "eslint",
            Tool::Formatter => "prettier",
            Tool::TestRunner => "jest",
            Tool::Staged => "lint-staged",
            Tool::Cleaner => "rimraf",
            Tool::Hooks => "husky",
        }
    }

    /// Resolve the executable for this tool under `config`.
    pub fn program(&self, config: &Config) -> PathBuf {
        if let Some(custom) = config.tools.get(self) {
            return resolve_override(&config.cwd, custom);
        }
        let local = config
            .cwd
            .join(&config.bin_dir)
            .join(self.default_program());
        if local.is_file() {
            local
        } else {
            PathBuf::from(self.default_program())
        }
    }

    /// Build the run request for invoking this tool with `args`.
    pub fn request(&self, args: Vec<String>, config: &Config) -> RunRequest {
        RunRequest::new(self.key(), self.program(config), args, &config.cwd)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Overrides containing a path separator are taken relative to `cwd`; bare
/// names are left for `PATH` lookup.
fn resolve_override(cwd: &Path, custom: &str) -> PathBuf {
    let path = Path::new(custom);
    if path.is_absolute() || path.components().count() == 1 {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
