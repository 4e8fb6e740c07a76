/*!
shared.rs - shared helpers for subcommands.

Focus:
  - build_args / build_args!: flatten argument items into one vector
  - filter_paths: keep candidate paths inside configured source directories
  - default glob sets for lint / check / format
  - parse_args: per-command flag parsing via clap
*/

use std::path::{Component, Path, PathBuf};

use clap::Parser;

use super::command::CommandName;
use crate::config::Config;
use crate::error::TeaseError;

/// Extensions the linter and test runner care about.
pub const SOURCE_EXTENSIONS: &str = "{js,jsx,ts,tsx}";
/// Extensions the formatter rewrites inside source directories.
pub const FORMAT_EXTENSIONS: &str = "{js,jsx,ts,tsx,json,md}";
/// Top-level files the formatter covers by default.
pub const TOP_LEVEL_FORMAT_GLOB: &str = "*.{js,json,md,ts,yml,yaml}";

/* ---- Argument Assembly ---- */

/// One item fed to `build_args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgItem {
    Single(String),
    List(Vec<String>),
    Absent,
}

impl From<&str> for ArgItem {
    fn from(s: &str) -> Self {
        ArgItem::from(s.to_string())
    }
}

impl From<String> for ArgItem {
    fn from(s: String) -> Self {
        if s.is_empty() {
            ArgItem::Absent
        } else {
            ArgItem::Single(s)
        }
    }
}

impl From<&String> for ArgItem {
    fn from(s: &String) -> Self {
        ArgItem::from(s.as_str())
    }
}

impl From<Vec<String>> for ArgItem {
    fn from(list: Vec<String>) -> Self {
        ArgItem::List(list)
    }
}

impl From<&[String]> for ArgItem {
    fn from(list: &[String]) -> Self {
        ArgItem::List(list.to_vec())
    }
}

impl From<&Vec<String>> for ArgItem {
    fn from(list: &Vec<String>) -> Self {
        ArgItem::List(list.clone())
    }
}

impl<T: Into<ArgItem>> From<Option<T>> for ArgItem {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(ArgItem::Absent, Into::into)
    }
}

/// `Some(arg)` when `enabled`, otherwise nothing.
pub fn flag(enabled: bool, arg: &str) -> Option<&str> {
    enabled.then_some(arg)
}

/// Flatten items in order: lists are spliced in place, absent items dropped.
pub fn build_args(items: impl IntoIterator<Item = ArgItem>) -> Vec<String> {
    let mut out = Vec::new();
    for item in items {
        match item {
            ArgItem::Single(s) => out.push(s),
            ArgItem::List(list) => out.extend(list),
            ArgItem::Absent => {}
        }
    }
    out
}

/// Variadic form of `build_args`; every argument goes through `ArgItem::from`.
#[macro_export]
macro_rules! build_args {
    ($($item:expr),* $(,)?) => {
        $crate::cmd::shared::build_args([$($crate::cmd::shared::ArgItem::from($item)),*])
    };
}

/* ---- Path Filtering ---- */

/// Recursive glob covering `dir` with the given extension set.
fn glob_under(dir: &str, extensions: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        format!("**/*.{extensions}")
    } else {
        format!("{dir}/**/*.{extensions}")
    }
}

/// One recursive source glob per source directory.
pub fn default_source_globs(config: &Config) -> Vec<String> {
    config
        .src
        .iter()
        .map(|d| glob_under(d, SOURCE_EXTENSIONS))
        .collect()
}

/// Top-level glob followed by one formatter glob per source directory.
pub fn default_format_globs(config: &Config) -> Vec<String> {
    std::iter::once(TOP_LEVEL_FORMAT_GLOB.to_string())
        .chain(config.src.iter().map(|d| glob_under(d, FORMAT_EXTENSIONS)))
        .collect()
}

/// Select the paths a command should operate on.
///
/// - no candidates: the default source globs, whatever `enabled` says
/// - `enabled`: candidates lying inside at least one source directory
/// - otherwise: candidates unchanged
///
/// Relative candidates are resolved against the working directory; the
/// returned strings keep the caller's spelling and order.
pub fn filter_paths(candidates: &[String], enabled: bool, config: &Config) -> Vec<String> {
    if candidates.is_empty() {
        return default_source_globs(config);
    }
    if !enabled {
        return candidates.to_vec();
    }
    let roots: Vec<PathBuf> = config
        .src
        .iter()
        .map(|d| lexical_absolute(&config.cwd, Path::new(d)))
        .collect();
    candidates
        .iter()
        .filter(|c| {
            let resolved = lexical_absolute(&config.cwd, Path::new(c.as_str()));
            roots.iter().any(|root| resolved.starts_with(root))
        })
        .cloned()
        .collect()
}

/// Join `path` onto `base` (unless absolute) and fold `.` / `..` without
/// touching the filesystem.
pub fn lexical_absolute(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/* ---- Flag Parsing ---- */

/// Parse a handler's remaining arguments into its clap struct.
pub fn parse_args<T: Parser>(command: CommandName, args: &[String]) -> Result<T, TeaseError> {
    let bin = format!("tease {command}");
    T::try_parse_from(std::iter::once(bin.as_str()).chain(args.iter().map(String::as_str)))
        .map_err(TeaseError::Usage)
}

/* ---- Tests ---- */
