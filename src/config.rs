//! Project settings: discovery, parsing and validation.
//!
//! Discovery walks from a start directory up to the filesystem root. In each
//! directory the dedicated files (`SETTINGS_FILES`, in order) are tried first,
//! then `package.json` is consulted for a `"tease"` block. The directory of the
//! first hit becomes the working directory of every spawned tool. When nothing
//! is found the defaults apply and the start directory is used.
//!
//! Example `tease.yaml`:
//!
//! ```yaml
//! src: [src, scripts]
//! dist: [dist]
//! project: [tsconfig.json, tsconfig.cjs.json]
//! tools:
//!   linter: ./node_modules/.bin/eslint
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::toolchain::Tool;
use crate::{log_debug, log_trace};

pub const DEFAULT_SRC: &str = "src";
pub const DEFAULT_DIST: &str = "dist";
pub const DEFAULT_PROJECT: &str = "tsconfig.json";
pub const DEFAULT_BIN_DIR: &str = "node_modules/.bin";

/// Dedicated settings files, in lookup order.
pub const SETTINGS_FILES: &[&str] = &["tease.yaml", "tease.yml", "tease.json", ".tease.json"];
pub const MANIFEST_FILE: &str = "package.json";
pub const MANIFEST_KEY: &str = "tease";

/// Settings block as written by the user. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    src: Option<Vec<String>>,
    dist: Option<Vec<String>>,
    project: Option<Vec<String>>,
    bin_dir: Option<String>,
    #[serde(default)]
    tools: BTreeMap<String, String>,
}

/// Resolved, validated settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute directory every tool is spawned in.
    pub cwd: PathBuf,
    /// Source directories, relative to `cwd`, in configured order.
    pub src: Vec<String>,
    /// Distributable output directories.
    pub dist: Vec<String>,
    /// Build descriptor files, compiled in this order.
    pub project: Vec<String>,
    /// Directory searched first for tool executables.
    pub bin_dir: String,
    /// Per-tool executable overrides.
    pub tools: BTreeMap<Tool, String>,
    /// Settings file the values came from (`None` when defaults were used).
    pub source: Option<PathBuf>,
}

impl Config {
    /// Default settings rooted at `cwd`.
    pub fn defaults(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            src: vec![DEFAULT_SRC.to_string()],
            dist: vec![DEFAULT_DIST.to_string()],
            project: vec![DEFAULT_PROJECT.to_string()],
            bin_dir: DEFAULT_BIN_DIR.to_string(),
            tools: BTreeMap::new(),
            source: None,
        }
    }

    /// Discover settings starting at `start` and walking upwards.
    pub fn resolve(start: &Path) -> Result<Self, ConfigError> {
        let start = absolute(start)?;
        let mut dir = Some(start.as_path());
        while let Some(current) = dir {
            if let Some(config) = Self::load_dir(current)? {
                return Ok(config);
            }
            dir = current.parent();
        }
        log_debug!(
            "no settings file found above {}; using defaults",
            start.display()
        );
        Ok(Self::defaults(start))
    }

    /// Load an explicitly named settings file. A `package.json` without a
    /// `"tease"` block yields defaults rooted at its directory.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let path = absolute(path)?;
        let text = read(&path)?;
        let raw = parse_settings(&path, &text)?.unwrap_or_default();
        raw.validate(path)
    }

    fn load_dir(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let candidates = SETTINGS_FILES
            .iter()
            .copied()
            .chain(std::iter::once(MANIFEST_FILE));
        for name in candidates {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            log_trace!("checking {}", path.display());
            let text = read(&path)?;
            if let Some(raw) = parse_settings(&path, &text)? {
                log_debug!("using settings from {}", path.display());
                return raw.validate(path).map(Some);
            }
        }
        Ok(None)
    }
}

impl RawSettings {
    fn validate(self, path: PathBuf) -> Result<Config, ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::Invalid {
            path: path.clone(),
            field: field.to_string(),
            reason: reason.to_string(),
        };

        let cwd = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| invalid("path", "has no parent directory"))?;
        let mut config = Config::defaults(cwd);

        for (field, value, target) in [
            ("src", self.src, &mut config.src),
            ("dist", self.dist, &mut config.dist),
            ("project", self.project, &mut config.project),
        ] {
            let Some(list) = value else { continue };
            if list.is_empty() {
                return Err(invalid(field, "must list at least one path"));
            }
            if list.iter().any(|p| p.trim().is_empty()) {
                return Err(invalid(field, "must not contain empty paths"));
            }
            *target = list;
        }

        if config.src.iter().any(|p| Path::new(p).is_absolute()) {
            return Err(invalid(
                "src",
                "must be relative to the settings file directory",
            ));
        }

        if let Some(bin_dir) = self.bin_dir {
            if bin_dir.trim().is_empty() {
                return Err(invalid("bin_dir", "must not be empty"));
            }
            config.bin_dir = bin_dir;
        }

        for (key, program) in self.tools {
            let tool = Tool::from_key(&key).ok_or_else(|| {
                let known: Vec<String> = Tool::variants().iter().map(Tool::to_string).collect();
                invalid(
                    &format!("tools.{key}"),
                    &format!("is not a known tool (expected one of: {})", known.join(", ")),
                )
            })?;
            if program.trim().is_empty() {
                return Err(invalid(&format!("tools.{key}"), "must not be empty"));
            }
            config.tools.insert(tool, program);
        }

        config.source = Some(path);
        Ok(config)
    }
}

/// Parse a settings file. `Ok(None)` means the file exists but carries no
/// settings block (a `package.json` without a `"tease"` key).
fn parse_settings(path: &Path, text: &str) -> Result<Option<RawSettings>, ConfigError> {
    let parse_err = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if file_name == MANIFEST_FILE {
        let manifest: serde_json::Value =
            serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))?;
        return match manifest.get(MANIFEST_KEY) {
            None => Ok(None),
            Some(block) => serde_json::from_value(block.clone())
                .map(Some)
                .map_err(|e| parse_err(format!("`{MANIFEST_KEY}` block: {e}"))),
        };
    }

    if text.trim().is_empty() {
        return Ok(Some(RawSettings::default()));
    }

    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str(text)
            .map(Some)
            .map_err(|e| parse_err(e.to_string()))
    } else {
        serde_json::from_str(text)
            .map(Some)
            .map_err(|e| parse_err(e.to_string()))
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_when_fields_missing() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "tease.yaml", "src: [lib]\n");
        let config = Config::resolve(tmp.path()).unwrap();
        assert_eq!(config.cwd, std::path::absolute(tmp.path()).unwrap());
        assert_eq!(config.src, vec!["lib"]);
        assert_eq!(config.dist, vec![DEFAULT_DIST]);
        assert_eq!(config.project, vec![DEFAULT_PROJECT]);
        assert_eq!(config.bin_dir, DEFAULT_BIN_DIR);
        assert!(config.source.is_some());
    }

    #[test]
    fn empty_settings_file_is_all_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "tease.yml", "");
        let config = Config::resolve(tmp.path()).unwrap();
        assert_eq!(config.src, vec![DEFAULT_SRC]);
    }

    #[test]
    fn discovery_walks_up_and_sets_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "tease.json",
            r#"{ "src": ["src", "tools"], "project": ["tsconfig.a.json", "tsconfig.b.json"] }"#,
        );
        let nested = tmp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::resolve(&nested).unwrap();
        assert_eq!(config.cwd, std::path::absolute(tmp.path()).unwrap());
        assert_eq!(config.src, vec!["src", "tools"]);
        assert_eq!(config.project, vec!["tsconfig.a.json", "tsconfig.b.json"]);
    }

    #[test]
    fn package_json_block_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "package.json",
            r#"{ "name": "demo", "tease": { "dist": ["build", "types"] } }"#,
        );
        let config = Config::resolve(tmp.path()).unwrap();
        assert_eq!(config.dist, vec!["build", "types"]);
        assert_eq!(
            config.source.as_deref(),
            Some(std::path::absolute(tmp.path().join("package.json")).unwrap().as_path())
        );
    }

    #[test]
    fn package_json_without_block_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "tease.yaml", "src: [outer]\n");
        let inner = tmp.path().join("pkg");
        std::fs::create_dir_all(&inner).unwrap();
        write(&inner, "package.json", r#"{ "name": "inner" }"#);

        let config = Config::resolve(&inner).unwrap();
        assert_eq!(config.src, vec!["outer"]);
        assert_eq!(config.cwd, std::path::absolute(tmp.path()).unwrap());
    }

    #[test]
    fn dedicated_file_wins_over_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "package.json", r#"{ "tease": { "src": ["manifest"] } }"#);
        write(tmp.path(), "tease.yaml", "src: [dedicated]\n");
        let config = Config::resolve(tmp.path()).unwrap();
        assert_eq!(config.src, vec!["dedicated"]);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "tease.yaml", "sources: [src]\n");
        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn wrong_type_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "tease.json", r#"{ "src": "src" }"#);
        assert!(matches!(
            Config::load_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn empty_list_is_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "tease.yaml", "project: []\n");
        match Config::load_file(&path) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "project"),
            other => panic!("expected invalid project, got {other:?}"),
        }
    }

    #[test]
    fn absolute_source_dir_is_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "tease.yaml", "src: [/etc]\n");
        assert!(matches!(
            Config::load_file(&path),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn tool_overrides_are_validated() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(
            tmp.path(),
            "tease.yaml",
            "tools:\n  linter: bin/lint\n  compiler: tsgo\n",
        );
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.tools.get(&Tool::Linter).map(String::as_str), Some("bin/lint"));
        assert_eq!(config.tools.get(&Tool::Compiler).map(String::as_str), Some("tsgo"));

        let bad = write(tmp.path(), "tease.yml", "tools:\n  bundler: webpack\n");
        match Config::load_file(&bad) {
            Err(ConfigError::Invalid { field, reason, .. }) => {
                assert_eq!(field, "tools.bundler");
                assert!(reason.contains("linter"));
            }
            other => panic!("expected invalid tool key, got {other:?}"),
        }
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write(tmp.path(), "package.json", "{ not json");
        assert!(matches!(
            Config::load_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
