//! Config file discovery, parsing and session resolution

use crate::error::{CliError, ConfigError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Marker every config file name contains, e.g. `.aocli.toml`
const CONFIG_MARKER: &str = ".aocli";

/// Number of ancestors of the working directory searched for a project config
const PROJECT_SEARCH_PARENTS: usize = 2;

/// Environment variable holding the session cookie
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Folder layout `new` creates days in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Structure {
    /// `dayNN` folders next to each other
    #[default]
    SingleYear,
    /// `YYYY/dayNN` folders
    MultiYear,
}

enum Format {
    Json,
    Yaml,
    Toml,
}

/// Settings read from config files
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: Option<String>,
    pub year: Option<i32>,
    pub structure: Option<Structure>,
}

impl Config {
    /// Parse a config file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let format = match extension {
            "json" => Format::Json,
            "yaml" | "yml" => Format::Yaml,
            "toml" => Format::Toml,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Yaml => serde_yaml::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        })
    }

    /// Overlay the set, non-empty fields of `other`
    pub fn merge(&mut self, other: Config) {
        if let Some(session) = other.session.filter(|s| !s.is_empty()) {
            self.session = Some(session);
        }
        if let Some(year) = other.year.filter(|&y| y != 0) {
            self.year = Some(year);
        }
        if let Some(structure) = other.structure {
            self.structure = Some(structure);
        }
    }

    /// Discover and merge config files
    ///
    /// Sources, lowest priority first: the home directory, the working
    /// directory or one of its two parents (nearest wins), then `explicit`.
    /// Unreadable discovered files are skipped with a warning; an explicit
    /// file must parse.
    pub fn discover(
        home: Option<&Path>,
        cwd: &Path,
        explicit: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let discovered = [
            home.and_then(find_in_dir),
            cwd.ancestors()
                .take(PROJECT_SEARCH_PARENTS + 1)
                .find_map(find_in_dir),
        ];
        for path in discovered.into_iter().flatten() {
            match Config::from_file(&path) {
                Ok(found) => {
                    debug!(path = %path.display(), "loaded config file");
                    config.merge(found);
                }
                Err(e) => warn!("ignoring config file: {}", e),
            }
        }

        if let Some(path) = explicit {
            config.merge(Config::from_file(path)?);
            debug!(path = %path.display(), "loaded explicit config file");
        }

        Ok(config)
    }

    pub fn structure(&self) -> Structure {
        self.structure.unwrap_or_default()
    }
}

/// First file (by name) in `dir` whose name contains the config marker
fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| !t.is_dir()))
        .filter(|entry| entry.file_name().to_string_lossy().contains(CONFIG_MARKER))
        .map(|entry| entry.path())
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

/// Pick the session: flag, then environment, then config file
pub fn resolve_session(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
) -> Option<Zeroizing<String>> {
    [flag, env, config.session.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| Zeroizing::new(s.to_string()))
}

/// Prompt user for session token
pub fn prompt_session(reason: &'static str) -> Result<Zeroizing<String>, CliError> {
    eprintln!("A session token is required {}.", reason);
    let s = Zeroizing::new(rpassword::prompt_password("Enter AOC session key: ")?);
    if s.trim().is_empty() {
        return Err(CliError::MissingSession(reason));
    }
    Ok(Zeroizing::new(s.trim().to_string()))
}
