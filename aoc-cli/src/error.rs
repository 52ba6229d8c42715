//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Puzzle data error
    #[error("{0}")]
    Puzzle(#[from] aoc_puzzle::PuzzleError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template copy failed
    #[error("Failed to copy template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No session token from any source
    #[error("A session token is required {0}")]
    MissingSession(&'static str),

    /// No answer from argument, file or stdin
    #[error("No answer provided")]
    MissingAnswer,

    /// The submission response matched no known signature
    #[error("Unrecognized response (status {status}): {text}")]
    Unrecognized { status: u16, text: String },
}

/// Config file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not json, yaml, yml or toml
    #[error("Unsupported config file extension: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}
