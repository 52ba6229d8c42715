//! Error types for the AOC HTTP client

use aoc_puzzle::PuzzleError;
use thiserror::Error;

/// Errors that can occur when using the AOC HTTP client
#[derive(Error, Debug)]
pub enum AocError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid HTTP status code received
    ///
    /// A redirect usually means the session cookie was rejected.
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
    },

    /// Failed to decode response as UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// The page was fetched but its content could not be interpreted
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
