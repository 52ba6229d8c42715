//! Error types for puzzle resolution and page extraction

use thiserror::Error;

/// Errors produced by the puzzle core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// An expected HTML container is absent from the page
    ///
    /// Usually the page shape changed or the session is not authenticated,
    /// since the site serves a different page to anonymous sessions.
    #[error("No <{container}> element found (is your session token valid?)")]
    NotFound {
        /// CSS selector of the container that was looked for
        container: &'static str,
    },

    /// The description fragment could not be rendered as Markdown
    #[error("Failed to convert HTML to Markdown: {0}")]
    Conversion(String),

    /// Year or day outside the range the site ever published
    #[error("No puzzle exists for year {year} day {day}")]
    OutOfRange {
        /// Requested year
        year: i32,
        /// Requested day
        day: i32,
    },
}
