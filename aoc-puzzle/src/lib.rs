//! Advent of Code puzzle core
//!
//! The decision logic of the `aocli` client, free of any network or file I/O:
//!
//! - [`calendar`]: when a puzzle unlocks (midnight, UTC-05:00)
//! - [`locator`]: which year and day a command means, from explicit values,
//!   the working directory and the clock
//! - [`extract`]: the description, input and examples of fetched pages
//! - [`markdown`]: the description as a Markdown document
//! - [`submission`]: what the site said about a submitted answer
//!
//! # Example
//!
//! ```
//! use aoc_puzzle::{Ambient, Outcome, classify, extract_examples, resolve};
//! use chrono::DateTime;
//!
//! let now = DateTime::parse_from_rfc3339("2023-12-07T08:00:00-05:00").unwrap();
//! let ambient = Ambient::new(now);
//! assert_eq!(resolve(None, None, &ambient), (2023, 7));
//!
//! let page = "<article><p>For example:</p><pre><code>1,2,3</code></pre></article>";
//! assert_eq!(extract_examples(page).into_vec(), vec!["1,2,3".to_string()]);
//!
//! let response = "<main><article><p>That's the right answer!</p></article></main>";
//! assert_eq!(classify(response, 200), Outcome::Correct);
//! ```

pub mod calendar;
mod error;
pub mod extract;
pub mod locator;
pub mod markdown;
mod puzzle;
pub mod submission;

pub use calendar::{UNLOCK_ZONE, is_unlocked, unlock_time};
pub use error::PuzzleError;
pub use extract::{ExampleSet, extract_description, extract_examples, extract_input};
pub use locator::{Ambient, resolve, resolve_day, resolve_year};
pub use markdown::{HtmlFragment, MarkdownConverter};
pub use puzzle::{BASE_URL, FIRST_YEAR, LAST_DAY, Level, PuzzleRef};
pub use submission::{Outcome, classify, classify_text, response_text, wait_time};
