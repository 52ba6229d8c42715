//! AOC HTTP Client Library
//!
//! Blocking transport for the Advent of Code website. Requests go out here;
//! every page is interpreted by [`aoc_puzzle`].
//!
//! # Features
//!
//! - Puzzle page, description, examples and input fetching for any year and day
//! - Answer submission with a classified [`Outcome`](aoc_puzzle::Outcome)
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Session cookies marked sensitive and zeroized after use
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::AocClient;
//! use aoc_puzzle::{Level, Outcome, PuzzleRef};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//! let session = "your_session_cookie_here";
//! let puzzle = PuzzleRef::new(2023, 1)?;
//!
//! // Description as Markdown, examples, and the personalized input
//! let markdown = client.get_description(puzzle, Some(session))?.to_markdown(puzzle.year)?;
//! let examples = client.get_examples(puzzle, Some(session))?;
//! let input = client.get_input(puzzle, session)?;
//!
//! // Submit an answer
//! let submission = client.submit_answer(puzzle, Level::One, "142", session)?;
//! match submission.outcome {
//!     Outcome::Correct => println!("Correct!"),
//!     Outcome::Wait => println!("Wait {:?}", submission.wait_time),
//!     other => println!("{}", other),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{AocClient, AocClientBuilder, Submission};
pub use error::AocError;
