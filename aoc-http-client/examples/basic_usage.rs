//! Basic usage example for the AOC HTTP client
//!
//! Fetches a puzzle statement as Markdown, its examples and the input, then
//! submits a (probably wrong) answer.
//!
//! Note: This example requires a valid AOC session cookie in `AOC_SESSION`.
//! You can get it from your browser's cookies after logging in to adventofcode.com

use aoc_http_client::AocClient;
use aoc_puzzle::{Level, Outcome, PuzzleRef};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = std::env::var("AOC_SESSION").expect("AOC_SESSION environment variable not set");

    let client = AocClient::builder()
        .client_builder(
            reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(30))
                .use_rustls_tls(),
        )
        .build()?;

    let puzzle = PuzzleRef::new(2024, 1)?;

    // The statement and examples do not need a session
    let description = client.get_description(puzzle, None)?;
    let markdown = client.markdown_converter(puzzle.year)?.convert(&description)?;
    println!("{}", markdown.lines().next().unwrap_or_default());

    for (name, example) in client.get_examples(puzzle, None)?.files() {
        println!("{}: {} bytes", name, example.len());
    }

    let input = client.get_input(puzzle, &session)?;
    println!("Input length: {} bytes", input.len());

    let submission = client.submit_answer(puzzle, Level::One, "12345", &session)?;
    match submission.outcome {
        Outcome::Correct => println!("✓ Answer is correct!"),
        Outcome::Wait => match submission.wait_time {
            Some(wait) => println!("⏳ Try again in {}s", wait.as_secs()),
            None => println!("⏳ Submitted too recently"),
        },
        other => println!("✗ {}", other),
    }

    Ok(())
}
