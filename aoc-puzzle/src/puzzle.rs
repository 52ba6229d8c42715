//! Puzzle identifiers shared by every component

use crate::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// Year of the first event on the site
pub const FIRST_YEAR: i32 = 2015;

/// Last day of every event
pub const LAST_DAY: i32 = 25;

/// Public site root, used for absolute links in converted descriptions
pub const BASE_URL: &str = "https://adventofcode.com";

/// Identifies one puzzle of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleRef {
    /// Event year (2015 or later)
    pub year: i32,
    /// Day of the event (1-25)
    pub day: i32,
}

impl PuzzleRef {
    /// Build a reference, rejecting years before the first event and days outside 1-25
    pub fn new(year: i32, day: i32) -> Result<Self, PuzzleError> {
        if year < FIRST_YEAR || !(1..=LAST_DAY).contains(&day) {
            return Err(PuzzleError::OutOfRange { year, day });
        }
        Ok(Self { year, day })
    }

    /// Path of the puzzle page, e.g. `/2023/day/7`
    pub fn day_path(&self) -> String {
        format!("/{}/day/{}", self.year, self.day)
    }

    /// Path of the personalized input page
    pub fn input_path(&self) -> String {
        format!("{}/input", self.day_path())
    }

    /// Path answers are posted to
    pub fn answer_path(&self) -> String {
        format!("{}/answer", self.day_path())
    }

    /// Name of the folder a puzzle is worked in, e.g. `day07`
    pub fn folder_name(&self) -> String {
        format!("day{:02}", self.day)
    }
}

impl fmt::Display for PuzzleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.day)
    }
}

/// One of the two sequential parts of a puzzle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Level {
    #[default]
    One,
    Two,
}

impl Level {
    /// Parse a level token: exactly `"2"` is level two, anything else is level one
    pub fn from_token(token: &str) -> Self {
        match token {
            "2" => Level::Two,
            _ => Level::One,
        }
    }

    /// Numeric value posted to the site
    pub fn as_u8(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }
}

impl FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::from_token(s))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
