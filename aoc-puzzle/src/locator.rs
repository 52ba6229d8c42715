//! Resolution of the year and day a command operates on
//!
//! Explicit values always win. Otherwise the working directory layout
//! (`2023/day07`) is consulted, and finally the unlock calendar. Resolution
//! never fails; without explicit values the result is a best guess.

use crate::calendar::is_unlocked;
use chrono::{DateTime, Datelike, FixedOffset, Local};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"));

/// Ambient context the locator reads instead of global process state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambient {
    /// Current instant, in the user's own zone
    pub now: DateTime<FixedOffset>,
    /// Name of the working directory
    pub dir_name: Option<String>,
    /// Name of the working directory's parent
    pub parent_name: Option<String>,
}

impl Ambient {
    /// Context with a clock and no directory hints
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now,
            dir_name: None,
            parent_name: None,
        }
    }

    /// Take directory hints from `dir` and its parent
    pub fn with_dir(mut self, dir: &Path) -> Self {
        self.dir_name = file_name(dir);
        self.parent_name = dir.parent().and_then(file_name);
        self
    }

    /// Read the local clock and the process working directory
    pub fn current() -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(Local::now().fixed_offset()).with_dir(&cwd))
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Resolve the event year
///
/// 1. An explicit non-zero year wins; two-digit shorthands get 2000 added.
/// 2. The first 4-digit run in the directory name, then in the parent's name.
/// 3. The current year during December, the previous year otherwise.
pub fn resolve_year(explicit: Option<i32>, ambient: &Ambient) -> i32 {
    if let Some(year) = explicit.filter(|&y| y != 0) {
        let year = if (0..100).contains(&year) {
            year + 2000
        } else {
            year
        };
        debug!(year, "using explicit year");
        return year;
    }

    let hinted = [&ambient.dir_name, &ambient.parent_name]
        .into_iter()
        .flatten()
        .find_map(|name| year_in_name(name));
    if let Some(year) = hinted {
        debug!(year, "using year from directory name");
        return year;
    }

    let now = ambient.now;
    let year = if now.month() == 12 {
        now.year()
    } else {
        now.year() - 1
    };
    debug!(year, "defaulting to latest event year");
    year
}

fn year_in_name(name: &str) -> Option<i32> {
    YEAR_REGEX.find(name)?.as_str().parse().ok()
}

/// Resolve the puzzle day within `year`
///
/// 1. An explicit non-zero day wins, unchecked against the calendar.
/// 2. A directory named `day` plus two characters (any case), e.g. `Day07`.
/// 3. Today's day of month, or the day before when today's puzzle is
///    still locked. The earlier day is not itself checked.
pub fn resolve_day(explicit: Option<i32>, ambient: &Ambient, year: i32) -> i32 {
    if let Some(day) = explicit.filter(|&d| d != 0) {
        debug!(day, "using explicit day");
        return day;
    }

    if let Some(day) = ambient.dir_name.as_deref().and_then(day_in_name) {
        debug!(day, "using day from directory name");
        return day;
    }

    let now = ambient.now;
    let today = now.day() as i32;
    if is_unlocked(year, today, &now) {
        debug!(day = today, "defaulting to today's puzzle");
        today
    } else {
        debug!(day = today - 1, "today's puzzle is locked, using previous day");
        today - 1
    }
}

fn day_in_name(name: &str) -> Option<i32> {
    let lower = name.to_lowercase();
    let digits = lower.strip_prefix("day")?;
    if digits.chars().count() != 2 {
        return None;
    }
    digits.parse().ok()
}

/// Resolve both year and day, year first
pub fn resolve(
    explicit_year: Option<i32>,
    explicit_day: Option<i32>,
    ambient: &Ambient,
) -> (i32, i32) {
    let year = resolve_year(explicit_year, ambient);
    let day = resolve_day(explicit_day, ambient, year);
    (year, day)
}
