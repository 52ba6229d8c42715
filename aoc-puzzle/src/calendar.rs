//! Unlock schedule of the puzzles
//!
//! Every puzzle is released at midnight in a fixed UTC-05:00 zone. The site
//! does not follow daylight saving, so neither does this module.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone};

/// Zone in which the site releases puzzles
pub const UNLOCK_ZONE: FixedOffset = match FixedOffset::west_opt(5 * 60 * 60) {
    Some(zone) => zone,
    None => panic!("UTC-05:00 is a valid offset"),
};

/// Release moment of `{year}-12-{day}` in the unlock zone
///
/// Days outside the month roll over into the neighbouring months (day 0 is
/// November 30th, day 32 is January 1st of the following year). Returns
/// `None` only when the date leaves the range chrono can represent.
pub fn unlock_time(year: i32, day: i32) -> Option<DateTime<FixedOffset>> {
    let first = NaiveDate::from_ymd_opt(year, 12, 1)?;
    let date = first.checked_add_signed(TimeDelta::days(i64::from(day) - 1))?;
    UNLOCK_ZONE
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
}

/// Whether the puzzle of `year`/`day` is released at instant `now`
///
/// The check is strict: at exactly midnight the puzzle is still locked.
pub fn is_unlocked<Tz: TimeZone>(year: i32, day: i32, now: &DateTime<Tz>) -> bool {
    let now = now.with_timezone(&UNLOCK_ZONE);
    match unlock_time(year, day) {
        Some(release) => now > release,
        None => year < now.year(),
    }
}
