//! Football week numbering
//!
//! Weeks are counted in whole seven-day blocks from a fixed season start
//! (August 1st of the season year) and never drop below 1.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Month of the season start
pub const SEASON_START_MONTH: u32 = 8;

/// Day of month of the season start
pub const SEASON_START_DAY: u32 = 1;

/// Season start date for `year`
pub fn season_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, SEASON_START_DAY)
        .unwrap_or(NaiveDate::MIN)
}

/// Whole weeks elapsed between `season_start` and `today`, floored at 1
pub fn week_number(today: NaiveDate, season_start: NaiveDate) -> u32 {
    let days = (today - season_start).num_days();
    let weeks = days.div_euclid(7);
    weeks.clamp(1, i64::from(u32::MAX)) as u32
}

/// Week of the season `now` falls in, measured on `now`'s local calendar date
pub fn current_week<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    let today = now.date_naive();
    week_number(today, season_start(today.year()))
}

/// The week after [`current_week`], used for upcoming-game queries
pub fn next_week<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    current_week(now).saturating_add(1)
}
