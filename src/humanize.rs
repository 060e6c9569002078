// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relative time phrases such as `3 days ago`.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;

/// Describes `then` relative to `now`.
///
/// Past instants read `... ago`, future ones `... from now`; anything within
/// a second of `now` is `now`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use markscribe::humanize_since;
///
/// let now = Utc::now();
/// assert_eq!(humanize_since(now - Duration::days(3), now), "3 days ago");
/// assert_eq!(humanize_since(now + Duration::hours(1), now), "1 hour from now");
/// ```
pub fn humanize_since(then: DateTime<Utc,>, now: DateTime<Utc,>,) -> String
{
    let delta = now.signed_duration_since(then,).num_seconds();
    let suffix = if delta >= 0 { "ago" } else { "from now" };
    let seconds = delta.unsigned_abs() as i64;

    let (amount, unit) = match seconds {
        0 => return "now".to_owned(),
        s if s < MINUTE => (s, "second"),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year")
    };

    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} {suffix}")
}

/// Parses an RFC 3339 timestamp and describes it relative to `now`.
///
/// Returns `None` when `value` is not a valid timestamp.
pub fn humanize_timestamp(value: &str, now: DateTime<Utc,>,) -> Option<String,>
{
    DateTime::parse_from_rfc3339(value,)
        .ok()
        .map(|then| humanize_since(then.with_timezone(&Utc,), now,),)
}
