//! Human-readable dates and numbers in a caller-chosen time zone.

use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";

/// `"Mar 3, 2025 - 5"`, `"Mar 3, 2025 - Apr 5"` or `"Dec 30, 2025 - Jan 2, 2026"`.
pub fn format_date_range<Tz>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let same_year = start.year() == end.year();
    let same_month = same_year && start.month() == end.month();

    let end_fmt = if same_month {
        "%-d"
    } else if same_year {
        "%b %-d"
    } else {
        "%b %-d, %Y"
    };
    format!("{} - {}", start.format("%b %-d, %Y"), end.format(end_fmt))
}

/// `"Mar 3"`
pub fn format_short_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%b %-d").to_string()
}

/// `"2:30 PM"`
pub fn format_time<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%-I:%M %p").to_string()
}

/// `"Monday, March 3, 2025"`
pub fn format_long_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%A, %B %-d, %Y").to_string()
}

/// Value for a `datetime-local` input: `YYYY-MM-DDTHH:mm` in `tz`.
pub fn format_date_time_local<Tz>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format(DATETIME_LOCAL).to_string()
}

/// Reads a `datetime-local` value as wall-clock time in `tz`. Ambiguous times
/// (DST fall-back) resolve to the earlier instant; skipped times are `None`.
pub fn parse_date_time_local<Tz>(value: &str, tz: &Tz) -> Option<DateTime<Utc>>
where
    Tz: TimeZone,
{
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATETIME_LOCAL).ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// ISO string as sent to the API, e.g. `2025-03-03T14:30:00.000Z`.
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `5000` becomes `"5,000"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
