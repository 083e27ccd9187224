//! Timestamp resolution for listing items.
//!
//! Pages carry either a machine-readable `datetime` attribute or a visible
//! relative phrase like "3 hours ago"; both end up here.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Matches "<n> <unit> ago" with singular or plural units. Also serves as
/// the gate in the item extractor when scanning visible text.
pub static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+)\s+(second|minute|hour|day|week|month|year)s?\s+ago\b").unwrap()
});

/// Formats seen in `datetime` attributes that are not valid RFC 3339.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse an unambiguous machine-readable date/time string, `None` if it is
/// unparsable. Callers treat `None` as field absence, never as an error.
pub fn parse_absolute(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Parse a relative phrase matching [`RELATIVE_TIME_RE`] as `now - n * unit`.
///
/// Month and year subtraction is calendar-aware: "1 month ago" lands on the
/// same day-of-month in the previous month where possible, clamped to the
/// last day otherwise. Only arithmetic overflow on absurd inputs yields
/// `None`; the regex gate upstream rejects everything else.
pub fn parse_relative(phrase: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let caps = RELATIVE_TIME_RE.captures(phrase)?;
    // u32 keeps every unit inside Duration's representable range
    let amount: u32 = caps[1].parse().ok()?;
    let n = i64::from(amount);

    match caps[2].to_ascii_lowercase().as_str() {
        "second" => now.checked_sub_signed(Duration::seconds(n)),
        "minute" => now.checked_sub_signed(Duration::minutes(n)),
        "hour" => now.checked_sub_signed(Duration::hours(n)),
        "day" => now.checked_sub_signed(Duration::days(n)),
        "week" => now.checked_sub_signed(Duration::weeks(n)),
        "month" => now.checked_sub_months(Months::new(amount)),
        "year" => now.checked_sub_months(Months::new(amount.checked_mul(12)?)),
        _ => None,
    }
}
