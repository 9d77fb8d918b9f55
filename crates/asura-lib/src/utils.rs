use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Parse a release date as sent by the API. Accepts RFC 3339, `YYYY-MM-DD`,
/// `YYYY-MM-DD HH:MM:SS` and `Month D, YYYY`.
pub fn parse_release_date(date: &str) -> Option<DateTime<Utc>> {
    let date = date.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }

    ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Format a millisecond timestamp as e.g. `Jan 15, 2023`
pub fn format_date(timestamp_millis: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_millis) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "Invalid date".to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    format!("{n} {unit}{}", if n > 1 { "s" } else { "" })
}

/// Describe how long ago `date` was relative to `now`, e.g. `2 days ago`.
/// Dates that can't be parsed, or lie more than a year ahead, are `Coming soon`.
pub fn format_relative_time(date: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_release_date(date) else {
        return "Coming soon".to_string();
    };

    if date > now {
        if date.year() - now.year() > 1 {
            return "Coming soon".to_string();
        }

        let days = (date - now).num_seconds() / DAY;
        return match days {
            0 => "Coming today".to_string(),
            1 => "Coming tomorrow".to_string(),
            d if d < 7 => format!("Coming in {d} days"),
            d if d < 30 => format!("Coming in {}", plural(d / 7, "week")),
            d => format!("Coming in {}", plural(d / 30, "month")),
        };
    }

    let seconds = (now - date).num_seconds();
    match seconds {
        s if s < MINUTE => "Just now".to_string(),
        s if s < HOUR => format!("{} ago", plural(s / MINUTE, "minute")),
        s if s < DAY => format!("{} ago", plural(s / HOUR, "hour")),
        s if s < WEEK => format!("{} ago", plural(s / DAY, "day")),
        s if s < MONTH => format!("{} ago", plural(s / WEEK, "week")),
        s if s < YEAR => format!("{} ago", plural(s / MONTH, "month")),
        s => format!("{} ago", plural(s / YEAR, "year")),
    }
}
