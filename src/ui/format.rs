// Display formatting for file rows: human sizes, relative times, and the
// full timestamp shown alongside the relative one.

use chrono::{Local, TimeZone};

/// Format a byte count as "x.y B/KB/MB/GB"
pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut i = 0;
    while size >= 1024.0 && i < UNITS.len() - 1 {
        size /= 1024.0;
        i += 1;
    }

    format!("{:.1} {}", size, UNITS[i])
}

/// Format a unix timestamp relative to `now` ("5 minutes ago"). Future
/// timestamps render as "just now".
pub fn relative_time(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < 0 {
        return "just now".to_string();
    }

    if diff < 60 {
        return plural(diff, "second");
    }

    let minutes = diff / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = diff / 3600;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = diff / 86400;
    if days < 7 {
        return plural(days, "day");
    }

    let weeks = days / 7;
    if weeks < 4 {
        return plural(weeks, "week");
    }

    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }

    plural(days / 365, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Full local date/time, e.g. "Mar 7, 2026, 14:05"
pub fn full_date_time(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%b %-d, %Y, %H:%M").to_string(),
        None => "-".to_string(),
    }
}
