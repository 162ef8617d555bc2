//! Date/time utilities for filebox.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Display format used for modification times on every page.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a DateTime<Utc> in the specified timezone.
///
/// Falls back to UTC if the timezone name does not parse.
pub fn format_utc_datetime(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    match timezone.parse::<Tz>() {
        Ok(tz) => dt.with_timezone(&tz).format(format).to_string(),
        Err(_) => dt.format(format).to_string(),
    }
}

/// Format a modification time with [`DISPLAY_FORMAT`].
pub fn format_modified(dt: &DateTime<Utc>, timezone: &str) -> String {
    format_utc_datetime(dt, timezone, DISPLAY_FORMAT)
}

/// Convert a filesystem timestamp to UTC.
pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
