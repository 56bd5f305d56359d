//! Festival wall-clock helpers.
//!
//! Every timestamp in the system is pinned to the festival timezone (UTC+9)
//! and carried as a `YYYY-MM-DDTHH:MM` string, the same shape the HTML
//! `datetime-local` input produces. Lexicographic order on that shape matches
//! chronological order, so queries and filters compare the strings directly.

use chrono::{FixedOffset, NaiveDateTime, Utc};

/// Offset of the festival timezone from UTC, in seconds.
pub const FESTIVAL_UTC_OFFSET_SECS: i32 = 9 * 3600;

/// Minute-precision stamp format shared with `datetime-local` form inputs.
pub const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Current festival-local time as a minute-precision stamp.
pub fn now_stamp() -> String {
    let offset =
        FixedOffset::east_opt(FESTIVAL_UTC_OFFSET_SECS).expect("festival offset is in range");
    Utc::now()
        .with_timezone(&offset)
        .format(STAMP_FORMAT)
        .to_string()
}

/// Whether a form-supplied stamp parses as `YYYY-MM-DDTHH:MM`.
pub fn is_valid_stamp(s: &str) -> bool {
    NaiveDateTime::parse_from_str(s, STAMP_FORMAT).is_ok()
}
