//! A collection of utility functions
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use chrono::DateTime;
use chrono::Timelike;
use chrono::Utc;

/// Largest supported number of sub-second digits.
pub const MAX_TIME_PRECISION: u32 = 9;

/// Converts a `SystemTime` to UTC, dropping sub-second digits beyond
/// `precision` (a negative power of ten, `0` keeps whole seconds).
///
/// Digits are truncated, never rounded, so an unchanged timestamp always
/// renders the same way. Returns `None` for times chrono cannot represent.
pub fn truncate_system_time(time: SystemTime, precision: u32) -> Option<DateTime<Utc>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => (secs.checked_neg()?, 0),
                n => (secs.checked_neg()?.checked_sub(1)?, 1_000_000_000 - n),
            }
        }
    };
    let unit = 10u32.pow(MAX_TIME_PRECISION - precision.min(MAX_TIME_PRECISION));
    DateTime::from_timestamp(secs, nanos - nanos % unit)
}

/// Formats a timestamp as `[%Y-%m-%d %H:%M:%S]` with `precision` sub-second
/// digits. For example "[2025-01-01 00:00:00.123]"
pub fn format_timestamp(time: &DateTime<Utc>, precision: u32) -> String {
    let precision = precision.min(MAX_TIME_PRECISION) as usize;
    let mut ret = time.format("[%Y-%m-%d %H:%M:%S").to_string();
    if precision > 0 {
        let nanos = format!("{:09}", time.nanosecond() % 1_000_000_000);
        ret.push('.');
        ret.push_str(&nanos[..precision]);
    }
    ret.push(']');
    ret
}
