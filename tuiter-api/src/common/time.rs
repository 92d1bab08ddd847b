use crate::common::RFC3339_VARIANT;
use anyhow::Result;
use chrono::offset::Utc as UtcOffset;
use chrono::{DateTime, Duration, NaiveDateTime};

pub const SECOND: i64 = 1000;
pub const MINUTE: i64 = SECOND * 60;
pub const HOUR: i64 = MINUTE * 60;
pub const DAY: i64 = HOUR * 24;

pub fn from_str_to_utc(str: &str) -> Result<DateTime<UtcOffset>> {
    Ok(NaiveDateTime::parse_from_str(str, RFC3339_VARIANT)?.and_utc())
}

/// Formats `now + ms` the same way `common::now` does.
pub fn ms_from_now(ms: i64) -> String {
    let dt = UtcOffset::now() + Duration::milliseconds(ms);
    format!("{}", dt.format(RFC3339_VARIANT))
}

pub fn is_expired(expires_at: &str) -> Result<bool> {
    Ok(from_str_to_utc(expires_at)? <= UtcOffset::now())
}
