pub mod backup;
pub mod board;
pub mod catalog;
pub mod filter;
pub mod plan;
pub mod prefs;
pub mod sprint;
pub mod story;
pub mod vision;

use anyhow::bail;
use lifescrum_domain::parse_loose_datetime;

/// Keeps the caller's text once it parses as `YYYY-MM-DD` or RFC 3339.
pub(crate) fn checked_date(value: String) -> anyhow::Result<String> {
    if parse_loose_datetime(&value).is_none() {
        bail!(
            "Invalid date '{}'. Supported formats: YYYY-MM-DD or RFC 3339 (e.g., 2025-01-15T10:30:00Z)",
            value
        );
    }
    Ok(value)
}
