//! # Timestamps
//!
//! Wire timestamps are RFC 3339 strings in UTC.

use chrono::{DateTime, SecondsFormat, Utc};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// RFC 3339 with second precision, e.g. `2024-05-01T09:30:00Z`.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_time_is_utc_seconds() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format_time(time), "2024-05-01T09:30:00Z");
    }
}
