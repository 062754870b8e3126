// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stable datetime formats for the durable store.
//!
//! Timestamps are persisted as UTC strings in a fixed format so that
//! lexicographic comparison in SQL equals chronological comparison.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format for UTC timestamps.
pub(crate) const STABLE_FORMAT_UTC: &str = "%Y-%m-%dT%H:%M:%SZ";

/// iCalendar date-time format (RFC 5545 UTC form).
pub(crate) const ICAL_FORMAT_UTC: &str = "%Y%m%dT%H%M%SZ";

pub(crate) fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(STABLE_FORMAT_UTC).to_string()
}

pub(crate) fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|ndt| ndt.and_utc())
}

pub(crate) fn format_ical(dt: &DateTime<Utc>) -> String {
    dt.format(ICAL_FORMAT_UTC).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn stable_format_round_trips() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap();
        let s = format_utc(&dt);
        assert_eq!(s, "2024-06-01T10:30:00Z");
        assert_eq!(parse_utc(&s), Some(dt));
    }

    #[test]
    fn stable_format_orders_lexicographically() {
        let earlier = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();
        assert!(format_utc(&earlier) < format_utc(&later));
    }

    #[test]
    fn ical_format_is_basic_utc_form() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(format_ical(&dt), "20240601T100000Z");
    }
}
