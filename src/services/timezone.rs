//! Business-local and viewer-local wall-clock conversion.
//!
//! Every function here is total: an unknown or empty zone name degrades to
//! UTC instead of failing, because zone names come from free-text settings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// A UTC instant rendered as local wall-clock strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStamp {
    /// Zero-padded `YYYY-MM-DD`.
    pub date: String,
    /// Zero-padded 24h `HH:MM`.
    pub time: String,
}

/// Resolves an IANA zone name, falling back to UTC.
pub fn resolve_zone(name: &str) -> Tz {
    match name.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::debug!(zone = %name, "Unknown timezone, falling back to UTC");
            Tz::UTC
        }
    }
}

/// Renders `instant` as wall-clock strings in `zone`.
///
/// Keys are fixed-width for local years 0000 through 9999. Outside that
/// range chrono prints a signed, wider year (`+10000-01-01`).
pub fn normalize(instant: DateTime<Utc>, zone: &str) -> LocalStamp {
    let local = instant.with_timezone(&resolve_zone(zone));
    LocalStamp {
        date: local.format(DATE_KEY_FORMAT).to_string(),
        time: local.format(TIME_OF_DAY_FORMAT).to_string(),
    }
}

/// Local calendar date of `instant` in `zone`.
pub fn local_date(instant: DateTime<Utc>, zone: &str) -> NaiveDate {
    instant.with_timezone(&resolve_zone(zone)).date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a strict, zero-padded `YYYY-MM-DD` key.
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, DATE_KEY_FORMAT).ok()?;
    // chrono accepts unpadded fields; the key must round-trip exactly
    (date_key(date) == raw).then_some(date)
}

/// Parses a strict, zero-padded 24h `HH:MM` string.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let time = NaiveTime::parse_from_str(raw, TIME_OF_DAY_FORMAT).ok()?;
    (time.format(TIME_OF_DAY_FORMAT).to_string() == raw).then_some(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn is_date_key(s: &str) -> bool {
        s.len() == 10
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            })
    }

    fn is_time_of_day(s: &str) -> bool {
        s.len() == 5
            && s.bytes().enumerate().all(|(i, b)| match i {
                2 => b == b':',
                _ => b.is_ascii_digit(),
            })
    }

    #[test]
    fn test_normalize_new_york_evening_is_previous_day() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 2, 1, 30, 0).unwrap();
        let stamp = normalize(instant, "America/New_York");
        assert_eq!(stamp.date, "2024-06-01");
        assert_eq!(stamp.time, "21:30");
    }

    #[test]
    fn test_normalize_zero_pads() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 3, 7, 0).unwrap();
        let stamp = normalize(instant, "UTC");
        assert_eq!(stamp.date, "2024-01-05");
        assert_eq!(stamp.time, "03:07");
    }

    #[test]
    fn test_normalize_far_east_rolls_forward() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
        let stamp = normalize(instant, "Pacific/Kiritimati");
        assert_eq!(stamp.date, "2025-01-01");
        assert_eq!(stamp.time, "10:00");
    }

    #[test]
    fn test_malformed_zone_matches_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
        let utc = normalize(instant, "UTC");
        for zone in ["", "   ", "Mars/Olympus", "not a zone", "America/", "+25:00"] {
            assert_eq!(normalize(instant, zone), utc, "zone {zone:?}");
        }
    }

    #[test]
    fn test_normalize_output_shape_across_zones() {
        let instants = [
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 11, 3, 5, 59, 0).unwrap(),
        ];
        for zone in ["UTC", "Asia/Kolkata", "Australia/Lord_Howe", "America/St_Johns"] {
            for instant in instants {
                let stamp = normalize(instant, zone);
                assert!(is_date_key(&stamp.date), "{zone}: {}", stamp.date);
                assert!(is_time_of_day(&stamp.time), "{zone}: {}", stamp.time);
            }
        }
    }

    #[test]
    fn test_normalize_fixed_width_up_to_year_9999() {
        let last = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 0).unwrap();
        let stamp = normalize(last, "UTC");
        assert_eq!(stamp.date, "9999-12-31");
        assert!(is_date_key(&stamp.date));

        let beyond = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(!is_date_key(&normalize(beyond, "UTC").date));
    }

    #[test]
    fn test_local_date_agrees_with_normalize() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 2, 1, 30, 0).unwrap();
        let date = local_date(instant, "America/Los_Angeles");
        assert_eq!(date_key(date), normalize(instant, "America/Los_Angeles").date);
    }

    #[test]
    fn test_parse_date_key_is_strict() {
        assert_eq!(
            parse_date_key("2024-06-01"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(parse_date_key("2024-6-1"), None);
        assert_eq!(parse_date_key("2024-02-30"), None);
        assert_eq!(parse_date_key("06/01/2024"), None);
    }

    #[test]
    fn test_parse_time_of_day_is_strict() {
        assert!(parse_time_of_day("09:05").is_some());
        assert!(parse_time_of_day("23:59").is_some());
        assert!(parse_time_of_day("9:05").is_none());
        assert!(parse_time_of_day("24:00").is_none());
        assert!(parse_time_of_day("09:05:00").is_none());
    }
}
