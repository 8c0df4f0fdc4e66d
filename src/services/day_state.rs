use serde::Serialize;

/// Where a calendar date sits relative to "today".
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Past,
    Today,
    Future,
}

impl DayState {
    /// Works for `NaiveDate`s and for fixed-width `YYYY-MM-DD` keys alike,
    /// since both order the same way.
    pub fn classify<T: Ord + ?Sized>(date: &T, today: &T) -> Self {
        match date.cmp(today) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Today,
            std::cmp::Ordering::Greater => Self::Future,
        }
    }

    /// Adherence may be reported once a day has begun.
    pub fn accepts_writes(self) -> bool {
        !matches!(self, Self::Future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_classify_string_keys() {
        assert_eq!(DayState::classify("2024-01-01", "2024-06-01"), DayState::Past);
        assert_eq!(DayState::classify("2024-06-01", "2024-06-01"), DayState::Today);
        assert_eq!(DayState::classify("2024-06-02", "2024-06-01"), DayState::Future);
        assert_eq!(DayState::classify("2023-12-31", "2024-01-01"), DayState::Past);
    }

    #[test]
    fn test_classify_agrees_with_calendar_order() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        for offset in -400..=400 {
            let date = today + Duration::days(offset);
            let by_date = DayState::classify(&date, &today);
            let key = date.format("%Y-%m-%d").to_string();
            let today_key = today.format("%Y-%m-%d").to_string();
            let by_key = DayState::classify(key.as_str(), today_key.as_str());
            assert_eq!(by_date, by_key, "offset {offset}");
            let expected = match offset {
                o if o < 0 => DayState::Past,
                0 => DayState::Today,
                _ => DayState::Future,
            };
            assert_eq!(by_date, expected, "offset {offset}");
        }
    }

    #[test]
    fn test_only_future_rejects_writes() {
        assert!(DayState::Past.accepts_writes());
        assert!(DayState::Today.accepts_writes());
        assert!(!DayState::Future.accepts_writes());
    }
}
