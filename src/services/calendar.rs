//! Week and month calendar views over the compliance ledger.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DailyLogStore;
use crate::error::AppError;
use crate::models::daily_log::{LedgerRow, NutritionLog, WorkoutLog};
use crate::services::day_state::DayState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(Self::Sunday),
            "monday" => Ok(Self::Monday),
            other => Err(format!("unknown week start: {other}")),
        }
    }
}

/// Inclusive `[start, end]` interval of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The seven days containing `anchor`, starting on `week_start`.
pub fn week_window(anchor: NaiveDate, week_start: WeekStart) -> DateWindow {
    let offset = match week_start {
        WeekStart::Monday => anchor.weekday().num_days_from_monday(),
        WeekStart::Sunday => anchor.weekday().num_days_from_sunday(),
    };
    let start = anchor - Duration::days(i64::from(offset));
    DateWindow {
        start,
        end: start + Duration::days(6),
    }
}

/// First through last day of `anchor`'s month.
pub fn month_window(anchor: NaiveDate) -> DateWindow {
    let start = anchor - Duration::days(i64::from(anchor.day0()));
    let (year, month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    let next_month = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start);
    DateWindow {
        start,
        end: next_month - Duration::days(1),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub day_state: DayState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout: Option<WorkoutLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionLog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RangeView {
    pub days: Vec<DayEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("range of {days} days exceeds the maximum of {max}")]
    TooLong { days: i64, max: i64 },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<RangeError> for AppError {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::Store(e) => AppError::Internal(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

/// One entry per date in `window`, merged with whatever ledger rows exist.
///
/// Dates without a row come back with no workout/nutrition so the view can
/// draw its planned placeholder. Rows are returned as stored, whatever their
/// `day_state`; views draw future dates as placeholders regardless.
pub async fn build_range<S: DailyLogStore + ?Sized>(
    store: &S,
    owner_id: Uuid,
    window: DateWindow,
    today: NaiveDate,
    max_days: i64,
) -> Result<RangeView, RangeError> {
    if window.start > window.end {
        return Err(RangeError::Inverted {
            start: window.start,
            end: window.end,
        });
    }
    let days = window.len_days();
    if days > max_days {
        return Err(RangeError::TooLong {
            days,
            max: max_days,
        });
    }

    let mut rows: HashMap<NaiveDate, LedgerRow> = store
        .list_range(owner_id, window.start, window.end)
        .await?
        .into_iter()
        .map(|row| (row.date, row))
        .collect();

    let mut entries = Vec::with_capacity(days as usize);
    let mut date = window.start;
    while date <= window.end {
        let row = rows.remove(&date);
        entries.push(DayEntry {
            date,
            day_state: DayState::classify(&date, &today),
            flagged: row.as_ref().map(|r| r.flagged),
            workout: row.as_ref().and_then(|r| r.workout.clone()),
            nutrition: row.and_then(|r| r.nutrition),
        });
        date += Duration::days(1);
    }

    Ok(RangeView { days: entries })
}
