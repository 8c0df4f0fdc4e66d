use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "workout_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutStatus {
    Planned,
    Completed,
    Skipped,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "nutrition_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NutritionStatus {
    Followed,
    PartiallyFollowed,
    NotFollowed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutLog {
    pub status: WorkoutStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionLog {
    pub compliance_status: NutritionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_note: Option<String>,
}

/// Flat `daily_logs` table row.
#[derive(Debug, Clone, FromRow)]
pub struct DailyLogRow {
    pub owner_id: Uuid,
    pub log_date: NaiveDate,
    pub workout_status: Option<WorkoutStatus>,
    pub workout_note: Option<String>,
    pub nutrition_status: Option<NutritionStatus>,
    pub nutrition_note: Option<String>,
    pub flagged: bool,
    #[allow(dead_code)]
    pub created_at: DateTime<Utc>,
    #[allow(dead_code)]
    pub updated_at: DateTime<Utc>,
}

/// One owner's adherence record for one local calendar date.
///
/// A facet is `None` until it has been written; an absent workout reads as
/// `PLANNED` and an absent nutrition entry as unset.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LedgerRow {
    pub owner_id: Uuid,
    pub date: NaiveDate,
    pub workout: Option<WorkoutLog>,
    pub nutrition: Option<NutritionLog>,
    pub flagged: bool,
}

#[cfg(test)]
impl LedgerRow {
    pub fn empty(owner_id: Uuid, date: NaiveDate) -> Self {
        Self {
            owner_id,
            date,
            workout: None,
            nutrition: None,
            flagged: false,
        }
    }
}

impl From<DailyLogRow> for LedgerRow {
    fn from(row: DailyLogRow) -> Self {
        Self {
            owner_id: row.owner_id,
            date: row.log_date,
            workout: row.workout_status.map(|status| WorkoutLog {
                status,
                client_note: row.workout_note,
            }),
            nutrition: row.nutrition_status.map(|compliance_status| NutritionLog {
                compliance_status,
                client_note: row.nutrition_note,
            }),
            flagged: row.flagged,
        }
    }
}
