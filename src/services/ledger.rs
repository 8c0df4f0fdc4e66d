//! Daily compliance ledger writes, gated by the day-state of the target date.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::DailyLogStore;
use crate::error::AppError;
use crate::models::daily_log::{LedgerRow, NutritionLog, NutritionStatus, WorkoutLog, WorkoutStatus};
use crate::services::day_state::DayState;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("adherence cannot be reported for future date {date}")]
    FutureDate { date: NaiveDate },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::FutureDate { date } => AppError::FutureDateWrite { date },
            LedgerError::Store(e) => AppError::Internal(e),
        }
    }
}

fn ensure_writable(date: NaiveDate, today: NaiveDate) -> Result<(), LedgerError> {
    if DayState::classify(&date, &today).accepts_writes() {
        Ok(())
    } else {
        tracing::info!(%date, %today, "Rejected adherence write for a future date");
        Err(LedgerError::FutureDate { date })
    }
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Records the workout outcome for `date`. `today` is the owner's own local
/// date; writes to dates after it are rejected.
pub async fn upsert_workout_log<S: DailyLogStore + ?Sized>(
    store: &S,
    owner_id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
    status: WorkoutStatus,
    client_note: Option<String>,
) -> Result<LedgerRow, LedgerError> {
    ensure_writable(date, today)?;

    let workout = WorkoutLog {
        status,
        client_note: clean_note(client_note),
    };
    let row = store.upsert_workout(owner_id, date, workout).await?;

    tracing::debug!(%owner_id, %date, ?status, "Workout log upserted");
    Ok(row)
}

/// Records nutrition compliance for `date`, with the same date gate as
/// [`upsert_workout_log`].
pub async fn upsert_nutrition_log<S: DailyLogStore + ?Sized>(
    store: &S,
    owner_id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
    compliance_status: NutritionStatus,
    client_note: Option<String>,
) -> Result<LedgerRow, LedgerError> {
    ensure_writable(date, today)?;

    let nutrition = NutritionLog {
        compliance_status,
        client_note: clean_note(client_note),
    };
    let row = store.upsert_nutrition(owner_id, date, nutrition).await?;

    tracing::debug!(%owner_id, %date, ?compliance_status, "Nutrition log upserted");
    Ok(row)
}
