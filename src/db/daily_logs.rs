use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::{DailyLogStore, PgStore};
use crate::models::daily_log::{DailyLogRow, LedgerRow, NutritionLog, WorkoutLog};

#[async_trait]
impl DailyLogStore for PgStore {
    async fn upsert_workout(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        workout: WorkoutLog,
    ) -> anyhow::Result<LedgerRow> {
        let row = sqlx::query_as::<_, DailyLogRow>(
            r#"
            INSERT INTO daily_logs (owner_id, log_date, workout_status, workout_note)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id, log_date) DO UPDATE SET
                workout_status = EXCLUDED.workout_status,
                workout_note = EXCLUDED.workout_note,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(date)
        .bind(workout.status)
        .bind(&workout.client_note)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn upsert_nutrition(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        nutrition: NutritionLog,
    ) -> anyhow::Result<LedgerRow> {
        let row = sqlx::query_as::<_, DailyLogRow>(
            r#"
            INSERT INTO daily_logs (owner_id, log_date, nutrition_status, nutrition_note)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id, log_date) DO UPDATE SET
                nutrition_status = EXCLUDED.nutrition_status,
                nutrition_note = EXCLUDED.nutrition_note,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(date)
        .bind(nutrition.compliance_status)
        .bind(&nutrition.client_note)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn list_range(
        &self,
        owner_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<LedgerRow>> {
        let rows = sqlx::query_as::<_, DailyLogRow>(
            r#"
            SELECT * FROM daily_logs
            WHERE owner_id = $1 AND log_date BETWEEN $2 AND $3
            ORDER BY log_date ASC
            "#,
        )
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(LedgerRow::from).collect())
    }
}
