use async_trait::async_trait;
use uuid::Uuid;

use super::{AppointmentStore, PgStore};
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment, UpcomingFilter};

#[async_trait]
impl AppointmentStore for PgStore {
    async fn count_upcoming(&self, filter: &UpcomingFilter) -> anyhow::Result<i64> {
        // date/start_time are fixed-width local strings, so text comparison
        // is chronological comparison.
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM appointments
            WHERE business_user_id = $1
              AND customer_id = $2
              AND status NOT IN ('CANCELLED', 'CANCELED', 'NO_SHOW')
              AND (date > $3 OR (date = $3 AND start_time > $4))
              AND ($5::uuid IS NULL OR id <> $5)
            "#,
        )
        .bind(filter.business_user_id)
        .bind(filter.customer_id)
        .bind(&filter.today)
        .bind(&filter.now_time)
        .bind(filter.exclude_appointment_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    async fn find_appointment(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        let appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(appointment)
    }

    async fn insert_appointment(&self, new: NewAppointment) -> anyhow::Result<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (id, business_user_id, customer_id, date, start_time, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.business_user_id)
        .bind(new.customer_id)
        .bind(&new.date)
        .bind(&new.start_time)
        .bind(AppointmentStatus::Scheduled)
        .fetch_one(&self.db)
        .await?;

        Ok(appointment)
    }

    async fn reschedule_appointment(
        &self,
        id: Uuid,
        date: &str,
        start_time: &str,
    ) -> anyhow::Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET date = $2, start_time = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(date)
        .bind(start_time)
        .fetch_optional(&self.db)
        .await?;

        Ok(appointment)
    }

    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> anyhow::Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.db)
        .await?;

        Ok(appointment)
    }
}
