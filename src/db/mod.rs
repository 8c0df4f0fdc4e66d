//! Persistence seams. `PgStore` backs every trait in production; tests use
//! the in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment, UpcomingFilter};
use crate::models::business::BusinessSettings;
use crate::models::daily_log::{LedgerRow, NutritionLog, WorkoutLog};

mod appointments;
mod business_settings;
mod daily_logs;
#[cfg(test)]
pub mod memory;
mod pool;
mod roster;

pub use pool::{create_pool, PgStore};

#[async_trait]
pub trait BusinessSettingsStore: Send + Sync {
    async fn find_business_settings(
        &self,
        business_user_id: Uuid,
    ) -> anyhow::Result<Option<BusinessSettings>>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Non-cancelled appointments strictly after the filter's local "now".
    async fn count_upcoming(&self, filter: &UpcomingFilter) -> anyhow::Result<i64>;

    async fn find_appointment(&self, id: Uuid) -> anyhow::Result<Option<Appointment>>;

    async fn insert_appointment(&self, new: NewAppointment) -> anyhow::Result<Appointment>;

    async fn reschedule_appointment(
        &self,
        id: Uuid,
        date: &str,
        start_time: &str,
    ) -> anyhow::Result<Option<Appointment>>;

    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> anyhow::Result<Option<Appointment>>;
}

#[async_trait]
pub trait DailyLogStore: Send + Sync {
    /// Replaces the workout facet for `(owner, date)`, creating the row.
    async fn upsert_workout(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        workout: WorkoutLog,
    ) -> anyhow::Result<LedgerRow>;

    /// Replaces the nutrition facet for `(owner, date)`, creating the row.
    async fn upsert_nutrition(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        nutrition: NutritionLog,
    ) -> anyhow::Result<LedgerRow>;

    /// Stored rows in `[start, end]`, ascending by date.
    async fn list_range(
        &self,
        owner_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<LedgerRow>>;
}

#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn is_client_of(&self, business_user_id: Uuid, client_id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait Store:
    BusinessSettingsStore + AppointmentStore + DailyLogStore + RosterStore + Send + Sync
{
    async fn ping(&self) -> anyhow::Result<()>;
}
