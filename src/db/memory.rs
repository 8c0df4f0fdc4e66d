use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{AppointmentStore, BusinessSettingsStore, DailyLogStore, RosterStore, Store};
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment, UpcomingFilter};
use crate::models::business::BusinessSettings;
use crate::models::daily_log::{LedgerRow, NutritionLog, WorkoutLog};
use crate::services::eligibility::is_upcoming;

/// In-process store for tests. Mirrors the SQL predicates of `PgStore`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    settings: Arc<Mutex<HashMap<Uuid, BusinessSettings>>>,
    appointments: Arc<Mutex<HashMap<Uuid, Appointment>>>,
    logs: Arc<Mutex<BTreeMap<(Uuid, NaiveDate), LedgerRow>>>,
    roster: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
    appointment_reads: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_settings(&self, settings: BusinessSettings) {
        self.settings
            .lock()
            .await
            .insert(settings.business_user_id, settings);
    }

    pub async fn put_appointment(
        &self,
        business_user_id: Uuid,
        customer_id: Uuid,
        date: &str,
        start_time: &str,
        status: AppointmentStatus,
    ) -> Appointment {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            business_user_id,
            customer_id,
            date: date.into(),
            start_time: start_time.into(),
            status,
            created_at: now,
            updated_at: now,
        };
        self.appointments
            .lock()
            .await
            .insert(appointment.id, appointment.clone());
        appointment
    }

    pub async fn link_client(&self, business_user_id: Uuid, client_id: Uuid) {
        self.roster.lock().await.insert((business_user_id, client_id));
    }

    pub async fn put_log(&self, row: LedgerRow) {
        self.logs.lock().await.insert((row.owner_id, row.date), row);
    }

    pub async fn log_snapshot(&self) -> BTreeMap<(Uuid, NaiveDate), LedgerRow> {
        self.logs.lock().await.clone()
    }

    /// Number of appointment-store calls served so far.
    pub fn appointment_reads(&self) -> usize {
        self.appointment_reads.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail like an unreachable database.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl BusinessSettingsStore for MemoryStore {
    async fn find_business_settings(
        &self,
        business_user_id: Uuid,
    ) -> anyhow::Result<Option<BusinessSettings>> {
        self.check_available()?;
        Ok(self.settings.lock().await.get(&business_user_id).cloned())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn count_upcoming(&self, filter: &UpcomingFilter) -> anyhow::Result<i64> {
        self.appointment_reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let count = self
            .appointments
            .lock()
            .await
            .values()
            .filter(|a| a.business_user_id == filter.business_user_id)
            .filter(|a| a.customer_id == filter.customer_id)
            .filter(|a| Some(a.id) != filter.exclude_appointment_id)
            .filter(|a| is_upcoming(a, &filter.today, &filter.now_time))
            .count();
        Ok(count as i64)
    }

    async fn find_appointment(&self, id: Uuid) -> anyhow::Result<Option<Appointment>> {
        self.appointment_reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.appointments.lock().await.get(&id).cloned())
    }

    async fn insert_appointment(&self, new: NewAppointment) -> anyhow::Result<Appointment> {
        self.check_available()?;
        Ok(self
            .put_appointment(
                new.business_user_id,
                new.customer_id,
                &new.date,
                &new.start_time,
                AppointmentStatus::Scheduled,
            )
            .await)
    }

    async fn reschedule_appointment(
        &self,
        id: Uuid,
        date: &str,
        start_time: &str,
    ) -> anyhow::Result<Option<Appointment>> {
        self.check_available()?;
        let mut appointments = self.appointments.lock().await;
        Ok(appointments.get_mut(&id).map(|a| {
            a.date = date.into();
            a.start_time = start_time.into();
            a.updated_at = Utc::now();
            a.clone()
        }))
    }

    async fn set_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> anyhow::Result<Option<Appointment>> {
        self.check_available()?;
        let mut appointments = self.appointments.lock().await;
        Ok(appointments.get_mut(&id).map(|a| {
            a.status = status;
            a.updated_at = Utc::now();
            a.clone()
        }))
    }
}

#[async_trait]
impl DailyLogStore for MemoryStore {
    async fn upsert_workout(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        workout: WorkoutLog,
    ) -> anyhow::Result<LedgerRow> {
        self.check_available()?;
        let mut logs = self.logs.lock().await;
        let row = logs
            .entry((owner_id, date))
            .or_insert_with(|| LedgerRow::empty(owner_id, date));
        row.workout = Some(workout);
        Ok(row.clone())
    }

    async fn upsert_nutrition(
        &self,
        owner_id: Uuid,
        date: NaiveDate,
        nutrition: NutritionLog,
    ) -> anyhow::Result<LedgerRow> {
        self.check_available()?;
        let mut logs = self.logs.lock().await;
        let row = logs
            .entry((owner_id, date))
            .or_insert_with(|| LedgerRow::empty(owner_id, date));
        row.nutrition = Some(nutrition);
        Ok(row.clone())
    }

    async fn list_range(
        &self,
        owner_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<LedgerRow>> {
        self.check_available()?;
        Ok(self
            .logs
            .lock()
            .await
            .range((owner_id, start)..=(owner_id, end))
            .map(|(_, row)| row.clone())
            .collect())
    }
}

#[async_trait]
impl RosterStore for MemoryStore {
    async fn is_client_of(&self, business_user_id: Uuid, client_id: Uuid) -> anyhow::Result<bool> {
        self.check_available()?;
        Ok(self
            .roster
            .lock()
            .await
            .contains(&(business_user_id, client_id)))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.check_available()
    }
}
