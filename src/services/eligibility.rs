//! "May this customer book another appointment right now?"

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::{AppointmentStore, BusinessSettingsStore};
use crate::models::appointment::{Appointment, UpcomingFilter};
use crate::models::business::BusinessSettings;
use crate::services::timezone;

/// True when the appointment is not cancelled and starts strictly after the
/// business-local `(today, now_time)`.
pub fn is_upcoming(appointment: &Appointment, today: &str, now_time: &str) -> bool {
    if appointment.status.is_terminal_cancelled() {
        return false;
    }
    let date = appointment.date.as_str();
    date > today || (date == today && appointment.start_time.as_str() > now_time)
}

/// Decides whether `customer_id` may hold a new upcoming appointment with
/// `business_user_id` at `now`.
///
/// Only businesses that opted into the one-upcoming-appointment policy are
/// restricted; for everyone else this returns `true` without touching the
/// appointment store. `exclude_appointment_id` leaves the appointment being
/// rescheduled out of the count.
///
/// Store failures are returned as errors and must not be read as "eligible".
/// The check is advisory: nothing stops a concurrent booking from landing
/// between this read and the caller's insert.
pub async fn can_book<S>(
    store: &S,
    business_user_id: Uuid,
    customer_id: Uuid,
    now: DateTime<Utc>,
    exclude_appointment_id: Option<Uuid>,
) -> anyhow::Result<bool>
where
    S: BusinessSettingsStore + AppointmentStore + ?Sized,
{
    let settings = store
        .find_business_settings(business_user_id)
        .await?
        .unwrap_or_else(|| BusinessSettings::defaults_for(business_user_id));

    if !settings.limit_customer_to_one_upcoming_appointment {
        return Ok(true);
    }

    let local_now = timezone::normalize(now, &settings.timezone);
    let filter = UpcomingFilter {
        business_user_id,
        customer_id,
        today: local_now.date,
        now_time: local_now.time,
        exclude_appointment_id,
    };
    let upcoming = store.count_upcoming(&filter).await?;

    tracing::debug!(
        %business_user_id,
        %customer_id,
        upcoming,
        today = %filter.today,
        now_time = %filter.now_time,
        "Booking eligibility evaluated"
    );

    Ok(upcoming == 0)
}
