use chrono::{DateTime, Utc};

use crate::models::appointment::{Appointment, AppointmentStatus};
use crate::services::timezone;

/// True once the appointment's business-local start is strictly before `now`.
/// Same-day appointments that have not started yet do not qualify.
pub fn has_started(appointment: &Appointment, now: DateTime<Utc>, zone: &str) -> bool {
    let local_now = timezone::normalize(now, zone);
    let date = appointment.date.as_str();
    date < local_now.date.as_str()
        || (date == local_now.date && appointment.start_time < local_now.time)
}

/// Statuses a coach may set on `appointment` right now. "Did not happen"
/// statuses only appear once the scheduled start has passed.
pub fn offerable_statuses(
    appointment: &Appointment,
    now: DateTime<Utc>,
    zone: &str,
) -> Vec<AppointmentStatus> {
    let started = has_started(appointment, now, zone);
    AppointmentStatus::ALL
        .into_iter()
        // legacy spelling is read-only
        .filter(|s| *s != AppointmentStatus::Canceled)
        .filter(|s| !s.implies_did_not_happen() || started)
        .collect()
}
