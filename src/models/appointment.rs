use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A booked session. `date` and `start_time` are wall-clock strings in the
/// business's timezone (`YYYY-MM-DD`, `HH:MM`), never UTC instants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: Uuid,
    pub business_user_id: Uuid,
    pub customer_id: Uuid,
    pub date: String,
    pub start_time: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    /// Legacy spelling still present in older rows.
    Canceled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        Self::Scheduled,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
        Self::Canceled,
        Self::NoShow,
    ];

    /// Cancelled (either spelling) or no-show. These never count as upcoming.
    pub fn is_terminal_cancelled(self) -> bool {
        matches!(self, Self::Cancelled | Self::Canceled | Self::NoShow)
    }

    /// Statuses that assert the session did not take place.
    pub fn implies_did_not_happen(self) -> bool {
        matches!(self, Self::NoShow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Canceled => "CANCELED",
            Self::NoShow => "NO_SHOW",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values for a new appointment row; date/time already validated.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub business_user_id: Uuid,
    pub customer_id: Uuid,
    pub date: String,
    pub start_time: String,
}

/// Filter for counting a customer's upcoming appointments with one business.
#[derive(Debug, Clone)]
pub struct UpcomingFilter {
    pub business_user_id: Uuid,
    pub customer_id: Uuid,
    /// Business-local date key for "now".
    pub today: String,
    /// Business-local `HH:MM` for "now".
    pub now_time: String,
    pub exclude_appointment_id: Option<Uuid>,
}
