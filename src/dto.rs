//! # CoachDesk — Request/Response DTOs
//!
//! API contract types for the booking and compliance endpoints.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Dates and times travel as strings (`YYYY-MM-DD`, `HH:MM`) and are
//!   parsed strictly by the handlers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::appointment::AppointmentStatus;
use crate::models::daily_log::{NutritionStatus, WorkoutStatus};
use crate::services::calendar::{RangeView, WeekStart};

/// Runs `validator` rules and maps failures to a 422.
pub fn validated<T: Validate>(body: T) -> Result<T, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(body)
}

// ============================================================================
// Booking
// ============================================================================

/// GET /api/businesses/{business_id}/booking-eligibility
#[derive(Debug, Deserialize)]
pub struct EligibilityQuery {
    /// Required when a coach asks on behalf of a customer.
    pub customer_id: Option<Uuid>,
    /// The appointment being rescheduled, if any.
    pub exclude_appointment_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct EligibilityResponse {
    pub eligible: bool,
}

/// POST /api/appointments
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    pub business_user_id: Uuid,

    /// Business-local date
    #[validate(length(equal = 10, message = "date must be YYYY-MM-DD"))]
    pub date: String,

    /// Business-local 24h start time
    #[validate(length(equal = 5, message = "start_time must be HH:MM"))]
    pub start_time: String,
}

/// PUT /api/appointments/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct RescheduleAppointmentRequest {
    #[validate(length(equal = 10, message = "date must be YYYY-MM-DD"))]
    pub date: String,

    #[validate(length(equal = 5, message = "start_time must be HH:MM"))]
    pub start_time: String,
}

/// PATCH /api/appointments/{id}/status
#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: AppointmentStatus,
}

/// GET /api/appointments/{id}/status-options
#[derive(Debug, Serialize)]
pub struct StatusOptionsResponse {
    pub appointment_id: Uuid,
    pub options: Vec<AppointmentStatus>,
}

// ============================================================================
// Compliance ledger
// ============================================================================

/// POST /api/daily-logs/workout
#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutLogRequest {
    pub date: String,
    pub status: WorkoutStatus,
    #[validate(length(max = 2000, message = "Note must be under 2000 characters"))]
    pub client_note: Option<String>,
}

/// POST /api/daily-logs/nutrition
#[derive(Debug, Deserialize, Validate)]
pub struct NutritionLogRequest {
    pub date: String,
    pub compliance_status: NutritionStatus,
    #[validate(length(max = 2000, message = "Note must be under 2000 characters"))]
    pub client_note: Option<String>,
}

/// GET /api/daily-logs/range
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
    /// A coach reviewing one of their clients. Defaults to the caller.
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Week,
    Month,
}

/// GET /api/daily-logs/calendar
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub view: CalendarView,
    /// Any date inside the wanted week/month. Default: the owner's today.
    pub anchor: Option<String>,
    /// Week views only. Default: server configuration.
    pub week_start: Option<WeekStart>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub view: CalendarView,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(flatten)]
    pub range: RangeView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_length_limit() {
        let ok = WorkoutLogRequest {
            date: "2024-06-01".into(),
            status: WorkoutStatus::Completed,
            client_note: Some("x".repeat(2000)),
        };
        assert!(validated(ok).is_ok());

        let too_long = NutritionLogRequest {
            date: "2024-06-01".into(),
            compliance_status: NutritionStatus::Followed,
            client_note: Some("x".repeat(2001)),
        };
        assert!(matches!(validated(too_long), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_workout_request_deserializes() {
        let json = r#"{"date":"2024-06-01","status":"SKIPPED"}"#;
        let req: WorkoutLogRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, WorkoutStatus::Skipped);
        assert!(req.client_note.is_none());
    }

    #[test]
    fn test_calendar_query_view_lowercase() {
        let q: CalendarView = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(q, CalendarView::Month);
    }

    #[test]
    fn test_create_appointment_rejects_unpadded_time_length() {
        let req = CreateAppointmentRequest {
            business_user_id: Uuid::new_v4(),
            date: "2024-06-01".into(),
            start_time: "9:00".into(),
        };
        assert!(validated(req).is_err());
    }
}
