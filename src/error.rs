use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;

use crate::models::appointment::AppointmentStatus;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("You already have an upcoming appointment")]
    BookingLimitReached,

    #[error("You can't report adherence for a future day ({date})")]
    FutureDateWrite { date: NaiveDate },

    #[error("Status {status} is only available once the appointment time has passed")]
    RetroStatusNotAllowed { status: AppointmentStatus },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::BookingLimitReached => "booking_limit_reached",
            AppError::FutureDateWrite { .. } => "future_date",
            AppError::RetroStatusNotAllowed { .. } => "status_not_yet_allowed",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::BookingLimitReached => (StatusCode::CONFLICT, self.to_string()),
            AppError::FutureDateWrite { .. } | AppError::RetroStatusNotAllowed { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let body = json!({
            "error": {
                "code": self.code(),
                "message": message,
                "status": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejections_have_distinct_codes() {
        let booking = AppError::BookingLimitReached;
        let future = AppError::FutureDateWrite {
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
        };
        assert_ne!(booking.code(), future.code());
        assert_ne!(booking.to_string(), future.to_string());
    }

    #[test]
    fn test_booking_limit_is_conflict() {
        let resp = AppError::BookingLimitReached.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_failure_hides_details() {
        let resp = AppError::Internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
