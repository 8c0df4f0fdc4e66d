use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::jwt::Role;
use crate::auth::middleware::AuthUser;
use crate::db::{AppointmentStore, BusinessSettingsStore};
use crate::dto::{
    validated, CreateAppointmentRequest, EligibilityQuery, EligibilityResponse,
    RescheduleAppointmentRequest, StatusOptionsResponse, UpdateAppointmentStatusRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::models::business::BusinessSettings;
use crate::services::appointment_status::offerable_statuses;
use crate::services::eligibility::{can_book, is_upcoming};
use crate::services::timezone;
use crate::AppState;

async fn business_timezone(state: &AppState, business_user_id: Uuid) -> AppResult<String> {
    let settings = state
        .store
        .find_business_settings(business_user_id)
        .await?
        .unwrap_or_else(|| BusinessSettings::defaults_for(business_user_id));
    Ok(settings.timezone)
}

/// Validates a business-local slot and requires it to start after "now".
fn parse_future_slot(
    date: &str,
    start_time: &str,
    now: chrono::DateTime<chrono::Utc>,
    zone: &str,
) -> AppResult<()> {
    timezone::parse_date_key(date)
        .ok_or_else(|| AppError::Validation("date must be a valid YYYY-MM-DD date".into()))?;
    timezone::parse_time_of_day(start_time)
        .ok_or_else(|| AppError::Validation("start_time must be a valid HH:MM time".into()))?;

    let local_now = timezone::normalize(now, zone);
    let in_future = date > local_now.date.as_str()
        || (date == local_now.date && start_time > local_now.time.as_str());
    if !in_future {
        return Err(AppError::Validation(
            "Appointment time must be in the future".into(),
        ));
    }
    Ok(())
}

/// Loads an appointment the caller is a party to: its customer or its coach.
async fn load_appointment_for(
    state: &AppState,
    id: Uuid,
    auth_user: &AuthUser,
) -> AppResult<Appointment> {
    let appointment = state
        .store
        .find_appointment(id)
        .await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    let is_party = match auth_user.role {
        Role::Client => appointment.customer_id == auth_user.id,
        Role::Coach => appointment.business_user_id == auth_user.id,
    };
    if !is_party {
        return Err(AppError::NotFound("Appointment not found".into()));
    }
    Ok(appointment)
}

pub async fn booking_eligibility(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(business_user_id): Path<Uuid>,
    Query(query): Query<EligibilityQuery>,
) -> AppResult<Json<EligibilityResponse>> {
    let customer_id = match auth_user.role {
        Role::Client => match query.customer_id {
            Some(id) if id != auth_user.id => return Err(AppError::Forbidden),
            _ => auth_user.id,
        },
        Role::Coach => {
            if business_user_id != auth_user.id {
                return Err(AppError::Forbidden);
            }
            query
                .customer_id
                .ok_or_else(|| AppError::Validation("customer_id is required".into()))?
        }
    };

    let eligible = can_book(
        state.store.as_ref(),
        business_user_id,
        customer_id,
        state.clock.now(),
        query.exclude_appointment_id,
    )
    .await?;

    Ok(Json(EligibilityResponse { eligible }))
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateAppointmentRequest>,
) -> AppResult<Json<Appointment>> {
    auth_user.require_client()?;
    let body = validated(body)?;

    let now = state.clock.now();
    let zone = business_timezone(&state, body.business_user_id).await?;
    parse_future_slot(&body.date, &body.start_time, now, &zone)?;

    // Pre-flight only; a concurrent booking can still slip in before the insert.
    if !can_book(state.store.as_ref(), body.business_user_id, auth_user.id, now, None).await? {
        tracing::info!(
            business_user_id = %body.business_user_id,
            customer_id = %auth_user.id,
            "Booking rejected: customer already has an upcoming appointment"
        );
        return Err(AppError::BookingLimitReached);
    }

    let appointment = state
        .store
        .insert_appointment(NewAppointment {
            business_user_id: body.business_user_id,
            customer_id: auth_user.id,
            date: body.date,
            start_time: body.start_time,
        })
        .await?;

    tracing::info!(appointment_id = %appointment.id, "Appointment booked");
    Ok(Json(appointment))
}

pub async fn reschedule_appointment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(appointment_id): Path<Uuid>,
    Json(body): Json<RescheduleAppointmentRequest>,
) -> AppResult<Json<Appointment>> {
    let body = validated(body)?;
    let appointment = load_appointment_for(&state, appointment_id, &auth_user).await?;

    if appointment.status.is_terminal_cancelled()
        || appointment.status == AppointmentStatus::Completed
    {
        return Err(AppError::Validation(
            "Cancelled or completed appointments cannot be rescheduled".into(),
        ));
    }

    let now = state.clock.now();
    let zone = business_timezone(&state, appointment.business_user_id).await?;
    parse_future_slot(&body.date, &body.start_time, now, &zone)?;

    let eligible = can_book(
        state.store.as_ref(),
        appointment.business_user_id,
        appointment.customer_id,
        now,
        Some(appointment.id),
    )
    .await?;
    if !eligible {
        return Err(AppError::BookingLimitReached);
    }

    let updated = state
        .store
        .reschedule_appointment(appointment.id, &body.date, &body.start_time)
        .await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    tracing::info!(appointment_id = %updated.id, date = %updated.date, "Appointment rescheduled");
    Ok(Json(updated))
}

pub async fn status_options(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<Json<StatusOptionsResponse>> {
    auth_user.require_coach()?;
    let appointment = load_appointment_for(&state, appointment_id, &auth_user).await?;
    let zone = business_timezone(&state, appointment.business_user_id).await?;

    Ok(Json(StatusOptionsResponse {
        appointment_id: appointment.id,
        options: offerable_statuses(&appointment, state.clock.now(), &zone),
    }))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(appointment_id): Path<Uuid>,
    Json(body): Json<UpdateAppointmentStatusRequest>,
) -> AppResult<Json<Appointment>> {
    auth_user.require_coach()?;
    let appointment = load_appointment_for(&state, appointment_id, &auth_user).await?;
    let zone = business_timezone(&state, appointment.business_user_id).await?;

    let now = state.clock.now();
    let options = offerable_statuses(&appointment, now, &zone);
    if !options.contains(&body.status) {
        return Err(match body.status {
            AppointmentStatus::Canceled => {
                AppError::Validation("Use CANCELLED to cancel an appointment".into())
            }
            status => AppError::RetroStatusNotAllowed { status },
        });
    }

    // Reinstating a cancelled slot that is still ahead is a new booking.
    if appointment.status.is_terminal_cancelled() && !body.status.is_terminal_cancelled() {
        let reinstated = Appointment {
            status: body.status,
            ..appointment.clone()
        };
        let local_now = timezone::normalize(now, &zone);
        if is_upcoming(&reinstated, &local_now.date, &local_now.time)
            && !can_book(
                state.store.as_ref(),
                appointment.business_user_id,
                appointment.customer_id,
                now,
                Some(appointment.id),
            )
            .await?
        {
            tracing::info!(
                appointment_id = %appointment.id,
                customer_id = %appointment.customer_id,
                "Reinstatement rejected: customer already has an upcoming appointment"
            );
            return Err(AppError::BookingLimitReached);
        }
    }

    let updated = state
        .store
        .set_appointment_status(appointment.id, body.status)
        .await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    tracing::info!(appointment_id = %updated.id, status = %updated.status, "Appointment status changed");
    Ok(Json(updated))
}
