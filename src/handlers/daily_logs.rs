use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::jwt::Role;
use crate::auth::middleware::AuthUser;
use crate::db::RosterStore;
use crate::dto::{
    validated, CalendarQuery, CalendarResponse, CalendarView, NutritionLogRequest, RangeQuery,
    WorkoutLogRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::daily_log::LedgerRow;
use crate::services::calendar::{build_range, month_window, week_window, DateWindow, RangeView};
use crate::services::{ledger, timezone};
use crate::AppState;

fn parse_date_param(name: &str, raw: &str) -> AppResult<NaiveDate> {
    timezone::parse_date_key(raw)
        .ok_or_else(|| AppError::Validation(format!("{name} must be a valid YYYY-MM-DD date")))
}

/// Whose ledger is being read. Clients read their own; coaches must name a
/// client on their roster.
async fn resolve_owner(
    state: &AppState,
    auth_user: &AuthUser,
    owner_id: Option<Uuid>,
) -> AppResult<Uuid> {
    match auth_user.role {
        Role::Client => match owner_id {
            Some(id) if id != auth_user.id => Err(AppError::Forbidden),
            _ => Ok(auth_user.id),
        },
        Role::Coach => {
            let client_id = owner_id
                .ok_or_else(|| AppError::Validation("owner_id is required".into()))?;
            if state.store.is_client_of(auth_user.id, client_id).await? {
                Ok(client_id)
            } else {
                Err(AppError::Forbidden)
            }
        }
    }
}

pub async fn upsert_workout_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<WorkoutLogRequest>,
) -> AppResult<Json<LedgerRow>> {
    auth_user.require_client()?;
    let body = validated(body)?;
    let date = parse_date_param("date", &body.date)?;
    let today = timezone::local_date(state.clock.now(), &auth_user.timezone);

    let row = ledger::upsert_workout_log(
        state.store.as_ref(),
        auth_user.id,
        date,
        today,
        body.status,
        body.client_note,
    )
    .await?;

    Ok(Json(row))
}

pub async fn upsert_nutrition_log(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<NutritionLogRequest>,
) -> AppResult<Json<LedgerRow>> {
    auth_user.require_client()?;
    let body = validated(body)?;
    let date = parse_date_param("date", &body.date)?;
    let today = timezone::local_date(state.clock.now(), &auth_user.timezone);

    let row = ledger::upsert_nutrition_log(
        state.store.as_ref(),
        auth_user.id,
        date,
        today,
        body.compliance_status,
        body.client_note,
    )
    .await?;

    Ok(Json(row))
}

pub async fn get_range(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<RangeView>> {
    let owner_id = resolve_owner(&state, &auth_user, query.owner_id).await?;
    let window = DateWindow {
        start: parse_date_param("start", &query.start)?,
        end: parse_date_param("end", &query.end)?,
    };
    let today = timezone::local_date(state.clock.now(), &auth_user.timezone);

    let view = build_range(
        state.store.as_ref(),
        owner_id,
        window,
        today,
        state.config.max_range_days,
    )
    .await?;

    Ok(Json(view))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<CalendarResponse>> {
    let owner_id = resolve_owner(&state, &auth_user, query.owner_id).await?;
    let today = timezone::local_date(state.clock.now(), &auth_user.timezone);
    let anchor = match query.anchor.as_deref() {
        Some(raw) => parse_date_param("anchor", raw)?,
        None => today,
    };

    let window = match query.view {
        CalendarView::Week => week_window(
            anchor,
            query.week_start.unwrap_or(state.config.default_week_start),
        ),
        CalendarView::Month => month_window(anchor),
    };

    let range = build_range(
        state.store.as_ref(),
        owner_id,
        window,
        today,
        state.config.max_range_days,
    )
    .await?;

    Ok(Json(CalendarResponse {
        view: query.view,
        start: window.start,
        end: window.end,
        range,
    }))
}
