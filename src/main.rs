use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;
use db::{PgStore, Store};
use services::clock::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub clock: Arc<dyn Clock>,
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        // Booking
        .route(
            "/api/businesses/:business_id/booking-eligibility",
            get(handlers::appointments::booking_eligibility),
        )
        .route(
            "/api/appointments",
            post(handlers::appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            put(handlers::appointments::reschedule_appointment),
        )
        .route(
            "/api/appointments/:id/status-options",
            get(handlers::appointments::status_options),
        )
        .route(
            "/api/appointments/:id/status",
            patch(handlers::appointments::update_status),
        )
        // Daily compliance ledger
        .route(
            "/api/daily-logs/workout",
            post(handlers::daily_logs::upsert_workout_log),
        )
        .route(
            "/api/daily-logs/nutrition",
            post(handlers::daily_logs::upsert_nutrition_log),
        )
        .route("/api/daily-logs/range", get(handlers::daily_logs::get_range))
        .route(
            "/api/daily-logs/calendar",
            get(handlers::daily_logs::get_calendar),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let mut origins = vec![config
        .frontend_url
        .parse::<axum::http::HeaderValue>()
        .expect("FRONTEND_URL must be a valid header value")];
    for o in &config.cors_extra_origins {
        if let Ok(hv) = o.parse::<axum::http::HeaderValue>() {
            origins.push(hv);
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coachdesk_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        config: config.clone(),
        store: Arc::new(PgStore::new(db)),
        clock: Arc::new(SystemClock),
    };

    let app = app(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config)),
    );

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
