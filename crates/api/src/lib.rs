//! HTTP API for the hotel room booking service.
//!
//! Exposes the caller's booking operations over REST, with structured
//! logging (tracing) and Prometheus metrics.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use domain::{BookingPolicy, BookingService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::Repository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::bookings::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Repository + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/booking",
            get(routes::bookings::get::<S>).post(routes::bookings::create::<S>),
        )
        .route("/booking/{booking_id}", put(routes::bookings::update::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps `store` in a booking service governed by `policy`.
pub fn create_default_state<S: Repository + 'static>(
    store: S,
    policy: BookingPolicy,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        booking_service: BookingService::with_policy(store, policy),
    })
}
