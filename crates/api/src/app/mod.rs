//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared services (session registry, advisor)
//! - `sessions.rs`: live sessions and their ledgers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use standpos_advisor::{Advisor, AdvisorError};

use crate::config::{AppConfig, DEFAULT_SESSION_IDLE_TTL};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod sessions;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// A missing model credential is not an error: the advisor starts disabled.
pub fn build_app(config: &AppConfig) -> Result<Router, AdvisorError> {
    let advisor = Advisor::from_config(&config.advisor)?;
    Ok(build_app_with(advisor, config.session_idle_ttl))
}

/// Build the router around an already constructed advisor, default session TTL.
pub fn build_app_with_advisor(advisor: Advisor) -> Router {
    build_app_with(advisor, DEFAULT_SESSION_IDLE_TTL)
}

pub fn build_app_with(advisor: Advisor, session_idle_ttl: Duration) -> Router {
    let services = Arc::new(services::AppServices::new(advisor, session_idle_ttl));

    // Session-scoped routes: require a live `x-session-id`.
    let scoped = routes::router().layer(axum::middleware::from_fn_with_state(
        Arc::clone(&services),
        middleware::session_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/menu", get(routes::system::menu))
        .route("/sessions", post(routes::sessions::create_session))
        .merge(scoped)
        .layer(Extension(services))
}
