use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn create_session(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sessions.create() {
        Ok(ctx) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "session_id": ctx.session_id().to_string() })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn end_session(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    match services.sessions.end(session.session_id()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
