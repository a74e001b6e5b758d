use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use standpos_core::SessionId;

use crate::app::errors;
use crate::app::services::AppServices;

/// Header carrying the session identifier returned by `POST /sessions`.
pub const SESSION_HEADER: &str = "x-session-id";

pub async fn session_middleware(
    State(services): State<Arc<AppServices>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = match extract_session_id(req.headers()) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let ctx = match services.sessions.get(session_id) {
        Ok(ctx) => ctx,
        Err(e) => return errors::domain_error_to_response(e),
    };

    req.extensions_mut().insert(ctx);

    next.run(req).await
}

fn extract_session_id(headers: &HeaderMap) -> Result<SessionId, Response> {
    let header = headers.get(SESSION_HEADER).ok_or_else(|| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "missing_session",
            format!("{SESSION_HEADER} header is required"),
        )
    })?;

    let raw = header.to_str().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "session id is not valid text")
    })?;

    raw.parse::<SessionId>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
