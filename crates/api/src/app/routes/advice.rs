use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/", get(advisor_status).post(ask_advisor))
}

pub async fn advisor_status(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.advisor.availability())).into_response()
}

/// One question, one answer. The ledger is only read, through a snapshot
/// taken before the model call.
pub async fn ask_advisor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::AskRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let snapshot = match session.snapshot() {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.advisor.ask(&snapshot, &body.question).await {
        Ok(advice) => (
            StatusCode::OK,
            Json(serde_json::json!({ "answer": advice.answer, "model": advice.model })),
        )
            .into_response(),
        Err(e) => errors::advisor_error_to_response(e),
    }
}
