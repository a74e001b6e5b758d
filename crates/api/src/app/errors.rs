use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use standpos_advisor::AdvisorError;
use standpos_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "session not found"),
        DomainError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

/// Advisory failures are never fatal; the ledger is unaffected.
pub fn advisor_error_to_response(err: AdvisorError) -> axum::response::Response {
    let status = match &err {
        AdvisorError::ConfigurationMissing(_) => StatusCode::SERVICE_UNAVAILABLE,
        AdvisorError::EmptyQuestion => StatusCode::BAD_REQUEST,
        AdvisorError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        AdvisorError::Unauthorized(_) | AdvisorError::Unreachable(_) | AdvisorError::InvalidResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        AdvisorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.code(), err.to_string())
}

/// Malformed or mistyped request bodies are validation errors like any other.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
