use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use standpos_ledger::FinancialSummary;

use crate::app::{dto, errors};
use crate::context::SessionContext;

/// Figures are recomputed from the full tables on every call.
pub async fn get_summary(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    match session.snapshot() {
        Ok(snapshot) => {
            let summary = FinancialSummary::from_snapshot(&snapshot);
            (StatusCode::OK, Json(dto::summary_to_json(&summary))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
