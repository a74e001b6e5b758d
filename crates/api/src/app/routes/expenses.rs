use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/", get(list_expenses).post(create_expense).put(replace_expenses))
}

pub async fn list_expenses(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    match session.snapshot() {
        Ok(snapshot) => {
            let items = snapshot.expenses.iter().map(dto::expense_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_expense(
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::CreateExpenseRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let input = dto::to_expense_input(body);

    let record = match session.with_ledger(|ledger| ledger.append_expense(input, Utc::now())) {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    info!(session_id = %session.session_id(), cost = record.cost, "expense recorded");
    (StatusCode::CREATED, Json(serde_json::json!({ "item": dto::expense_to_json(&record) }))).into_response()
}

pub async fn replace_expenses(
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::ReplaceExpensesRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let rows = dto::to_expense_rows(body.rows, Utc::now());
    let count = rows.len();

    if let Err(e) = session.with_ledger(|ledger| ledger.replace_expenses(rows)) {
        return errors::domain_error_to_response(e);
    }

    info!(session_id = %session.session_id(), rows = count, "expenses table replaced");
    (StatusCode::OK, Json(serde_json::json!({ "rows": count }))).into_response()
}
