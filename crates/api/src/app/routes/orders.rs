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
    Router::new().route("/", get(list_orders).post(create_order).put(replace_orders))
}

pub async fn list_orders(Extension(session): Extension<SessionContext>) -> axum::response::Response {
    match session.snapshot() {
        Ok(snapshot) => {
            let items = snapshot.orders.iter().map(dto::order_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_order(
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::CreateOrderRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let input = match dto::to_order_input(body) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let record = match session.with_ledger(|ledger| ledger.append_order(input, Utc::now())) {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    info!(
        session_id = %session.session_id(),
        menu = %record.menu,
        price = record.price,
        status = record.status.as_str(),
        "order recorded"
    );
    (StatusCode::CREATED, Json(serde_json::json!({ "item": dto::order_to_json(&record) }))).into_response()
}

/// Bulk grid edit: the body is the complete new table.
pub async fn replace_orders(
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::ReplaceOrdersRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let rows = match dto::to_order_rows(body.rows, Utc::now()) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let count = rows.len();

    if let Err(e) = session.with_ledger(|ledger| ledger.replace_orders(rows)) {
        return errors::domain_error_to_response(e);
    }

    info!(session_id = %session.session_id(), rows = count, "orders table replaced");
    (StatusCode::OK, Json(serde_json::json!({ "rows": count }))).into_response()
}
