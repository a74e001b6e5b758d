use axum::{http::StatusCode, response::IntoResponse, Json};

use standpos_ledger::PredefinedItem;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Fixed menu; anything else submitted as `menu` is recorded as a custom item.
pub async fn menu() -> impl IntoResponse {
    let items = PredefinedItem::ALL
        .iter()
        .map(|item| item.display_name())
        .collect::<Vec<_>>();
    Json(serde_json::json!({ "items": items, "custom_allowed": true }))
}
