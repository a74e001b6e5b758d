use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
};

use standpos_ledger::Table;

use crate::app::errors;
use crate::context::SessionContext;

pub async fn export_table(
    Extension(session): Extension<SessionContext>,
    Path(table): Path<String>,
) -> axum::response::Response {
    let table = match table.as_str() {
        "orders" => Table::Orders,
        "expenses" => Table::Expenses,
        _ => {
            return errors::json_error(
                StatusCode::NOT_FOUND,
                "unknown_table",
                "table must be one of: orders, expenses",
            )
        }
    };

    let csv = match session
        .snapshot()
        .and_then(|snapshot| standpos_ledger::export_table(&snapshot, table))
    {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", table.file_name()),
            ),
        ],
        csv,
    )
        .into_response()
}
