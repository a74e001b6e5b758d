use axum::{
    routing::{delete, get},
    Router,
};

pub mod advice;
pub mod expenses;
pub mod export;
pub mod orders;
pub mod sessions;
pub mod summary;
pub mod system;

/// Router for all session-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/session", delete(sessions::end_session))
        .route("/summary", get(summary::get_summary))
        .route("/export/:table", get(export::export_table))
        .nest("/orders", orders::router())
        .nest("/expenses", expenses::router())
        .nest("/advice", advice::router())
}
