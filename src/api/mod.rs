mod handlers;
mod models;

use axum::{routing::post, Router};

use crate::AppState;

pub use handlers::{analyze, not_found};
pub use models::{AnalyzeRequest, AnalyzeResponse, ErrorResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .fallback(not_found)
        .with_state(state)
}
