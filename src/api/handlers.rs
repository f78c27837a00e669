use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, info};

use crate::error::{AppError, INVALID_BODY};
use crate::AppState;

use super::models::{AnalyzeRequest, AnalyzeResponse, ErrorResponse};

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("rejected request body: {rejection}");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(INVALID_BODY)
        }
    })?;

    let (system_prompt, user_text) = payload.fields()?;

    info!("calling completion API");
    let result = state
        .completion
        .complete(system_prompt, user_text)
        .await
        .map_err(|err| {
            error!(error = %err, "completion API call failed");
            AppError::from(err)
        })?;

    info!("completion API call succeeded");
    Ok(Json(AnalyzeResponse { result }))
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
