use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;
use crate::completion::UpstreamError;

pub const MISSING_FIELDS: &str = "missing systemPrompt or userText";
pub const INVALID_BODY: &str = "invalid request body";
pub const BODY_TOO_LARGE: &str = "request body too large";
pub const UPSTREAM_FAILED: &str = "AI service call failed";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream details stay in the logs.
        let error = match &self {
            Self::Validation(message) => *message,
            Self::PayloadTooLarge => BODY_TOO_LARGE,
            Self::Upstream(_) => UPSTREAM_FAILED,
        };

        (
            self.status(),
            Json(ErrorResponse {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}
