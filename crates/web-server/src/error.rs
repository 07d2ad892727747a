use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use services::ServiceError;
use thiserror::Error;

/// Message returned for every failure the client cannot act upon.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred, please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Missing or invalid scraper key")]
    Unauthorized,
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Service(err @ (ServiceError::FundNotFound(_) | ServiceError::QuoteNotFound { .. })) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            AppError::Service(ServiceError::Validation(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Service(err) => {
                tracing::error!(error = ?err, "Internal error while handling request.");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
            AppError::InvalidBody(message) => {
                tracing::warn!(%message, "Rejected malformed request body.");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Unauthorized => {
                tracing::warn!("Rejected request without a valid scraper key.");
                (StatusCode::UNAUTHORIZED, "A valid SCRAPER-KEY header is required".to_string())
            }
        };

        let body = Json(json!({ "error": status.as_u16(), "message": message }));
        (status, body).into_response()
    }
}
