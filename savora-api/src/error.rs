use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use savora_reserve::holds::HoldError;
use savora_reserve::ReservationError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    AuthorizationError(String),
    NotFoundError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::NotFound(_) => {
                AppError::NotFoundError("Reservation not found".to_string())
            }
            ReservationError::Forbidden(msg) => AppError::AuthorizationError(msg),
            ReservationError::Validation(msg) => AppError::ValidationError(msg),
            ReservationError::Store(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<HoldError> for AppError {
    fn from(err: HoldError) -> Self {
        match err {
            HoldError::Store(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}
