use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use kanasu_core::KanasuError;
use serde_json::json;
use thiserror::Error;

/// Errors returned to API clients as `{"detail": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl From<KanasuError> for ApiError {
    fn from(err: KanasuError) -> Self {
        match err {
            KanasuError::InvalidInput(msg) => ApiError::BadRequest(msg),
            KanasuError::InterestLimit { .. } | KanasuError::PasswordMismatch => {
                ApiError::BadRequest(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Worker failed: {}", err))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(msg) = self {
            log::error!("[API] {}", msg);
        }
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}
