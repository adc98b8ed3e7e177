//! Mapping of handler failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::notifications::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Notification not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => {
                warn!("Rejected request: {}", err);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody {
                        error: err.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::NotFound => {
                debug!("Request path does not name a notification");
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorBody {
                        error: ApiError::NotFound.to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::Storage(err) => {
                error!("Storage failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
