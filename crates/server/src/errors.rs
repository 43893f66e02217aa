use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use models::errors::ModelError;
use service::errors::ServiceError;

/// Error as exposed to API clients: a status code plus `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg)
            | ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, msg)
            }
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg),
            ServiceError::Db(cause) | ServiceError::Model(ModelError::Db(cause)) => {
                // The cause is logged, not exposed.
                error!(error = %cause, "store error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
