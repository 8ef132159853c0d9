use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use tracing::error;

/// Handler error: either a store error or a request the router rejected itself.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

fn json_error(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(msg))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Service(ServiceError::NotFound) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Service(ServiceError::ValidationFailed(msg)) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Service(ServiceError::Internal(detail)) => {
                // 仅记录日志，不向客户端泄露内部细节
                error!(error = %detail, "internal error while handling request");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            ApiError::Service(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }
}
