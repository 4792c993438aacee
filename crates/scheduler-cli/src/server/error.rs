use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use scheduler_core::error::{CoreError, ErrorKind};
use serde_json::json;

/// Error returned by every API handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(reason) => reason.clone(),
            ApiError::Core(err) => err.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            // Storage failures carry their source; the client only gets the summary.
            match &self {
                ApiError::Core(err) => tracing::error!(error = ?err, "request failed"),
                ApiError::BadRequest(_) => tracing::error!(%message, "request failed"),
            }
        } else {
            tracing::warn!(%status, %message, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
