//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use offhours_domain::error::OffhoursError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`OffhoursError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(OffhoursError);

impl From<OffhoursError> for ApiError {
    fn from(err: OffhoursError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            OffhoursError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            OffhoursError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            OffhoursError::Upstream { .. } | OffhoursError::Dispatch { .. } => {
                let message = self.0.with_sources();
                tracing::warn!(error = %message, "upstream error");
                (StatusCode::BAD_GATEWAY, message)
            }
            OffhoursError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
