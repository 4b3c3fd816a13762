//! API boundary error type
//!
//! Every error is converted into the structured JSON shape the client
//! expects: `{success: false, message, errors?}` with a client-error
//! status for input problems and a server-error status otherwise.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rdc_common::Error;
use serde_json::json;
use thiserror::Error as ThisError;
use tracing::error;

/// API error type
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Workspace error taxonomy (validation, storage, db, ...)
    #[error(transparent)]
    Common(#[from] Error),

    /// Multipart body could not be read
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::Common(Error::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                "Invalid data provided".to_string(),
                Some(violations),
            ),
            ApiError::Common(err @ Error::MalformedInput(_))
            | ApiError::Common(err @ Error::UnsupportedFileType { .. })
            | ApiError::Common(err @ Error::FileTooLarge { .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string(), None)
            }
            ApiError::Common(Error::NotFound(message)) => {
                (StatusCode::NOT_FOUND, message, None)
            }
            ApiError::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            ApiError::Common(err) => {
                error!("Submission error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = match errors {
            Some(violations) => json!({
                "success": false,
                "message": message,
                "errors": violations,
            }),
            None => json!({
                "success": false,
                "message": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdc_common::FieldViolation;

    #[test]
    fn validation_maps_to_400_with_field_list() {
        let err = ApiError::from(Error::Validation(vec![FieldViolation {
            field: "age".to_string(),
            message: "Must be an integer".to_string(),
        }]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(Error::NotFound("Participant not found".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let err = ApiError::from(Error::Storage("bucket unreachable".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
