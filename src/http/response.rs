//! Mapping relay results to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::relay::types::{ErrorBody, Success};
use crate::relay::RelayError;

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::NotFound(_) => StatusCode::NOT_FOUND,
            RelayError::Submission(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// `200 {"success": true, ...body}`
pub fn success<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(Success::new(body))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::MethodNotAllowed("Only POST requests allowed").status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(RelayError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RelayError::Submission("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_status() {
        let response = RelayError::validation("No address provided").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
