//! The HTTP-facing error envelope (spec `SPEC_FULL.md` §A.4), following the
//! teacher's `api::types::ApiError`: a flat variant set implementing
//! `IntoResponse`, with `FilterError`'s three kinds mapped onto it.
//! `FilterError::Internal` (a programmer error, spec §7) is logged at
//! `error` and never echoes its message to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::common::errors::FilterError;
use crate::storage::ArangoError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::MissingParameter(msg) => ApiError::bad_request("MISSING_PARAMETER", msg),
            FilterError::IllegalParameter(msg) => ApiError::bad_request("ILLEGAL_PARAMETER", msg),
            FilterError::Internal(msg) => {
                tracing::error!(error = %msg, "filter compiler misuse (programmer error)");
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl From<ArangoError> for ApiError {
    fn from(err: ArangoError) -> Self {
        tracing::error!(error = %err, "ArangoDB collaborator error");
        Self::ServiceUnavailable {
            message: "Storage backend unavailable".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => (StatusCode::BAD_REQUEST, "bad_request", code, message),
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_maps_to_bad_request() {
        let api_err: ApiError = FilterError::missing("empty range").into();
        assert!(matches!(api_err, ApiError::BadRequest { .. }));
    }

    #[test]
    fn internal_error_never_leaks_its_message() {
        let api_err: ApiError = FilterError::internal("unsupported column type reached dispatch").into();
        match api_err {
            ApiError::Internal { message } => assert_eq!(message, "Internal server error"),
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
