//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ServerError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                },
            },
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

/// Validation messages reach the caller verbatim; everything else is logged
/// and replaced by a generic message.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message).with_param("q"),
            DomainError::Upstream { .. } => {
                error!(error = %err, "Upstream lookup failed");
                Self::unavailable("Example sentence source unavailable")
            }
            DomainError::Storage { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. } => {
                error!(error = %err, "Request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api_err: ApiError = DomainError::validation("no valid q supplied").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.response.error.message, "no valid q supplied");
        assert_eq!(api_err.response.error.param, Some("q".to_string()));
    }

    #[test]
    fn test_upstream_maps_to_unavailable() {
        let api_err: ApiError = DomainError::upstream("immersion_kit", "HTTP 500").into();

        assert_eq!(api_err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!api_err.response.error.message.contains("HTTP 500"));
    }

    #[test]
    fn test_storage_maps_to_internal() {
        let api_err: ApiError = DomainError::storage("connection refused").into();

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_err.response.error.error_type, ApiErrorType::ServerError);
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::bad_request("no valid q supplied");
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(json.contains("invalid_request_error"));
        assert!(json.contains("no valid q supplied"));
        assert!(!json.contains("param"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("No route");
        assert_eq!(err.to_string(), "not_found_error: No route");
    }
}
