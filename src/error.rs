use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The main error type for Breakwater middleware
///
/// Signature mismatch is deliberately not represented here: a failed
/// verification is a `403 Forbidden` response, not an error value. These
/// variants cover the remaining operational faults (unreadable request body,
/// failures raised by a webhook continuation).
#[derive(Debug, thiserror::Error)]
pub enum BreakwaterError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Standard error response format for API errors
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl BreakwaterError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a safe error message suitable for client responses.
    ///
    /// Client errors (4xx) expose their message; server errors (5xx) return a
    /// generic message so internal details are not disclosed. Full details are
    /// logged server-side.
    fn safe_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => format!("Bad request: {}", msg),
            Self::Forbidden(msg) => format!("Forbidden: {}", msg),
            Self::Internal(_) | Self::Anyhow(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for BreakwaterError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        tracing::error!(
            status = status.as_u16(),
            error = %self, // Full error message for server logs
            "Request failed"
        );

        let body = Json(ErrorResponse {
            error: self.safe_message(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for Breakwater operations
pub type Result<T> = std::result::Result<T, BreakwaterError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Variant creation tests ============

    #[test]
    fn test_bad_request_error() {
        let err = BreakwaterError::bad_request("Invalid input");
        assert!(matches!(err, BreakwaterError::BadRequest(_)));
        assert_eq!(err.to_string(), "Bad request: Invalid input");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_forbidden_error() {
        let err = BreakwaterError::forbidden("Access denied");
        assert!(matches!(err, BreakwaterError::Forbidden(_)));
        assert_eq!(err.to_string(), "Forbidden: Access denied");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_error() {
        let err = BreakwaterError::internal("Something went wrong");
        assert!(matches!(err, BreakwaterError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_anyhow_error() {
        let anyhow_err = anyhow::anyhow!("Something unexpected");
        let err: BreakwaterError = anyhow_err.into();
        assert!(matches!(err, BreakwaterError::Anyhow(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ============ safe_message tests ============

    #[test]
    fn test_safe_message_client_errors_exposed() {
        assert_eq!(
            BreakwaterError::bad_request("Missing field").safe_message(),
            "Bad request: Missing field"
        );
        assert_eq!(
            BreakwaterError::forbidden("Signature mismatch").safe_message(),
            "Forbidden: Signature mismatch"
        );
    }

    #[test]
    fn test_safe_message_server_errors_hidden() {
        assert_eq!(
            BreakwaterError::internal("db password is 'secret123'").safe_message(),
            "Internal server error"
        );

        let anyhow_err = anyhow::anyhow!("Sensitive stack trace info");
        let err: BreakwaterError = anyhow_err.into();
        assert_eq!(err.safe_message(), "Internal server error");
    }

    // ============ IntoResponse tests ============

    #[tokio::test]
    async fn test_into_response_bad_request() {
        let err = BreakwaterError::bad_request("Invalid");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_into_response_internal_hides_details() {
        let err = BreakwaterError::internal("Sensitive: connection pool exhausted");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }
}
