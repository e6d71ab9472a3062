//! Error types for the Upmind API client.
//!
//! # Design
//! HTTP-level errors carry the full [`ApiResponse`] so callers can inspect the
//! status, message and validation detail. Which variant a status maps to is
//! decided by [`ErrorKind::from_status`], a pure function.
//! `Connection` is the only variant raised when no response exists; it wraps
//! the transport's failure as a [`TransportError`] so the transport's own
//! error types never reach the caller.

use thiserror::Error;

use crate::http::TransportError;
use crate::response::ApiResponse;

/// Classification of a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401.
    Auth,
    /// 422.
    Validation,
    /// 400-499 other than 401 and 422.
    Client,
    /// 500-599.
    Server,
    /// Any other non-2xx status.
    Http,
}

impl ErrorKind {
    /// Maps a status code to its error kind. Returns `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(ErrorKind::Auth),
            422 => Some(ErrorKind::Validation),
            400..=499 => Some(ErrorKind::Client),
            500..=599 => Some(ErrorKind::Server),
            _ => Some(ErrorKind::Http),
        }
    }
}

/// Errors returned by [`crate::Api`] and the domain services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed before an HTTP response was available.
    #[error("connection failed: {0}")]
    Connection(#[from] TransportError),

    /// Non-2xx status that fits no other bucket.
    #[error("{message} (HTTP {})", .response.status())]
    Http {
        response: Box<ApiResponse>,
        message: String,
    },

    /// 4xx other than 401 and 422.
    #[error("{}", describe(.0, "Client Error"))]
    Client(Box<ApiResponse>),

    /// 422, with field-level detail in the response body.
    #[error("{}", describe(.0, "Validation Error"))]
    Validation(Box<ApiResponse>),

    /// 401.
    #[error("{}", describe(.0, "Authentication Error"))]
    Auth(Box<ApiResponse>),

    /// 5xx.
    #[error("{}", describe(.0, "Server Error"))]
    Server(Box<ApiResponse>),

    /// Rejected locally before any network activity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The client could not be assembled from the supplied parts.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

fn describe(response: &ApiResponse, fallback: &str) -> String {
    format!(
        "{} (HTTP {})",
        response.message().unwrap_or(fallback),
        response.status()
    )
}

impl ApiError {
    /// Builds the error for a non-2xx response. A 2xx response yields the
    /// generic `Http` variant, since it should never be classified.
    pub fn from_response(response: ApiResponse) -> Self {
        let response = Box::new(response);
        match ErrorKind::from_status(response.status()) {
            Some(ErrorKind::Auth) => ApiError::Auth(response),
            Some(ErrorKind::Validation) => ApiError::Validation(response),
            Some(ErrorKind::Client) => ApiError::Client(response),
            Some(ErrorKind::Server) => ApiError::Server(response),
            Some(ErrorKind::Http) | None => ApiError::Http {
                response,
                message: "Unexpected Error".to_string(),
            },
        }
    }

    /// The HTTP error kind, or `None` for errors raised without a response.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Http { .. } => Some(ErrorKind::Http),
            ApiError::Client(_) => Some(ErrorKind::Client),
            ApiError::Validation(_) => Some(ErrorKind::Validation),
            ApiError::Auth(_) => Some(ErrorKind::Auth),
            ApiError::Server(_) => Some(ErrorKind::Server),
            _ => None,
        }
    }

    /// The response that caused this error, if there was one.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            ApiError::Http { response, .. }
            | ApiError::Client(response)
            | ApiError::Validation(response)
            | ApiError::Auth(response)
            | ApiError::Server(response) => Some(&**response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(ApiResponse::status)
    }

    /// Field-level validation detail, only present on `Validation`.
    pub fn validation_errors(&self) -> Option<&serde_json::Value> {
        match self {
            ApiError::Validation(response) => response.validation_errors(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[test]
    fn classifies_status_codes() {
        assert_eq!(ErrorKind::from_status(200), None);
        assert_eq!(ErrorKind::from_status(204), None);
        assert_eq!(ErrorKind::from_status(401), Some(ErrorKind::Auth));
        assert_eq!(ErrorKind::from_status(422), Some(ErrorKind::Validation));
        assert_eq!(ErrorKind::from_status(400), Some(ErrorKind::Client));
        assert_eq!(ErrorKind::from_status(403), Some(ErrorKind::Client));
        assert_eq!(ErrorKind::from_status(404), Some(ErrorKind::Client));
        assert_eq!(ErrorKind::from_status(499), Some(ErrorKind::Client));
        assert_eq!(ErrorKind::from_status(500), Some(ErrorKind::Server));
        assert_eq!(ErrorKind::from_status(503), Some(ErrorKind::Server));
        assert_eq!(ErrorKind::from_status(599), Some(ErrorKind::Server));
        assert_eq!(ErrorKind::from_status(302), Some(ErrorKind::Http));
        assert_eq!(ErrorKind::from_status(600), Some(ErrorKind::Http));
    }

    #[test]
    fn from_response_picks_matching_variant() {
        assert!(matches!(ApiError::from_response(response(401, "")), ApiError::Auth(_)));
        assert!(matches!(
            ApiError::from_response(response(422, "")),
            ApiError::Validation(_)
        ));
        assert!(matches!(ApiError::from_response(response(404, "")), ApiError::Client(_)));
        assert!(matches!(ApiError::from_response(response(503, "")), ApiError::Server(_)));
        assert!(matches!(
            ApiError::from_response(response(304, "")),
            ApiError::Http { .. }
        ));
    }

    #[test]
    fn http_errors_keep_their_response() {
        let err = ApiError::from_response(response(404, r#"{"message":"Not found"}"#));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.kind(), Some(ErrorKind::Client));
        assert_eq!(err.response().unwrap().message(), Some("Not found"));
    }

    #[test]
    fn display_uses_response_message_or_fallback() {
        let err = ApiError::from_response(response(500, r#"{"error":{"message":"Boom"}}"#));
        assert_eq!(err.to_string(), "Boom (HTTP 500)");

        let err = ApiError::from_response(response(401, ""));
        assert_eq!(err.to_string(), "Authentication Error (HTTP 401)");

        let err = ApiError::from_response(response(302, ""));
        assert_eq!(err.to_string(), "Unexpected Error (HTTP 302)");
    }

    #[test]
    fn validation_errors_only_on_validation_variant() {
        let body = r#"{"error":{"message":"Invalid","data":{"email":["required"]}}}"#;
        let err = ApiError::from_response(response(422, body));
        assert_eq!(err.validation_errors().unwrap()["email"][0], "required");

        let err = ApiError::from_response(response(400, body));
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn connection_error_has_no_response() {
        let err = ApiError::from(TransportError::new("timed out"));
        assert!(err.response().is_none());
        assert!(err.kind().is_none());
        assert_eq!(err.to_string(), "connection failed: timed out");
    }
}
