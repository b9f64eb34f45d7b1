use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use thiserror::Error;

use crate::upstream::UpstreamError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request method {0}")]
    InvalidMethod(Method),

    /// A path segment the router matched but could not decode, e.g. invalid UTF-8.
    #[error("{0}")]
    InvalidPath(String),

    #[error("Invalid region")]
    InvalidRegion(String),

    #[error("Invalid date, please enter in YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("Start date must be before end date")]
    InvalidDateOrder,

    #[error("Start and end dates are required. If you're looking for data from just one day, perhaps try /regional/:region/:date?")]
    MissingDateBound,

    #[error("carbon intensity request failed: {0}")]
    UpstreamCarbon(#[source] UpstreamError),

    #[error("covid request failed: {0}")]
    UpstreamCovid(#[source] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UpstreamCarbon(_) | ApiError::UpstreamCovid(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::UpstreamCarbon(upstream) | ApiError::UpstreamCovid(upstream) => {
                match upstream.payload() {
                    Value::String(message) => (status, message).into_response(),
                    payload => (status, Json(payload)).into_response(),
                }
            }
            validation => (status, validation.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn validation_failures_are_bad_requests() {
        assert_eq!(ApiError::InvalidMethod(Method::POST).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidPath("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidRegion("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidDate("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidDateOrder.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingDateBound.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_are_server_errors() {
        let upstream = || UpstreamError::Status {
            status: StatusCode::BAD_REQUEST,
            payload: json!({ "error": "nope" }),
        };
        assert_eq!(
            ApiError::UpstreamCarbon(upstream()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::UpstreamCovid(upstream()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn method_is_named() {
        assert_eq!(
            ApiError::InvalidMethod(Method::DELETE).to_string(),
            "Invalid request method DELETE"
        );
    }
}
