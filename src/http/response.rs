//! JSON response envelopes.
//!
//! Every body this service sends is a JSON envelope. Error envelopes carry
//! a single client-safe message; internal detail stays in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::status::StatusError;

pub const STALE_DATA_MESSAGE: &str = "Bay status information is outdated and unavailable";

/// An envelope body with the given status.
pub fn json_body(status: StatusCode, body: serde_json::Value) -> Response {
    (status, Json(body)).into_response()
}

/// `{"error": message}` with the given status.
pub fn error_message(status: StatusCode, message: &str) -> Response {
    json_body(status, json!({ "error": message }))
}

/// `{"error": ...}` using the status code's canonical reason phrase.
pub fn error_body(status: StatusCode) -> Response {
    error_message(status, status.canonical_reason().unwrap_or("Unknown"))
}

/// Failures a handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Aggregation failed; detail is logged, the client sees a generic 500.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Data is valid but older than the freshness threshold.
    #[error("bay status is stale")]
    Stale,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Stale => error_message(StatusCode::UNPROCESSABLE_ENTITY, STALE_DATA_MESSAGE),
            ApiError::Status(err) => {
                tracing::error!(err = %err, detail = ?err, "request failed with internal error");
                error_body(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::codec::CodecError;

    #[test]
    fn test_error_body_uses_reason_phrase() {
        let res = error_body(StatusCode::NOT_FOUND);
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_stale_maps_to_unprocessable() {
        let res = ApiError::Stale.into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_domain_error_maps_to_generic_500() {
        let err = ApiError::Status(StatusError::Codec(CodecError::UnknownStatusCode(99)));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
