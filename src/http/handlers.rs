//! Route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use serde_json::json;

use crate::http::response::{self, ApiError};
use crate::http::server::AppState;
use crate::status::freshness;

pub async fn healthcheck(State(state): State<AppState>) -> Response {
    let environment = if state.config.dev {
        "development"
    } else {
        "production"
    };

    response::json_body(
        StatusCode::OK,
        json!({
            "status": "available",
            "system_info": {
                "environment": environment,
                "version": env!("CARGO_PKG_VERSION"),
            },
        }),
    )
}

/// Latest status for all bays, gated on reading freshness.
pub async fn bays_status(State(state): State<AppState>) -> Result<Response, ApiError> {
    let (bays, last_update) = state.bays.latest().await?;

    let now = Utc::now();
    if !state.config.dev && freshness::is_stale(now, last_update) {
        return Err(ApiError::Stale);
    }

    Ok(response::json_body(
        StatusCode::OK,
        json!({ "bays": bays, "time": now }),
    ))
}

/// Analytics are not computed yet; the route is reserved.
pub async fn bays_analytics() -> Response {
    response::json_body(StatusCode::OK, json!({ "analytics": null }))
}

pub async fn not_found() -> Response {
    response::error_body(StatusCode::NOT_FOUND)
}

pub async fn method_not_allowed() -> Response {
    response::error_body(StatusCode::METHOD_NOT_ALLOWED)
}
