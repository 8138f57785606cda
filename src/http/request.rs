//! Request ID assignment.
//!
//! # Design Decisions
//! - Request ID added as early as possible so every log line carries it
//! - A client-supplied `x-request-id` is honored, otherwise a UUID v4 is
//!   generated

use axum::body::Body;
use axum::extract::Request;
use axum::http::header::HeaderValue;
use axum::response::Response;
use uuid::Uuid;

use crate::http::pipeline::{Flow, Interceptor, RequestContext};

pub const X_REQUEST_ID: &str = "x-request-id";

/// First pipeline stage: tags the request and the response with an ID.
pub struct RequestIdInterceptor;

impl Interceptor for RequestIdInterceptor {
    fn name(&self) -> &'static str {
        "request-id"
    }

    fn before(&self, ctx: &mut RequestContext, mut req: Request<Body>) -> Flow {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Ok(value) = HeaderValue::from_str(&id) {
            req.headers_mut().insert(X_REQUEST_ID, value);
        }
        ctx.request_id = Some(id);

        Flow::Continue(req)
    }

    fn after(&self, ctx: &RequestContext, mut res: Response) -> Response {
        if let Some(value) = ctx
            .request_id
            .as_deref()
            .and_then(|id| HeaderValue::from_str(id).ok())
        {
            res.headers_mut().insert(X_REQUEST_ID, value);
        }
        res
    }
}
