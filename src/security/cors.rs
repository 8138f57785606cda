//! CORS enforcement against a trusted-origin allow-list.
//!
//! # Responsibilities
//! - Reflect `Access-Control-Allow-Origin` for trusted origins only
//! - Short-circuit preflight requests before they reach rate limiting
//! - Mark every response as varying on Origin
//!
//! # Design Decisions
//! - Exact-match allow-list; no wildcard origins
//! - Untrusted origins get an ordinary response without CORS headers;
//!   the browser enforces the rest

use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::CorsConfig;
use crate::http::pipeline::{Flow, Interceptor, RequestContext};

const ALLOW_METHODS: &str = "GET, OPTIONS";
const ALLOW_HEADERS: &str = "Authorization, Content-Type";

pub struct CorsInterceptor {
    trusted_origins: Vec<String>,
}

impl CorsInterceptor {
    pub fn new(config: CorsConfig) -> Self {
        Self {
            trusted_origins: config.trusted_origins,
        }
    }

    fn is_trusted(&self, origin: &str) -> bool {
        self.trusted_origins.iter().any(|t| t == origin)
    }
}

impl Interceptor for CorsInterceptor {
    fn name(&self) -> &'static str {
        "cors"
    }

    fn before(&self, ctx: &mut RequestContext, req: Request<Body>) -> Flow {
        let origin = req
            .headers()
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let Some(origin) = origin.filter(|o| self.is_trusted(o)) else {
            return Flow::Continue(req);
        };

        let preflight = req.method() == Method::OPTIONS
            && req
                .headers()
                .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);

        if preflight {
            return Flow::Halt(preflight_response(&origin));
        }

        ctx.allowed_origin = Some(origin);
        Flow::Continue(req)
    }

    fn after(&self, ctx: &RequestContext, mut res: Response) -> Response {
        res.headers_mut()
            .append(header::VARY, HeaderValue::from_static("Origin"));

        if let Some(value) = ctx
            .allowed_origin
            .as_deref()
            .and_then(|o| HeaderValue::from_str(o).ok())
        {
            res.headers_mut()
                .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }

        res
    }
}

fn preflight_response(origin: &str) -> Response {
    let mut res = StatusCode::OK.into_response();
    let headers = res.headers_mut();

    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }

    res
}
