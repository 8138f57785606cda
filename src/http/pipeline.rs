//! Request interceptor pipeline.
//!
//! # Responsibilities
//! - Hold the ordered list of request interceptors
//! - Dispatch each request through before-hooks, handler, after-hooks
//! - Recover from panics anywhere below the dispatcher
//!
//! # Design Decisions
//! - One flat, inspectable list instead of nested closure wrapping
//! - A halted request still flows back through the after-hooks of the
//!   interceptors that already ran, so e.g. a 429 carries CORS headers
//! - Panic recovery is the dispatcher's own outermost duty: a panic
//!   unwinds past any hook, so it cannot be a list entry

use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use futures_util::FutureExt;

use crate::http::response;

/// Per-request state shared between hooks of one dispatch.
#[derive(Debug)]
pub struct RequestContext {
    /// Peer address of the connection, used as the rate-limit key.
    pub client_ip: IpAddr,

    /// Request ID assigned by the request-id interceptor.
    pub request_id: Option<String>,

    /// Origin header value, if it matched the trusted list.
    pub allowed_origin: Option<String>,
}

impl RequestContext {
    fn new(client_ip: IpAddr) -> Self {
        Self {
            client_ip,
            request_id: None,
            allowed_origin: None,
        }
    }
}

/// Outcome of a before-hook.
pub enum Flow {
    /// Pass the (possibly modified) request to the next stage.
    Continue(Request<Body>),

    /// Stop here and send this response; downstream stages never run.
    Halt(Response),
}

/// One stage of the request pipeline.
pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Runs before the handler, in list order.
    fn before(&self, _ctx: &mut RequestContext, req: Request<Body>) -> Flow {
        Flow::Continue(req)
    }

    /// Runs after the handler (or after a halt), in reverse list order.
    fn after(&self, _ctx: &RequestContext, res: Response) -> Response {
        res
    }
}

/// Ordered interceptor chain composed by a single dispatcher.
pub struct Pipeline {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Pipeline {
    pub fn new(interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self { interceptors }
    }

    /// Names in dispatch order, for startup logging.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    async fn run(&self, mut ctx: RequestContext, req: Request<Body>, next: Next) -> Response {
        let mut ran = 0;
        let mut halted = None;
        let mut req = Some(req);

        for interceptor in &self.interceptors {
            match interceptor.before(&mut ctx, req.take().unwrap()) {
                Flow::Continue(r) => {
                    req = Some(r);
                    ran += 1;
                }
                Flow::Halt(res) => {
                    halted = Some(res);
                    break;
                }
            }
        }

        let mut response = match halted {
            Some(res) => res,
            None => next.run(req.unwrap()).await,
        };

        for interceptor in self.interceptors[..ran].iter().rev() {
            response = interceptor.after(&ctx, response);
        }

        response
    }
}

/// Axum middleware entry point for the whole pipeline.
pub async fn dispatch(
    State(pipeline): State<Arc<Pipeline>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ctx = RequestContext::new(addr.ip());

    match AssertUnwindSafe(pipeline.run(ctx, req, next)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(panic = panic_message(&panic), "recovered from panic in request handling");
            response::error_body(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
