//! Request logging middleware.
//!
//! Logs every HTTP request with method, path, status code, latency and, on
//! protected routes, the authenticated username.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Username resolved by the auth middleware, carried on the response so the
/// outer logging layer can see who made the call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestUser(pub String);

/// Middleware that logs HTTP requests with timing information.
///
/// Logs at INFO level for completed requests, WARN level for 5xx.
/// Query strings are left out since they may carry user input.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    debug!(method = %method, path = %path, "Request started");

    let response = next.run(request).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    let user = response
        .extensions()
        .get::<RequestUser>()
        .map(|u| u.0.as_str())
        .unwrap_or("-");

    if status >= 500 {
        warn!(method = %method, path = %path, status, user, latency_ms, "Request failed (5xx)");
    } else {
        info!(method = %method, path = %path, status, user, latency_ms, "Request completed");
    }

    response
}
