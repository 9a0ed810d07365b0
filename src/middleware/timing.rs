//! Process-time header middleware.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub const X_PROCESS_TIME: &str = "x-process-time";

/// Adds `X-Process-Time` (seconds, fractional) to every response
pub async fn process_time(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(request).await;

    let elapsed = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&elapsed.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(X_PROCESS_TIME), value);
    }

    response
}
