//! Structured request logging middleware
//!
//! Emits one `info` event per request with method, path, status and timing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Maximum path length before truncation
const MAX_PATH_LENGTH: usize = 100;

/// Truncation suffix for long paths
const TRUNCATION_SUFFIX: &str = "...";

/// Request logging middleware
///
/// Logs after the inner service has produced a response, so the status of
/// timed-out and failed requests is recorded too.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = truncate_string(request.uri().path(), MAX_PATH_LENGTH);

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}

/// Truncate string to max length (in characters) with suffix
fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let keep = max_length.saturating_sub(TRUNCATION_SUFFIX.len());
        let truncated: String = input.chars().take(keep).collect();
        format!("{truncated}{TRUNCATION_SUFFIX}")
    }
}
