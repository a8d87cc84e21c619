//! HTTP Middleware
//!
//! 请求耗时与 HTTP 状态码日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 请求日志中间件
///
/// 记录每个请求的耗时；状态码为 4xx / 5xx 时提升日志级别。
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(method = %method, uri = %uri, status = status.as_u16(), elapsed_ms, "HTTP server error");
    } else if status.is_client_error() {
        tracing::warn!(method = %method, uri = %uri, status = status.as_u16(), elapsed_ms, "HTTP client error");
    } else {
        tracing::debug!(method = %method, uri = %uri, status = status.as_u16(), elapsed_ms, "HTTP request handled");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::util::ServiceExt;

    async fn slow_handler() -> &'static str {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        "done"
    }

    async fn rejected_handler() -> StatusCode {
        StatusCode::PAYLOAD_TOO_LARGE
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/slow", post(slow_handler))
            .route("/rejected", post(rejected_handler))
            .layer(axum::middleware::from_fn(request_logging_middleware))
    }

    #[tokio::test]
    async fn test_response_passes_through() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/slow")
            .body(Body::empty())
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_client_error_status_is_preserved() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/rejected")
            .body(Body::empty())
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
