//! HTTP response building module
//!
//! Provides builders for various HTTP status code responses, decoupled from specific business logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Methods accepted anywhere on the server
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, DELETE, OPTIONS";

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build a JSON error response with a `detail` message
pub fn build_detail_response(status: StatusCode, detail: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "detail": detail }).to_string();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(detail.to_string())))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_detail_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response listing the methods `allow`ed on the path
pub fn build_405_response(allow: &str) -> Response<Full<Bytes>> {
    let mut response = build_detail_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    if let Ok(value) = allow.parse() {
        response.headers_mut().insert("Allow", value);
    }
    response
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_detail_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

/// Build redirect response with the given status `code`
pub fn build_redirect_response(target: &str, code: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(code)
        .header("Location", target)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error(code.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build liveness/readiness probe response
pub fn build_health_response(status: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "status": status }).to_string();
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build success response with cache control
pub fn build_cached_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_405_lists_allowed_methods() {
        let resp = build_405_response("POST, OPTIONS");
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["Allow"], "POST, OPTIONS");
    }

    #[test]
    fn test_options_cors_headers() {
        let plain = build_options_response(false);
        assert!(plain.headers().get("Access-Control-Allow-Origin").is_none());

        let cors = build_options_response(true);
        assert_eq!(cors.status(), StatusCode::NO_CONTENT);
        assert_eq!(cors.headers()["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn test_redirect_location() {
        let resp = build_redirect_response("/static/index.html", StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["Location"], "/static/index.html");
    }

    #[test]
    fn test_head_response_keeps_length() {
        let resp = build_cached_response(Bytes::from_static(b"hello"), "text/plain", "\"x\"", true);
        assert_eq!(resp.headers()["Content-Length"], "5");
    }
}
