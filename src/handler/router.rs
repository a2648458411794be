//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method and size checks, route
//! matching, dispatch, and access logging.

use crate::api;
use crate::config::{AppState, StaticFilesConfig};
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

const LIVENESS_PATH: &str = "/healthz";
const READINESS_PATH: &str = "/readyz";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read; every parameter travels in the URI.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let mut response = route_request(&req, &state).await;

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if state.access_log_enabled() {
        log_access(&req, peer_addr, &response, started, &state);
    }
    Ok(response)
}

/// Route request based on path and configuration
async fn route_request<B>(req: &Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let method = req.method();
    let path = req.uri().path();

    // 1. Preflight and body size
    if method == Method::OPTIONS {
        return http::build_options_response(state.config.http.enable_cors);
    }
    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return resp;
    }

    // 2. Health check endpoints
    if path == LIVENESS_PATH || path == READINESS_PATH {
        return http::build_health_response("ok");
    }

    // 3. Home page redirect
    if path == "/" {
        return match *method {
            Method::GET | Method::HEAD => http::build_redirect_response(
                &state.config.static_files.home,
                StatusCode::TEMPORARY_REDIRECT,
            ),
            _ => http::build_405_response("GET, HEAD"),
        };
    }

    // 4. Activities API
    if let Some(resp) = api::handle_activities(method, path, req.uri().query(), state).await {
        return resp;
    }

    // 5. Front-end assets
    let assets = &state.config.static_files;
    if is_under_mount(path, &assets.mount) {
        return serve_static(req, assets, state.access_log_enabled()).await;
    }

    http::build_404_response()
}

async fn serve_static<B>(
    req: &Request<B>,
    assets: &StaticFilesConfig,
    access_log: bool,
) -> Response<Full<Bytes>> {
    let method = req.method();
    if method != Method::GET && method != Method::HEAD {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return http::build_405_response("GET, HEAD");
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head: method == Method::HEAD,
        if_none_match: header_string(req, "if-none-match"),
        access_log,
    };
    static_files::serve_directory(&ctx, &assets.dir, &assets.mount, &assets.index_files).await
}

/// Whether `path` is `mount` itself or below it
fn is_under_mount(path: &str, mount: &str) -> bool {
    let mount = mount.trim_end_matches('/');
    path.strip_prefix(mount)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn log_access<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
    state: &AppState,
) {
    use hyper::body::Body;

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or_default();
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::NoopMirror;
    use http_body_util::BodyExt;

    fn state() -> Arc<AppState> {
        let mut state = AppState::for_tests(Arc::new(NoopMirror));
        state.config.logging.access_log = false;
        Arc::new(state)
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> Response<Full<Bytes>> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap();
        handle_request(req, peer(), Arc::clone(state)).await.unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_front_end() {
        let state = state();
        let resp = send(&state, Method::GET, "/").await;
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(resp.headers()["Location"], "/static/index.html");

        let resp = send(&state, Method::POST, "/").await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_activities_are_routed() {
        let state = state();
        let resp = send(&state, Method::GET, "/activities").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Server"], "Mergington-Activities/0.1");

        let resp = send(
            &state,
            Method::POST,
            "/activities/Soccer%20Team/signup?email=zack%40mergington.edu",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Signed up zack@mergington.edu for Soccer Team");
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let state = state();
        let resp = send(&state, Method::GET, "/nope").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"detail":"Not Found"}"#);
    }

    #[tokio::test]
    async fn test_health_and_options() {
        let state = state();
        assert_eq!(send(&state, Method::GET, "/healthz").await.status(), StatusCode::OK);
        assert_eq!(send(&state, Method::GET, "/readyz").await.status(), StatusCode::OK);

        let resp = send(&state, Method::OPTIONS, "/activities").await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(resp.headers().contains_key("Allow"));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let state = state();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/activities/Chess%20Club/signup?email=zack@mergington.edu")
            .header("content-length", "2000000")
            .body(())
            .unwrap();
        let resp = handle_request(req, peer(), Arc::clone(&state)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_static_mount_rejects_writes() {
        let state = state();
        let resp = send(&state, Method::DELETE, "/static/app.js").await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_mount_boundary() {
        assert!(is_under_mount("/static", "/static"));
        assert!(is_under_mount("/static/app.js", "/static/"));
        assert!(!is_under_mount("/staticfiles/app.js", "/static"));
        assert!(!is_under_mount("/", "/static"));
    }
}
