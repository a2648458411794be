// API module entry
// Activities signup sheet endpoints

mod handlers;
mod params;
mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::logger;

pub use params::{parse_route, ApiRoute};
pub use response::{error_response, json_response, message_response};

/// Activities route handler
///
/// Dispatches to handler functions based on request path and method.
/// Returns `None` when `path` is not an activities route.
pub async fn handle_activities(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Option<Response<Full<Bytes>>> {
    let route = parse_route(path)?;

    let response = match (method, &route) {
        (&Method::GET | &Method::HEAD, ApiRoute::List) => handlers::handle_list(state).await,
        (&Method::POST, ApiRoute::Signup(activity)) => {
            handlers::handle_signup(state, activity, query).await
        }
        (&Method::DELETE, ApiRoute::Unregister(activity)) => {
            handlers::handle_unregister(state, activity, query).await
        }
        _ => http::build_405_response(route.allowed_methods()),
    };

    log_api_request(method, path, response.status());
    Some(response)
}

fn log_api_request(method: &Method, path: &str, status: StatusCode) {
    let message = format!("[API] {method} {path} - {}", status.as_u16());
    if status.is_server_error() {
        logger::log_error(&message);
    } else {
        logger::log_debug(&message);
    }
}
