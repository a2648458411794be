// Activities API handlers module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::params::email_from_query;
use super::response::{error_response, json_response, message_response};
use crate::config::AppState;

/// List every activity with its roster
pub async fn handle_list(state: &AppState) -> Response<Full<Bytes>> {
    let catalog = state.sheet.list().await;
    json_response(StatusCode::OK, &catalog)
}

/// Sign a student up for `activity`
pub async fn handle_signup(
    state: &AppState,
    activity: &str,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let result = match email_from_query(query) {
        Ok(email) => state.sheet.sign_up(activity, &email).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(message) => message_response(&message),
        Err(e) => error_response(&e),
    }
}

/// Remove a student from `activity`
pub async fn handle_unregister(
    state: &AppState,
    activity: &str,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let result = match email_from_query(query) {
        Ok(email) => state.sheet.unregister(activity, &email).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(message) => message_response(&message),
        Err(e) => error_response(&e),
    }
}
