// responses/errors.rs
use crate::errors::ServerError;
use crate::responses::json::json_body;
use astra::{Body, Response};
use http::StatusCode;
use serde_json::json;
use tracing::error;

/// Convert a ServerError into a JSON error response.
///
/// Store and internal errors are logged in full; the client only sees a generic message.
pub fn error_to_response(err: ServerError) -> Response {
    if err.status() >= 500 {
        error!(error = %err, "request failed");
    }

    let body = json!({ "error": err.public_message() }).to_string();
    json_body(err.status(), body.into_bytes()).unwrap_or_else(|_| {
        let mut resp = Response::new(Body::from("Internal Server Error"));
        *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        resp
    })
}
