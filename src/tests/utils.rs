use crate::db::connection::Database;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;

/// Run a GET through the router the same way the server closure does,
/// turning errors into their HTTP responses.
pub fn get(db: &Database, uri: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    handle(req, db).unwrap_or_else(error_to_response)
}

pub fn body_json(resp: Response) -> serde_json::Value {
    let mut body = Vec::new();
    resp.into_body().reader().read_to_end(&mut body).unwrap();
    serde_json::from_slice(&body).unwrap_or_else(|e| panic!("body is not JSON: {e}"))
}
