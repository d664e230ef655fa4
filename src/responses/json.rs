// responses/json.rs
use crate::errors::{ResultResp, ServerError};
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

/// The map client is served from another origin.
pub const ALLOW_ORIGIN: &str = "*";

/// Serialize `value` as a 200 JSON response with CORS headers.
pub fn json_response<T: Serialize + ?Sized>(value: &T) -> ResultResp {
    let body = serde_json::to_vec(value)?;
    json_body(200, body)
}

pub(crate) fn json_body(status: u16, body: Vec<u8>) -> ResultResp {
    let resp: Response = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.essence_str())
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .body(Body::from(body))
        .map_err(|e| ServerError::InternalError(e.to_string()))?;
    Ok(resp)
}
