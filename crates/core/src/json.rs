//! JSON conveniences layered on the core: a response builder for
//! handlers and a client wrapper that speaks JSON both ways.

use serde::Serialize;

use crate::client::{ClientResponse, RequestOptions, request};
use crate::error::{HttpotError, Result};
use crate::protocol::ResponseHeader;
use crate::router::RouteResponse;

/// Build a JSON route response: `Content-Type: application/json` plus the
/// serialized body. `Content-Length` is injected later by the router's
/// post-processing.
pub fn json<T: Serialize>(
    value: &T,
    status_code: u16,
) -> std::result::Result<RouteResponse, serde_json::Error> {
    Ok(RouteResponse {
        header: ResponseHeader::new()
            .set_status_code(status_code)
            .add_header("Content-Type", "application/json"),
        body: Some(serde_json::to_string(value)?),
    })
}

/// Issue a request with a JSON body.
///
/// Serializes `body`, adds `Content-Type` and `Accept:
/// application/json` on top of whatever `options` already carries, and
/// delegates to [`request`].
pub fn request_json<T: Serialize>(
    url: &str,
    body: &T,
    options: &RequestOptions,
) -> Result<ClientResponse> {
    let mut options = options.clone();
    options.body =
        Some(serde_json::to_string(body).map_err(|e| HttpotError::InvalidBody(e.to_string()))?);
    options
        .headers
        .push(("Content-Type".to_string(), "application/json".to_string()));
    options
        .headers
        .push(("Accept".to_string(), "application/json".to_string()));
    request(url, &options)
}
