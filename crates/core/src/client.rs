//! High-level one-shot client: URL validation, request assembly,
//! response parsing.

use std::time::Duration;

use url::Url;

use crate::error::{HttpotError, Result};
use crate::protocol::{HEADER_END, HeaderMap, RequestHeader, ResponseHeader};
use crate::transport::{self, DEFAULT_TIMEOUT};

/// Options for a single [`request`] call.
///
/// `headers` are applied on top of the request defaults (`Connection:
/// close`, `User-Agent`); `user_agent` overrides the default identity
/// without touching the other defaults.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub protocol: Option<String>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            headers: Vec::new(),
            body: None,
            protocol: None,
            timeout: None,
            user_agent: None,
        }
    }
}

impl RequestOptions {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            ..Self::default()
        }
    }
}

/// A parsed response as seen by the client.
#[derive(Debug)]
pub struct ClientResponse {
    pub protocol: String,
    pub status_code: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl ClientResponse {
    /// Whether the response declares a JSON media type. Parameters after
    /// `"; "` (e.g. a charset) are ignored.
    pub fn is_json(&self) -> bool {
        self.headers
            .get("Content-Type")
            .map(|value| value.split("; ").next() == Some("application/json"))
            .unwrap_or(false)
    }
}

/// Issue a one-shot request to `url`.
///
/// Validates the URL before any I/O (scheme-qualified, with a host; the
/// port defaults to 80). Builds the request header with `Host`, method
/// and path from the URL, applies `options`, injects `Content-Length`
/// with the exact body byte length when a body is present and no explicit
/// value was given, then runs the exchange through
/// [`transport::execute`]. A peer that closes without sending anything
/// yields [`HttpotError::NoData`]; an unknown status code in the reply is
/// a parse error.
pub fn request(url: &str, options: &RequestOptions) -> Result<ClientResponse> {
    let parsed = Url::parse(url).map_err(|e| HttpotError::InvalidUrl(e.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| HttpotError::InvalidUrl("URL has no host".to_string()))?
        .to_string();
    let port = parsed.port_or_known_default().unwrap_or(80);

    // Host header mirrors the URL authority, port included when explicit.
    let host_header = match parsed.port() {
        Some(p) => format!("{host}:{p}"),
        None => host.clone(),
    };

    let mut header = match &options.user_agent {
        Some(agent) => RequestHeader::with_agent(agent),
        None => RequestHeader::new(),
    };
    header = header
        .set_host(&host_header)
        .set_method(&options.method)
        .set_path(parsed.path());
    if let Some(protocol) = &options.protocol {
        header = header.set_protocol(protocol);
    }
    for (key, value) in &options.headers {
        header = header.add_header(key, value);
    }

    let body = options.body.as_ref().map(|b| b.as_bytes());
    if let Some(bytes) = body {
        if header.header("Content-Length").is_none() {
            header = header.add_header("Content-Length", &bytes.len().to_string());
        }
    }

    let mut request_bytes = header.to_wire_string().into_bytes();
    if let Some(bytes) = body {
        request_bytes.extend_from_slice(bytes);
    }

    let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT);
    let raw = transport::execute(&host, port, &request_bytes, timeout)?;
    if raw.is_empty() {
        return Err(HttpotError::NoData);
    }

    let text = String::from_utf8_lossy(&raw);
    let (header_block, body_text) = match text.split_once(HEADER_END) {
        Some((head, body)) => (head, body),
        None => (text.as_ref(), ""),
    };
    let response_header = ResponseHeader::parse(header_block)?;

    Ok(ClientResponse {
        protocol: response_header.protocol().to_string(),
        status_code: response_header.status_code(),
        headers: response_header.headers().clone(),
        body: body_text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_fails_before_io() {
        let err = request("not a url", &RequestOptions::default()).unwrap_err();
        assert!(matches!(err, HttpotError::InvalidUrl(_)));
    }

    #[test]
    fn url_without_host_fails() {
        let err = request("data:text/plain,hi", &RequestOptions::default()).unwrap_err();
        assert!(matches!(err, HttpotError::InvalidUrl(_)));
    }

    #[test]
    fn is_json_checks_media_type() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "application/json; charset=utf-8");
        let response = ClientResponse {
            protocol: "HTTP/1.0".to_string(),
            status_code: 200,
            headers,
            body: "{}".to_string(),
        };
        assert!(response.is_json());
    }

    #[test]
    fn is_json_false_without_content_type() {
        let response = ClientResponse {
            protocol: "HTTP/1.0".to_string(),
            status_code: 200,
            headers: HeaderMap::new(),
            body: String::new(),
        };
        assert!(!response.is_json());
    }
}
