//! Pattern-based request routing.
//!
//! Routes live in a three-level table: protocol → path pattern → method.
//! Path patterns are literal paths in which any `:name:` token captures
//! exactly one segment of word characters, e.g. `/pot-:id:/:type:`
//! matches `/pot-3/coffee` with params `{id: "3", type: "coffee"}`.
//! Method `*` acts as a catch-all for any method not explicitly
//! registered on the same pattern.
//!
//! Routing mismatches never raise errors: an unknown protocol yields
//! `400`, an unmatched path `404`, an unmatched method with no catch-all
//! `405`. Only a fault inside a handler surfaces as an `Err`, which the
//! server converts to a `500` at the connection boundary.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::protocol::{DEFAULT_PROTOCOL, HeaderMap, ResponseHeader};

/// Method token under which a catch-all handler is registered.
pub const CATCH_ALL_METHOD: &str = "*";

/// Error type handlers may fail with; converted to a `500` response at the
/// connection boundary.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// What a handler receives: the request headers, the body (if a
/// `Content-Length` was declared) and the extracted path parameters
/// (`None` when the matched pattern had no tokens).
#[derive(Debug)]
pub struct HandlerRequest {
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub params: Option<HashMap<String, String>>,
}

/// What a handler returns: a response header and an optional text body.
#[derive(Debug)]
pub struct RouteResponse {
    pub header: ResponseHeader,
    pub body: Option<String>,
}

/// A transport-ready response: header plus byte body, with
/// `Content-Length` injected when the handler omitted it.
#[derive(Debug)]
pub struct RouterResponse {
    pub header: ResponseHeader,
    pub body: Option<Vec<u8>>,
}

impl RouterResponse {
    /// Serialize header and body into a single wire buffer.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut out = self.header.to_wire_string().into_bytes();
        if let Some(body) = &self.body {
            out.extend_from_slice(body);
        }
        out
    }
}

/// Route handler. Synchronous by design: one request per connection,
/// handled to completion on the connection's thread.
pub type Handler =
    Box<dyn Fn(HandlerRequest) -> std::result::Result<RouteResponse, HandlerError> + Send + Sync>;

static PARAM_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":(\w+):").expect("param token regex is valid"));

/// One registered path pattern: its precompiled anchored matcher, the
/// parameter names in token order, and the method → handler map.
struct RouteEntry {
    pattern: String,
    matcher: Regex,
    param_names: Vec<String>,
    handlers: HashMap<String, Handler>,
}

impl RouteEntry {
    /// Compile `pattern` once: literal text is regex-escaped, each
    /// `:name:` token becomes a `(\w+)` capture, and the whole expression
    /// is anchored.
    fn new(pattern: &str) -> Self {
        let mut source = String::from("^");
        let mut param_names = Vec::new();
        let mut last = 0;
        for captures in PARAM_TOKEN.captures_iter(pattern) {
            let token = captures.get(0).expect("regex match has a group 0");
            source.push_str(&regex::escape(&pattern[last..token.start()]));
            source.push_str(r"(\w+)");
            param_names.push(captures[1].to_string());
            last = token.end();
        }
        source.push_str(&regex::escape(&pattern[last..]));
        source.push('$');

        RouteEntry {
            pattern: pattern.to_string(),
            matcher: Regex::new(&source).expect("escaped pattern compiles"),
            param_names,
            handlers: HashMap::new(),
        }
    }

    /// Test `path` against the matcher; on success, extract parameter
    /// values positionally in token order.
    fn matches(&self, path: &str) -> Option<Option<HashMap<String, String>>> {
        let captures = self.matcher.captures(path)?;
        if self.param_names.is_empty() {
            return Some(None);
        }
        let params = self
            .param_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), captures[i + 1].to_string()))
            .collect();
        Some(Some(params))
    }
}

/// The route table.
///
/// Populated during setup via [`add_route`](Self::add_route); logically
/// read-only once serving begins ([`Server`](crate::Server) takes it by
/// value). Patterns are tried in registration order; the first match
/// wins, with no specificity sorting.
pub struct Router {
    routes: HashMap<String, Vec<RouteEntry>>,
    agent: String,
}

impl Router {
    pub fn new() -> Self {
        Self::with_agent(crate::protocol::DEFAULT_AGENT)
    }

    /// Create a router whose synthesized responses (400/404/405) carry a
    /// custom `Server` identity.
    pub fn with_agent(agent: &str) -> Self {
        Router {
            routes: HashMap::new(),
            agent: agent.to_string(),
        }
    }

    /// Register `handler` for `method` on `path` under the default
    /// protocol. Re-registering the same triple silently overwrites.
    pub fn add_route<H>(&mut self, method: &str, path: &str, handler: H)
    where
        H: Fn(HandlerRequest) -> std::result::Result<RouteResponse, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        self.add_route_for_protocol(method, path, DEFAULT_PROTOCOL, handler);
    }

    /// Register `handler` for `method` on `path` under an explicit
    /// protocol string.
    pub fn add_route_for_protocol<H>(&mut self, method: &str, path: &str, protocol: &str, handler: H)
    where
        H: Fn(HandlerRequest) -> std::result::Result<RouteResponse, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        let entries = self.routes.entry(protocol.to_string()).or_default();
        let entry = match entries.iter_mut().find(|e| e.pattern == path) {
            Some(entry) => entry,
            None => {
                entries.push(RouteEntry::new(path));
                entries.last_mut().expect("entry was just pushed")
            }
        };
        entry.handlers.insert(method.to_string(), Box::new(handler));
    }

    /// Dispatch a parsed request.
    ///
    /// Returns `Ok` for every routing outcome, including the synthesized
    /// `400`/`404`/`405` responses. `Err` means the matched handler
    /// itself failed.
    pub fn handle_route(
        &self,
        method: &str,
        protocol: &str,
        path: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> std::result::Result<RouterResponse, HandlerError> {
        let Some(entries) = self.routes.get(protocol) else {
            return Ok(self.status_response(protocol, 400));
        };

        let Some((entry, params)) = entries
            .iter()
            .find_map(|e| e.matches(path).map(|params| (e, params)))
        else {
            return Ok(self.status_response(protocol, 404));
        };

        let handler = match entry.handlers.get(method) {
            Some(handler) => handler,
            None => match entry.handlers.get(CATCH_ALL_METHOD) {
                Some(handler) => handler,
                None => return Ok(self.status_response(protocol, 405)),
            },
        };

        let response = handler(HandlerRequest {
            headers,
            body,
            params,
        })?;
        Ok(finalize(response))
    }

    fn status_response(&self, protocol: &str, code: u16) -> RouterResponse {
        RouterResponse {
            header: ResponseHeader::with_agent(&self.agent)
                .set_protocol(protocol)
                .set_status_code(code),
            body: None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Post-process a handler response into its transport form: convert the
/// body to bytes and inject `Content-Length` (exact byte length) when the
/// handler omitted it.
fn finalize(response: RouteResponse) -> RouterResponse {
    let mut header = response.header;
    let body = response.body.map(String::into_bytes);
    if let Some(bytes) = &body {
        if header.header("Content-Length").is_none() {
            header.insert_header("Content-Length", &bytes.len().to_string());
        }
    }
    RouterResponse { header, body }
}
