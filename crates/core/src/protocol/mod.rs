//! The line-based text wire protocol.
//!
//! Messages follow simplified HTTP/1.0 syntax: a start line, header lines,
//! a blank line, then an optional body. One message per TCP connection.
//!
//! ```text
//! POST /pot-0/coffee HTTP/1.0\r\n
//! Connection: close\r\n
//! Content-Length: 5\r\n
//! \r\n
//! start
//! ```
//!
//! Request start line: `METHOD PATH PROTOCOL`. Response start line:
//! `PROTOCOL CODE REASON`, where the reason phrase comes from the fixed
//! [`status`] table on serialization and is discarded on parse.
//!
//! Differences from real HTTP worth knowing about:
//! - `Connection: close` is the only mode; there is no keep-alive.
//! - No chunked transfer encoding; bodies are delimited by
//!   `Content-Length` and connection close.
//! - The status-code table is closed: parsing a response whose code is not
//!   in [`status`] is a hard protocol error.

pub mod headers;
pub mod request;
pub mod response;
pub mod status;

pub use headers::{HeaderMap, normalize_key};
pub use request::RequestHeader;
pub use response::ResponseHeader;

/// Message line delimiter.
pub const NEWLINE: &str = "\r\n";

/// Blank-line terminator separating the header block from the body.
pub const HEADER_END: &str = "\r\n\r\n";

/// Protocol string used when none is given explicitly.
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.0";

/// Identity string advertised in default `User-Agent` and `Server` headers.
/// Both can be overridden per request/server (see
/// [`RequestOptions`](crate::client::RequestOptions) and
/// [`ServerConfig`](crate::server::ServerConfig)).
pub const DEFAULT_AGENT: &str = "httpot/0.1.0";
