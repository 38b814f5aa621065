//! httpot — a minimal line-based, HTTP-like text wire protocol.
//!
//! Provides message framing and header parsing ([`protocol`]),
//! pattern-based request routing ([`router`]), and one-shot TCP
//! client/server transport ([`client`], [`server`], [`transport`]).
//! Intended for experimenting with custom HTTP-style protocols; the
//! companion `pot-server` binary layers an HTCPCP-style coffee-pot API on
//! top of it.
//!
//! Not real HTTP: every connection carries exactly one request, there is
//! no keep-alive, no pipelining, no chunked transfer, and the status-code
//! table is closed.

pub mod client;
pub mod error;
pub mod json;
pub mod protocol;
pub mod router;
pub mod server;
pub mod transport;

pub use client::{ClientResponse, RequestOptions, request};
pub use error::{HttpotError, ParseErrorKind, Result};
pub use protocol::{HeaderMap, RequestHeader, ResponseHeader};
pub use router::{HandlerError, HandlerRequest, RouteResponse, Router, RouterResponse};
pub use server::{Server, ServerConfig};
