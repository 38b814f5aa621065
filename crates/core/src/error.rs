//! Error types for the httpot protocol library.

use std::fmt;

/// Errors that can occur across the protocol stack.
///
/// Variants map to specific failure modes:
///
/// - **Validation**: [`InvalidUrl`](Self::InvalidUrl) — rejected before any
///   I/O happens.
/// - **Protocol**: [`Parse`](Self::Parse) — malformed or unparseable wire
///   messages, including unknown status codes.
/// - **Transport**: [`Io`](Self::Io), [`Timeout`](Self::Timeout),
///   [`NoData`](Self::NoData) — socket failures on the client path.
/// - **Server**: [`NotStarted`](Self::NotStarted),
///   [`AlreadyRunning`](Self::AlreadyRunning).
///
/// Routing mismatches (unknown protocol, unmatched path or method) are
/// **not** errors: the [`Router`](crate::Router) encodes them as `400`,
/// `404` and `405` responses.
#[derive(Debug, thiserror::Error)]
pub enum HttpotError {
    /// Underlying I/O or socket error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The URL handed to the client could not be parsed or lacks a host.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded for the wire.
    #[error("body could not be encoded: {0}")]
    InvalidBody(String),

    /// Failed to parse a wire message.
    #[error("parse error: {kind}")]
    Parse { kind: ParseErrorKind },

    /// The client's idle timeout elapsed before the peer closed the
    /// connection. The socket is dropped; no partial data is returned.
    #[error("connection timed out")]
    Timeout,

    /// The peer closed the connection without sending any bytes.
    #[error("no data received")]
    NoData,

    /// [`Server::start`](crate::Server::start) has not been called yet.
    #[error("server not started")]
    NotStarted,

    /// [`Server::start`](crate::Server::start) was called while already running.
    #[error("server already running")]
    AlreadyRunning,
}

/// Specific kind of wire parse failure.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input was empty (no start line).
    EmptyHeader,
    /// Start line did not have the expected space-separated fields.
    InvalidStartLine,
    /// A header line did not contain a `": "` separator.
    InvalidHeaderLine,
    /// Status-line code is not a member of the fixed status table.
    UnknownStatusCode(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHeader => write!(f, "empty header block"),
            Self::InvalidStartLine => write!(f, "invalid start line"),
            Self::InvalidHeaderLine => write!(f, "invalid header line"),
            Self::UnknownStatusCode(code) => write!(f, "unknown status code: {code}"),
        }
    }
}

/// Convenience alias for `Result<T, HttpotError>`.
pub type Result<T> = std::result::Result<T, HttpotError>;
