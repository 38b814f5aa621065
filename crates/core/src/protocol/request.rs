use crate::error::{HttpotError, ParseErrorKind, Result};
use crate::protocol::headers::HeaderMap;
use crate::protocol::{DEFAULT_AGENT, DEFAULT_PROTOCOL, NEWLINE};

/// A request preamble: request line plus headers.
///
/// Serializes to the wire format
///
/// ```text
/// GET / HTTP/1.0\r\n
/// Connection: close\r\n
/// User-Agent: httpot/0.1.0\r\n
/// \r\n
/// ```
///
/// Built with chained setters, then serialized once via
/// [`to_wire_string`](Self::to_wire_string). Defaults: method `GET`,
/// path `/`, protocol `HTTP/1.0`, headers `Connection: close` and a
/// `User-Agent` identity.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    protocol: String,
    method: String,
    path: String,
    headers: HeaderMap,
}

impl RequestHeader {
    pub fn new() -> Self {
        Self::with_agent(DEFAULT_AGENT)
    }

    /// Create a request header with a custom `User-Agent` identity.
    pub fn with_agent(agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Connection", "close");
        headers.insert("User-Agent", agent);
        RequestHeader {
            protocol: DEFAULT_PROTOCOL.to_string(),
            method: "GET".to_string(),
            path: "/".to_string(),
            headers,
        }
    }

    pub fn set_protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    pub fn set_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    pub fn set_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Sets the `Host` header.
    pub fn set_host(mut self, host: &str) -> Self {
        self.headers.insert("Host", host);
        self
    }

    /// Add a header. The key is normalized before storage.
    pub fn add_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up a header value by key (normalized before comparison).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Serialize to wire text: request line, header lines, blank-line
    /// terminator.
    pub fn to_wire_string(&self) -> String {
        let mut out = format!("{} {} {}{NEWLINE}", self.method, self.path, self.protocol);
        for (key, value) in self.headers.iter() {
            out.push_str(&format!("{key}: {value}{NEWLINE}"));
        }
        out.push_str(NEWLINE);
        out
    }

    /// Parse a raw header block (without the body) into a request header.
    ///
    /// The first line must carry `METHOD PATH PROTOCOL`; remaining
    /// non-empty lines must be `Key: Value` pairs. Header keys are
    /// normalized. Headers present in the block fully replace the
    /// constructor defaults.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut lines = raw.split(NEWLINE);

        let request_line = lines.next().filter(|l| !l.is_empty()).ok_or(HttpotError::Parse {
            kind: ParseErrorKind::EmptyHeader,
        })?;

        let parts: Vec<&str> = request_line.split(' ').collect();
        if parts.len() != 3 {
            return Err(HttpotError::Parse {
                kind: ParseErrorKind::InvalidStartLine,
            });
        }

        let mut headers = HeaderMap::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once(": ").ok_or(HttpotError::Parse {
                kind: ParseErrorKind::InvalidHeaderLine,
            })?;
            headers.insert(key, value);
        }

        Ok(RequestHeader {
            protocol: parts[2].to_string(),
            method: parts[0].to_string(),
            path: parts[1].to_string(),
            headers,
        })
    }
}

impl Default for RequestHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let header = RequestHeader::new();
        assert_eq!(header.method(), "GET");
        assert_eq!(header.path(), "/");
        assert_eq!(header.protocol(), "HTTP/1.0");
        assert_eq!(header.header("Connection"), Some("close"));
        assert_eq!(header.header("User-Agent"), Some(DEFAULT_AGENT));
    }

    #[test]
    fn serialize_wire_format() {
        let header = RequestHeader::new()
            .set_method("POST")
            .set_path("/pot-0/coffee")
            .add_header("content-length", "5");
        let wire = header.to_wire_string();
        assert!(wire.starts_with("POST /pot-0/coffee HTTP/1.0\r\n"));
        assert!(wire.contains("Connection: close\r\n"));
        assert!(wire.contains("Content-Length: 5\r\n"));
        assert!(wire.ends_with("\r\n\r\n"));
    }

    #[test]
    fn parse_request_line_and_headers() {
        let raw = "BREW /pot-1/tea HTCPCP/1.0\r\nhost: localhost:1234\r\ncontent-length: 4";
        let header = RequestHeader::parse(raw).unwrap();
        assert_eq!(header.method(), "BREW");
        assert_eq!(header.path(), "/pot-1/tea");
        assert_eq!(header.protocol(), "HTCPCP/1.0");
        assert_eq!(header.header("Host"), Some("localhost:1234"));
        assert_eq!(header.header("Content-Length"), Some("4"));
    }

    #[test]
    fn parse_does_not_inject_defaults() {
        let header = RequestHeader::parse("GET / HTTP/1.0\r\nHost: x").unwrap();
        assert_eq!(header.header("Connection"), None);
        assert_eq!(header.header("User-Agent"), None);
    }

    #[test]
    fn roundtrip() {
        let header = RequestHeader::new()
            .set_method("POST")
            .set_path("/api/thing")
            .set_host("localhost:8080")
            .add_header("Content-Type", "application/json");
        let parsed = RequestHeader::parse(header.to_wire_string().trim_end_matches("\r\n")).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn parse_empty_fails() {
        assert!(RequestHeader::parse("").is_err());
    }

    #[test]
    fn parse_malformed_start_line_fails() {
        assert!(RequestHeader::parse("GET /").is_err());
        assert!(RequestHeader::parse("JUSTAMETHOD").is_err());
    }
}
