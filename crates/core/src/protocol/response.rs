use crate::error::{HttpotError, ParseErrorKind, Result};
use crate::protocol::headers::HeaderMap;
use crate::protocol::{DEFAULT_AGENT, DEFAULT_PROTOCOL, NEWLINE, status};

/// A response preamble: status line plus headers.
///
/// Serializes to the wire format
///
/// ```text
/// HTTP/1.0 200 OK\r\n
/// Connection: close\r\n
/// Server: httpot/0.1.0\r\n
/// \r\n
/// ```
///
/// The reason phrase is looked up from the fixed [`status`] table on
/// serialization and discarded on parse. Defaults: status `200`, protocol
/// `HTTP/1.0`, headers `Connection: close` and a `Server` identity.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    protocol: String,
    status_code: u16,
    headers: HeaderMap,
}

impl ResponseHeader {
    pub fn new() -> Self {
        Self::with_agent(DEFAULT_AGENT)
    }

    /// Create a response header with a custom `Server` identity.
    pub fn with_agent(agent: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Connection", "close");
        headers.insert("Server", agent);
        ResponseHeader {
            protocol: DEFAULT_PROTOCOL.to_string(),
            status_code: 200,
            headers,
        }
    }

    pub fn set_protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    /// Set the status code. Callers must use codes from the fixed
    /// [`status`] table; anything else cannot be given a reason phrase
    /// and will not survive a parse on the peer side.
    pub fn set_status_code(mut self, code: u16) -> Self {
        debug_assert!(status::is_valid(code), "status code {code} not in table");
        self.status_code = code;
        self
    }

    /// Add a header. The key is normalized before storage.
    pub fn add_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// In-place header insertion, for post-processing an already-built
    /// response (content-length injection).
    pub(crate) fn insert_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key, value);
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Look up a header value by key (normalized before comparison).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Serialize to wire text: status line, header lines, blank-line
    /// terminator.
    pub fn to_wire_string(&self) -> String {
        let reason = status::reason_phrase(self.status_code).unwrap_or("Unknown");
        let mut out = format!("{} {} {reason}{NEWLINE}", self.protocol, self.status_code);
        for (key, value) in self.headers.iter() {
            out.push_str(&format!("{key}: {value}{NEWLINE}"));
        }
        out.push_str(NEWLINE);
        out
    }

    /// Parse a raw header block (without the body) into a response header.
    ///
    /// The first line must carry `PROTOCOL CODE [REASON]`; the reason
    /// phrase, if present, is discarded. A code that is not a member of
    /// the fixed [`status`] table is a hard parse error. Header keys are
    /// normalized; headers present in the block fully replace the
    /// constructor defaults.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut lines = raw.split(NEWLINE);

        let status_line = lines.next().filter(|l| !l.is_empty()).ok_or(HttpotError::Parse {
            kind: ParseErrorKind::EmptyHeader,
        })?;

        let mut fields = status_line.split(' ');
        let (Some(protocol), Some(code)) = (fields.next(), fields.next()) else {
            return Err(HttpotError::Parse {
                kind: ParseErrorKind::InvalidStartLine,
            });
        };

        let status_code = code
            .parse::<u16>()
            .ok()
            .filter(|c| status::is_valid(*c))
            .ok_or_else(|| HttpotError::Parse {
                kind: ParseErrorKind::UnknownStatusCode(code.to_string()),
            })?;

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

        Ok(ResponseHeader {
            protocol: protocol.to_string(),
            status_code,
            headers,
        })
    }
}

impl Default for ResponseHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let header = ResponseHeader::new();
        assert_eq!(header.status_code(), 200);
        assert_eq!(header.protocol(), "HTTP/1.0");
        assert_eq!(header.header("Connection"), Some("close"));
        assert_eq!(header.header("Server"), Some(DEFAULT_AGENT));
    }

    #[test]
    fn serialize_looks_up_reason_phrase() {
        let wire = ResponseHeader::new().set_status_code(418).to_wire_string();
        assert!(wire.starts_with("HTTP/1.0 418 I'm a teapot\r\n"));
        assert!(wire.ends_with("\r\n\r\n"));
    }

    #[test]
    fn parse_status_line_and_headers() {
        let raw = "HTCPCP/1.0 300 Multiple Choices\r\nalternates: {\"/\" {type message/coffeepot}}";
        let header = ResponseHeader::parse(raw).unwrap();
        assert_eq!(header.protocol(), "HTCPCP/1.0");
        assert_eq!(header.status_code(), 300);
        assert_eq!(
            header.header("Alternates"),
            Some("{\"/\" {type message/coffeepot}}")
        );
    }

    #[test]
    fn parse_unknown_status_code_fails() {
        let err = ResponseHeader::parse("HTTP/1.0 299 Whatever").unwrap_err();
        assert!(matches!(
            err,
            HttpotError::Parse {
                kind: ParseErrorKind::UnknownStatusCode(_)
            }
        ));
    }

    #[test]
    fn parse_non_numeric_status_code_fails() {
        assert!(ResponseHeader::parse("HTTP/1.0 abc Whatever").is_err());
    }

    #[test]
    fn roundtrip() {
        let header = ResponseHeader::new()
            .set_status_code(404)
            .add_header("Content-Type", "application/json")
            .add_header("Content-Length", "12");
        let parsed = ResponseHeader::parse(&header.to_wire_string()).unwrap();
        assert_eq!(parsed, header);
    }
}
