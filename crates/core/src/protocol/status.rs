//! The fixed, closed status-code table.
//!
//! Maps numeric codes to reason phrases for serialization and validates
//! codes during response parsing. The table is intentionally closed:
//! layered protocols may only use codes listed here, and parsing a
//! response with any other code is a protocol error. Beyond the standard
//! HTTP codes it carries the HTCPCP extensions used by coffee-pot style
//! protocols (`300` alternates negotiation, `418` teapot discrimination).

/// Reason phrase for a status code, or `None` if the code is not part of
/// the table.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    let reason = match code {
        100 => "Continue",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        418 => "I'm a teapot",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        503 => "Service Unavailable",
        _ => return None,
    };
    Some(reason)
}

/// Whether `code` is a member of the table.
pub fn is_valid(code: u16) -> bool {
    reason_phrase(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_codes() {
        assert_eq!(reason_phrase(200), Some("OK"));
        assert_eq!(reason_phrase(404), Some("Not Found"));
        assert_eq!(reason_phrase(500), Some("Internal Server Error"));
    }

    #[test]
    fn htcpcp_extensions() {
        assert_eq!(reason_phrase(418), Some("I'm a teapot"));
        assert_eq!(reason_phrase(300), Some("Multiple Choices"));
        assert_eq!(reason_phrase(406), Some("Not Acceptable"));
    }

    #[test]
    fn codes_outside_table_are_invalid() {
        assert!(!is_valid(299));
        assert!(!is_valid(999));
        assert!(!is_valid(0));
    }
}
