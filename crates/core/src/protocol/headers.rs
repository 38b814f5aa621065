//! Ordered header map with canonical key normalization.

/// Normalize a header key to Title-Case-per-hyphen-segment.
///
/// Each hyphen-separated segment gets an uppercase first letter and
/// lowercase remainder, so `content-type`, `CONTENT-TYPE` and
/// `Content-type` all canonicalize to `Content-Type`.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = first.to_ascii_uppercase().to_string();
                    out.push_str(&chars.as_str().to_ascii_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Header name/value mapping shared by request and response headers.
///
/// Every key is normalized via [`normalize_key`] before storage and before
/// lookup, so spelling differences in case never produce distinct entries.
/// Insertion order is preserved for wire emission; inserting an existing
/// key overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, normalizing the key. Overwrites an existing entry
    /// with the same canonical key, keeping its original position.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = normalize_key(key);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((key, value.to_string())),
        }
    }

    /// Look up a header value. The key is normalized before comparison.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_title_cases_each_segment() {
        assert_eq!(normalize_key("content-type"), "Content-Type");
        assert_eq!(normalize_key("CONTENT-TYPE"), "Content-Type");
        assert_eq!(normalize_key("Content-type"), "Content-Type");
        assert_eq!(normalize_key("accept-additions"), "Accept-Additions");
        assert_eq!(normalize_key("host"), "Host");
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_key("  user-agent "), "User-Agent");
    }

    #[test]
    fn insert_normalizes_and_overwrites() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "text/plain");
        headers.insert("CONTENT-TYPE", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Length", "42");
        assert_eq!(headers.get("content-length"), Some("42"));
        assert_eq!(headers.get("CONTENT-LENGTH"), Some("42"));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut headers = HeaderMap::new();
        headers.insert("Connection", "close");
        headers.insert("User-Agent", "test/1.0");
        headers.insert("Host", "localhost");
        let keys: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Connection", "User-Agent", "Host"]);
    }

}
