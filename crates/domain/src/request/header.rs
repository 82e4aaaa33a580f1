//! HTTP Header types

/// A single HTTP header with name and value.
#[derive(Clone, PartialEq, Eq)]
pub struct Header {
    /// The header name (e.g., "Authorization")
    pub name: String,
    /// The header value
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns true if the header carries credentials and must not be logged.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        self.name.eq_ignore_ascii_case("authorization")
    }
}

impl std::fmt::Debug for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = if self.is_sensitive() {
            "<redacted>"
        } else {
            self.value.as_str()
        };
        f.debug_struct("Header")
            .field("name", &self.name)
            .field("value", &value)
            .finish()
    }
}

/// An ordered collection of HTTP headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a header to the collection.
    pub fn add(&mut self, header: Header) {
        self.items.push(header);
    }

    /// Returns the first value for a header name, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns an iterator over the headers.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.add(Header::new("Accept", "application/json"));
        headers.add(Header::new("Authorization", "Bearer abc"));

        assert_eq!(headers.get("authorization"), Some("Bearer abc"));
        assert_eq!(headers.get("x-missing"), None);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let header = Header::new("Authorization", "Bearer secret-token");
        let rendered = format!("{header:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));

        let plain = Header::new("Accept", "application/json");
        assert!(format!("{plain:?}").contains("application/json"));
    }
}
