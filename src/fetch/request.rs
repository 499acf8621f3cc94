use std::fmt;

/// Immutable description of one fetch. The URL is carried verbatim; nothing
/// is parsed or validated until the HTTP client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    url: String,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl From<&str> for FetchRequest {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for FetchRequest {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
