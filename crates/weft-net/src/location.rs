//! Location - comparable absolute URL

use crate::{FormData, NetError};
use url::Url;

/// A normalized, absolute URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Wrap an absolute URL string
    pub fn wrap(value: &str) -> Result<Self, NetError> {
        let url = Url::parse(value).map_err(|e| NetError::InvalidUrl(e.to_string()))?;
        Ok(Self { url })
    }

    /// Wrap a possibly-relative URL string, resolving against `base`
    pub fn wrap_with_base(value: &str, base: &str) -> Result<Self, NetError> {
        let base = Url::parse(base).map_err(|e| NetError::InvalidUrl(e.to_string()))?;
        let url = base
            .join(value)
            .map_err(|e| NetError::InvalidUrl(e.to_string()))?;
        Ok(Self { url })
    }

    /// The absolute URL as a string
    pub fn absolute_url(&self) -> &str {
        self.url.as_str()
    }

    /// The underlying URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Copy of this location with form entries appended to the query
    /// string, matching native GET-form behavior.
    pub fn with_appended_query(&self, data: &FormData) -> Self {
        let mut url = self.url.clone();
        if !data.is_empty() {
            url.query_pairs_mut().extend_pairs(data.iter());
        }
        Self { url }
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_absolute() {
        let location = Location::wrap("https://example.com/messages").unwrap();
        assert_eq!(location.absolute_url(), "https://example.com/messages");
    }

    #[test]
    fn test_wrap_with_base() {
        let location = Location::wrap_with_base("/inbox", "https://example.com/messages").unwrap();
        assert_eq!(location.absolute_url(), "https://example.com/inbox");
    }

    #[test]
    fn test_wrap_relative_without_base_fails() {
        assert!(Location::wrap("/inbox").is_err());
    }

    #[test]
    fn test_with_appended_query() {
        let mut data = FormData::new();
        data.append("q", "frames");
        data.append("page", "2");

        let location = Location::wrap("https://example.com/search").unwrap();
        assert_eq!(
            location.with_appended_query(&data).absolute_url(),
            "https://example.com/search?q=frames&page=2"
        );
        assert_eq!(
            location.with_appended_query(&FormData::new()).absolute_url(),
            "https://example.com/search"
        );
    }
}
