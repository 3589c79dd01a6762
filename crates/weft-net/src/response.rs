//! Fetch response

use crate::NetError;

/// A classified HTTP response
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    status: u16,
    redirected: bool,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    pub fn with_redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// HTTP status code
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Whether the request was redirected before this response
    pub fn redirected(&self) -> bool {
        self.redirected
    }

    /// 2xx
    pub fn succeeded(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 4xx
    pub fn client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx
    pub fn server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_ascii_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as HTML text. The body is kept as raw bytes
    /// until someone asks for it.
    pub fn response_html(&self) -> Result<String, NetError> {
        String::from_utf8(self.body.clone()).map_err(|e| NetError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(FetchResponse::new(200).succeeded());
        assert!(FetchResponse::new(204).succeeded());
        assert!(FetchResponse::new(422).client_error());
        assert!(FetchResponse::new(500).server_error());
        assert!(!FetchResponse::new(302).succeeded());
        assert!(!FetchResponse::new(302).client_error());
    }

    #[test]
    fn test_response_html() {
        let response = FetchResponse::new(200).with_body("<p>ok</p>");
        assert_eq!(response.response_html().unwrap(), "<p>ok</p>");
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let response = FetchResponse::new(200).with_header("Content-Type", "text/html");
        assert_eq!(response.header("content-type"), Some("text/html"));
    }
}
