//! Fetch request
//!
//! One request over one owned transport. Callers drive the two
//! phases (`dispatch`, then `settle`) and may `cancel` in between.

use crate::{FetchMethod, FormData, Location, NetError, Transport, TransportOutcome};
use url::Url;

/// Plain-data request handed to the transport
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: FetchMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_ascii_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }
}

/// A fetch request bound to a transport
pub struct FetchRequest {
    method: FetchMethod,
    location: Location,
    headers: Vec<(String, String)>,
    body: Option<FormData>,
    transport: Box<dyn Transport>,
}

impl FetchRequest {
    pub fn new(method: FetchMethod, location: Location, transport: Box<dyn Transport>) -> Self {
        Self {
            method,
            location,
            headers: Vec::new(),
            body: None,
            transport,
        }
    }

    pub fn with_form_data(mut self, body: FormData) -> Self {
        self.body = Some(body);
        self
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn method(&self) -> FetchMethod {
        self.method
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_idempotent(&self) -> bool {
        self.method.is_idempotent()
    }

    /// The effective request URL. Idempotent requests carry their form
    /// data in the query string.
    pub fn url(&self) -> Url {
        if self.is_idempotent() {
            if let Some(body) = &self.body {
                return self.location.with_appended_query(body).url().clone();
            }
        }
        self.location.url().clone()
    }

    fn to_transport_request(&self) -> TransportRequest {
        let mut headers = self.headers.clone();
        let body = if self.is_idempotent() {
            None
        } else {
            self.body.as_ref().map(|data| {
                headers.push((
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                ));
                data.to_url_encoded().into_bytes()
            })
        };
        TransportRequest {
            method: self.method,
            url: self.url(),
            headers,
            body,
        }
    }

    /// Dispatch the request; resolves once it has actually started.
    pub async fn dispatch(&mut self) -> Result<(), NetError> {
        let request = self.to_transport_request();
        tracing::debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        self.transport.dispatch(&request).await
    }

    /// Await the terminal outcome.
    pub async fn settle(&mut self) -> TransportOutcome {
        self.transport.settle().await
    }

    /// Best-effort cooperative cancellation.
    pub fn cancel(&mut self) {
        self.transport.cancel();
    }
}
