//! weft Networking
//!
//! The transport seam the navigation core drives: request/response
//! types, the `Transport` trait an embedder implements, and a scripted
//! stub transport for tests and harnesses. No HTTP client ships here;
//! performing the actual I/O is the embedder's job.

mod form_data;
mod location;
mod method;
mod request;
mod response;
mod transport;

pub use form_data::FormData;
pub use location::Location;
pub use method::FetchMethod;
pub use request::{FetchRequest, TransportRequest};
pub use response::FetchResponse;
pub use transport::{StubTransport, Transport, TransportLog, TransportOutcome};

pub use url::Url;

/// Network error
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}
