//! Transport seam
//!
//! The embedder performs the actual I/O. The two-phase shape keeps
//! the "request actually started" signal distinct from the terminal
//! outcome, so callers can run lifecycle work in between.

use crate::{FetchResponse, NetError, TransportRequest};
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

/// Terminal outcome of a dispatched request
#[derive(Debug)]
pub enum TransportOutcome {
    /// An HTTP response arrived (any status)
    Response(FetchResponse),
    /// A higher layer already consumed the response; the caller must
    /// not handle it again
    PreventedHandling(FetchResponse),
    /// Network-level failure, no classified response
    Error(NetError),
    /// The request was cancelled before settling
    Cancelled,
}

/// A single-request transport. One instance serves one request;
/// cancellation is cooperative and best-effort.
#[async_trait(?Send)]
pub trait Transport {
    /// Dispatch the request. Resolves once the request has actually
    /// started (written to the wire), not merely been queued.
    async fn dispatch(&mut self, request: &TransportRequest) -> Result<(), NetError>;

    /// Await the terminal outcome of the dispatched request.
    async fn settle(&mut self) -> TransportOutcome;

    /// Request cancellation of the in-flight request.
    fn cancel(&mut self);
}

/// Record of what a `StubTransport` was asked to do
#[derive(Debug, Default)]
pub struct TransportLog {
    pub requests: Vec<TransportRequest>,
    pub cancelled: bool,
}

/// Scripted transport for tests and harnesses: hands back a single
/// prepared outcome and records the request it saw.
pub struct StubTransport {
    outcome: Option<TransportOutcome>,
    dispatch_error: Option<NetError>,
    log: Rc<RefCell<TransportLog>>,
}

impl StubTransport {
    /// Settle with the given outcome
    pub fn respond_with(outcome: TransportOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            dispatch_error: None,
            log: Rc::new(RefCell::new(TransportLog::default())),
        }
    }

    /// Shorthand for a plain HTTP response
    pub fn response(response: FetchResponse) -> Self {
        Self::respond_with(TransportOutcome::Response(response))
    }

    /// Fail at dispatch time, before the request ever starts
    pub fn failing_dispatch(error: NetError) -> Self {
        Self {
            outcome: None,
            dispatch_error: Some(error),
            log: Rc::new(RefCell::new(TransportLog::default())),
        }
    }

    /// Shared handle to the log, usable after the transport is moved
    /// into a request
    pub fn log(&self) -> Rc<RefCell<TransportLog>> {
        Rc::clone(&self.log)
    }
}

#[async_trait(?Send)]
impl Transport for StubTransport {
    async fn dispatch(&mut self, request: &TransportRequest) -> Result<(), NetError> {
        if let Some(error) = self.dispatch_error.take() {
            return Err(error);
        }
        self.log.borrow_mut().requests.push(request.clone());
        Ok(())
    }

    async fn settle(&mut self) -> TransportOutcome {
        if self.log.borrow().cancelled {
            return TransportOutcome::Cancelled;
        }
        self.outcome.take().unwrap_or(TransportOutcome::Cancelled)
    }

    fn cancel(&mut self) {
        self.log.borrow_mut().cancelled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchMethod, Location};

    fn request() -> TransportRequest {
        TransportRequest {
            method: FetchMethod::Get,
            url: Location::wrap("https://example.com/").unwrap().url().clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn test_stub_records_and_settles() {
        smol::block_on(async {
            let mut transport = StubTransport::response(FetchResponse::new(200));
            let log = transport.log();

            transport.dispatch(&request()).await.unwrap();
            let outcome = transport.settle().await;

            assert!(matches!(outcome, TransportOutcome::Response(r) if r.status_code() == 200));
            assert_eq!(log.borrow().requests.len(), 1);
        });
    }

    #[test]
    fn test_cancel_wins_over_outcome() {
        smol::block_on(async {
            let mut transport = StubTransport::response(FetchResponse::new(200));
            transport.dispatch(&request()).await.unwrap();
            transport.cancel();

            assert!(matches!(transport.settle().await, TransportOutcome::Cancelled));
        });
    }
}
