//! Host environment seam
//!
//! The core never touches global browser state directly. Cookies,
//! meta tags, event dispatch, paint timing, and transport minting all
//! go through this trait, so the state machines run the same against
//! a real embedding or a test harness.

use crate::events::FrameEvent;
use async_trait::async_trait;
use weft_dom::{Document, NodeId};
use weft_net::Transport;

/// Logical scroll position for autoscrolling a frame into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBlock {
    #[default]
    End,
    Start,
    Center,
    Nearest,
}

impl ScrollBlock {
    /// Parse a `data-autoscroll-block` value; anything unrecognized
    /// falls back to the default.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("end") => Self::End,
            Some("start") => Self::Start,
            Some("center") => Self::Center,
            Some("nearest") => Self::Nearest,
            _ => Self::default(),
        }
    }
}

/// Embedder-provided environment
#[async_trait(?Send)]
pub trait HostEnvironment {
    /// Decoded value of a cookie, if set
    fn cookie(&self, name: &str) -> Option<String>;

    /// Content of a `<meta name=...>` tag in the page head, if present
    fn meta_content(&self, name: &str) -> Option<String>;

    /// Mint a transport for one outgoing request
    fn create_transport(&mut self) -> Box<dyn Transport>;

    /// Deliver a notification to listeners. Listeners may call
    /// `prevent_default` on cancelable events.
    fn dispatch(&mut self, document: &Document, event: &mut FrameEvent);

    /// Suspend until the next rendering frame
    async fn next_animation_frame(&mut self);

    /// Scroll an element into view
    fn scroll_into_view(&mut self, document: &Document, element: NodeId, block: ScrollBlock) {
        let _ = (document, element, block);
    }

    /// Move focus to an element
    fn focus(&mut self, document: &Document, element: NodeId) {
        let _ = (document, element);
    }
}

/// Live document plus host, threaded through every operation
pub struct FrameContext<'a> {
    pub document: &'a mut Document,
    pub host: &'a mut dyn HostEnvironment,
}

impl<'a> FrameContext<'a> {
    pub fn new(document: &'a mut Document, host: &'a mut dyn HostEnvironment) -> Self {
        Self { document, host }
    }

    pub(crate) fn dispatch_event(&mut self, event: &mut FrameEvent) {
        self.host.dispatch(self.document, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_block_parse() {
        assert_eq!(ScrollBlock::parse(Some("start")), ScrollBlock::Start);
        assert_eq!(ScrollBlock::parse(Some("nearest")), ScrollBlock::Nearest);
        assert_eq!(ScrollBlock::parse(Some("bogus")), ScrollBlock::End);
        assert_eq!(ScrollBlock::parse(None), ScrollBlock::End);
    }
}
