//! Frame lifecycle notifications
//!
//! Each notification carries a closed payload variant, so every
//! consumer sees exactly the fields that notification defines.

use crate::timing::TimingMetrics;
use weft_dom::NodeId;
use weft_net::{FetchMethod, Location};

/// Notification names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    SubmitStart,
    SubmitEnd,
    BeforeVisit,
    Visit,
    BeforeRender,
    Render,
    Load,
}

impl EventName {
    /// Wire name used when the embedder forwards the notification as
    /// a DOM event
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitStart => "weft:submit-start",
            Self::SubmitEnd => "weft:submit-end",
            Self::BeforeVisit => "weft:before-visit",
            Self::Visit => "weft:visit",
            Self::BeforeRender => "weft:before-render",
            Self::Render => "weft:render",
            Self::Load => "weft:load",
        }
    }
}

/// Per-notification payload
#[derive(Debug, Clone)]
pub enum EventDetail {
    SubmitStart {
        url: Location,
        method: FetchMethod,
    },
    SubmitEnd {
        success: bool,
        status: Option<u16>,
        error: Option<String>,
    },
    BeforeVisit {
        url: Location,
    },
    Visit {
        url: Location,
    },
    BeforeRender {
        /// Detached handle of the imported replacement content
        new_body: NodeId,
    },
    Render,
    Load {
        url: Location,
        timing: TimingMetrics,
    },
}

/// A notification scoped to an element of the live document
#[derive(Debug, Clone)]
pub struct FrameEvent {
    pub name: EventName,
    pub target: NodeId,
    pub cancelable: bool,
    detail: EventDetail,
    default_prevented: bool,
}

impl FrameEvent {
    pub fn new(name: EventName, target: NodeId, cancelable: bool, detail: EventDetail) -> Self {
        Self {
            name,
            target,
            cancelable,
            detail,
            default_prevented: false,
        }
    }

    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    /// Prevent the default action; only meaningful on cancelable
    /// notifications.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
