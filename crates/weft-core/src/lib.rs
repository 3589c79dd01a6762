//! weft Navigation Core
//!
//! The state machines behind `<weft-frame>`: link and form
//! interception, tracked form submissions over an abstract transport,
//! GET visits, and grafting matching response content into the live
//! document. Everything host-specific (cookies, meta tags, event
//! delivery, paint timing, network I/O) enters through the
//! `HostEnvironment` and `Transport` seams.

pub mod controller;
pub mod csrf;
pub mod error;
pub mod events;
pub mod form;
pub mod frame;
pub mod host;
pub mod interceptor;
pub mod submission;
pub mod timing;

pub use controller::FrameController;
pub use error::{FrameError, SubmissionError};
pub use events::{EventDetail, EventName, FrameEvent};
pub use frame::{FRAME_HEADER, FRAME_TAG, FRAME_TARGET_ATTRIBUTE};
pub use host::{FrameContext, HostEnvironment, ScrollBlock};
pub use interceptor::{
    FormInterceptor, FormInterceptorDelegate, LinkInterceptor, LinkInterceptorDelegate,
};
pub use submission::{
    FormSubmission, FormSubmissionDelegate, FormSubmissionResult, FormSubmissionState,
    HeaderContributor,
};
pub use timing::{TimingMetric, TimingMetrics};
