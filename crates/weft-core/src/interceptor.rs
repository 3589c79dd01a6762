//! Link and form interception
//!
//! Interceptors sit between raw user actions and the frame
//! controller: they resolve the action's URL, ask the delegate
//! whether to take it over, and report back whether the embedder
//! should suppress its native handling.

use crate::host::FrameContext;
use async_trait::async_trait;
use weft_dom::NodeId;
use weft_net::Location;

/// Decides and handles intercepted link clicks
#[async_trait(?Send)]
pub trait LinkInterceptorDelegate {
    fn should_intercept_link_click(
        &mut self,
        cx: &mut FrameContext<'_>,
        link: NodeId,
        url: &Location,
    ) -> bool;

    async fn link_click_intercepted(
        &mut self,
        cx: &mut FrameContext<'_>,
        link: NodeId,
        url: Location,
    );
}

/// Decides and handles intercepted form submissions
#[async_trait(?Send)]
pub trait FormInterceptorDelegate {
    fn should_intercept_form_submission(
        &mut self,
        cx: &mut FrameContext<'_>,
        form: NodeId,
        submitter: Option<NodeId>,
    ) -> bool;

    async fn form_submission_intercepted(
        &mut self,
        cx: &mut FrameContext<'_>,
        form: NodeId,
        submitter: Option<NodeId>,
    );
}

/// Routes link clicks to a delegate while started
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkInterceptor {
    started: bool,
}

impl LinkInterceptor {
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.started = false;
    }

    /// Offer a click to the delegate. Returns `true` when the click
    /// was taken over and native navigation must not run.
    pub async fn click<D>(&self, cx: &mut FrameContext<'_>, delegate: &mut D, link: NodeId) -> bool
    where
        D: LinkInterceptorDelegate + ?Sized,
    {
        if !self.started {
            return false;
        }
        let Some(href) = cx
            .document
            .tree()
            .attribute(link, "href")
            .filter(|href| !href.is_empty())
            .map(str::to_string)
        else {
            return false;
        };
        let Ok(url) = Location::wrap_with_base(&href, cx.document.url()) else {
            return false;
        };
        if !delegate.should_intercept_link_click(cx, link, &url) {
            return false;
        }
        delegate.link_click_intercepted(cx, link, url).await;
        true
    }
}

/// Routes form submissions to a delegate while started
#[derive(Debug, Clone, Copy, Default)]
pub struct FormInterceptor {
    started: bool,
}

impl FormInterceptor {
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn stop(&mut self) {
        self.started = false;
    }

    /// Offer a submission to the delegate. Returns `true` when the
    /// submission was taken over.
    pub async fn submit<D>(
        &self,
        cx: &mut FrameContext<'_>,
        delegate: &mut D,
        form: NodeId,
        submitter: Option<NodeId>,
    ) -> bool
    where
        D: FormInterceptorDelegate + ?Sized,
    {
        if !self.started {
            return false;
        }
        if !delegate.should_intercept_form_submission(cx, form, submitter) {
            return false;
        }
        delegate.form_submission_intercepted(cx, form, submitter).await;
        true
    }
}
