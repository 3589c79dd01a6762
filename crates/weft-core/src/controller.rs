//! Frame controller
//!
//! One controller per live `<weft-frame>` element. It decides which
//! link clicks and form submissions it owns, performs GET visits
//! against the frame, and grafts matching response content into the
//! live document.

use crate::error::{FrameError, SubmissionError};
use crate::events::{EventDetail, EventName, FrameEvent};
use crate::form;
use crate::frame;
use crate::host::{FrameContext, ScrollBlock};
use crate::interceptor::{
    FormInterceptor, FormInterceptorDelegate, LinkInterceptor, LinkInterceptorDelegate,
};
use crate::submission::{FormSubmission, FormSubmissionDelegate, HeaderContributor};
use crate::timing::{TimingMetric, TimingMetrics};
use async_trait::async_trait;
use weft_dom::{Document, NodeId};
use weft_net::{FetchMethod, FetchRequest, FetchResponse, Location, TransportOutcome};

/// Chained `recurse` placeholders deeper than this are abandoned
const MAX_RECURSE_DEPTH: usize = 8;

/// Drives navigation for one frame element
pub struct FrameController {
    frame: NodeId,
    id: String,
    link_interceptor: LinkInterceptor,
    form_interceptor: FormInterceptor,
    form_submission: Option<FormSubmission>,
    timing: TimingMetrics,
    visit_generation: u64,
}

impl FrameController {
    /// Attach a controller to a frame element. The element must carry
    /// a non-empty id; the id is cached for targeting and for matching
    /// response content.
    pub fn new(document: &Document, frame: NodeId) -> Result<Self, FrameError> {
        let id = document
            .tree()
            .attribute(frame, "id")
            .filter(|id| !id.is_empty())
            .ok_or(FrameError::MissingFrameId)?
            .to_string();

        Ok(Self {
            frame,
            id,
            link_interceptor: LinkInterceptor::default(),
            form_interceptor: FormInterceptor::default(),
            form_submission: None,
            timing: TimingMetrics::new(),
            visit_generation: 0,
        })
    }

    /// Begin intercepting clicks and submits
    pub fn connect(&mut self) {
        self.link_interceptor.start();
        self.form_interceptor.start();
    }

    /// Stop intercepting; native navigation takes over
    pub fn disconnect(&mut self) {
        self.link_interceptor.stop();
        self.form_interceptor.stop();
    }

    pub fn frame_element(&self) -> NodeId {
        self.frame
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timing(&self) -> &TimingMetrics {
        &self.timing
    }

    pub fn form_submission(&self) -> Option<&FormSubmission> {
        self.form_submission.as_ref()
    }

    /// Offer a link click. Returns `true` when the controller took it
    /// over and native navigation must not run.
    pub async fn handle_link_click(&mut self, cx: &mut FrameContext<'_>, link: NodeId) -> bool {
        let interceptor = self.link_interceptor;
        interceptor.click(cx, self, link).await
    }

    /// Offer a form submission. Returns `true` when taken over.
    pub async fn handle_form_submission(
        &mut self,
        cx: &mut FrameContext<'_>,
        form: NodeId,
        submitter: Option<NodeId>,
    ) -> bool {
        let interceptor = self.form_interceptor;
        interceptor.submit(cx, self, form, submitter).await
    }

    /// Self-issued GET against the frame. Always reaches exactly one
    /// `weft:load` notification unless a later visit superseded this
    /// one.
    pub async fn visit(&mut self, cx: &mut FrameContext<'_>, url: Location) {
        self.visit_generation += 1;
        let generation = self.visit_generation;
        self.timing.clear();
        self.timing.record(TimingMetric::VisitStart);

        let mut event = FrameEvent::new(
            EventName::Visit,
            self.frame,
            false,
            EventDetail::Visit { url: url.clone() },
        );
        cx.dispatch_event(&mut event);

        let mut request =
            FetchRequest::new(FetchMethod::Get, url.clone(), cx.host.create_transport());
        request.set_header(frame::FRAME_HEADER, &self.id);

        let outcome = match request.dispatch().await {
            Ok(()) => {
                self.timing.record(TimingMetric::RequestStart);
                // busy marks the span between actual request start and
                // settlement
                cx.document.tree_mut().set_attribute(self.frame, "busy", "");
                let outcome = request.settle().await;
                cx.document.tree_mut().remove_attribute(self.frame, "busy");
                self.timing.record(TimingMetric::RequestEnd);
                Some(outcome)
            }
            Err(error) => {
                tracing::error!(%error, frame = %self.id, "visit request failed to start");
                None
            }
        };

        match outcome {
            Some(TransportOutcome::Response(response)) => {
                if response.succeeded() {
                    self.load_response(cx, self.frame, &url, &response).await;
                } else {
                    tracing::warn!(
                        status = response.status_code(),
                        frame = %self.id,
                        "visit response not rendered"
                    );
                }
            }
            Some(TransportOutcome::Error(error)) => {
                tracing::error!(%error, frame = %self.id, "visit transport error");
            }
            Some(TransportOutcome::PreventedHandling(_))
            | Some(TransportOutcome::Cancelled)
            | None => {}
        }

        if self.visit_generation != generation {
            tracing::debug!(frame = %self.id, "stale visit completion ignored");
            return;
        }
        self.timing.record(TimingMetric::VisitEnd);
        let mut event = FrameEvent::new(
            EventName::Load,
            self.frame,
            false,
            EventDetail::Load {
                url,
                timing: self.timing.clone(),
            },
        );
        cx.dispatch_event(&mut event);
    }

    /// Interception gating: the frame must be enabled, the scoping id
    /// must not be the `_top` sentinel, and a scoping id naming a
    /// disabled frame fails closed.
    fn should_intercept_navigation(
        &self,
        document: &Document,
        element: NodeId,
        submitter: Option<NodeId>,
    ) -> bool {
        if frame::frame_disabled(document, self.frame) {
            return false;
        }
        match frame::navigation_target(document, element, submitter, self.frame) {
            Some("_top") => false,
            Some(id) => match frame::frame_element_by_id(document, id) {
                Some(other) => !frame::frame_disabled(document, other),
                None => true,
            },
            None => true,
        }
    }

    /// Point a frame at a URL. Writing `src` marks the frame's new
    /// source; when the target is this controller's own frame, the
    /// visit runs here as well.
    async fn navigate_frame(&mut self, cx: &mut FrameContext<'_>, target: NodeId, url: Location) {
        cx.document
            .tree_mut()
            .set_attribute(target, "src", url.absolute_url());
        if target == self.frame {
            self.visit(cx, url).await;
        }
    }

    /// Graft response content matching the target frame's id into the
    /// live document. A response with no matching element is a silent
    /// no-op.
    async fn load_response(
        &mut self,
        cx: &mut FrameContext<'_>,
        target: NodeId,
        url: &Location,
        response: &FetchResponse,
    ) {
        let html = match response.response_html() {
            Ok(html) => html,
            Err(error) => {
                tracing::error!(%error, frame = %self.id, "response body unreadable");
                return;
            }
        };
        let Some(id) = cx
            .document
            .tree()
            .attribute(target, "id")
            .filter(|id| !id.is_empty())
            .map(str::to_string)
        else {
            tracing::warn!("target frame has no id; response dropped");
            return;
        };

        let fetched = weft_html::parse_with_url(&html, url.absolute_url());
        let Some((source, foreign)) = Self::extract_foreign_frame(cx, fetched, &id).await else {
            tracing::debug!(frame = %id, "response contains no matching frame");
            return;
        };
        let imported = cx.document.import_node(&source, foreign);

        let mut before = FrameEvent::new(
            EventName::BeforeRender,
            target,
            true,
            EventDetail::BeforeRender { new_body: imported },
        );
        cx.dispatch_event(&mut before);
        // Rendering always proceeds here; honoring cancellation is a
        // richer renderer's concern.

        cx.host.next_animation_frame().await;
        let children = cx.document.tree_mut().extract_children(imported);
        cx.document.tree_mut().replace_children(target, children);

        let mut render = FrameEvent::new(EventName::Render, target, false, EventDetail::Render);
        cx.dispatch_event(&mut render);

        let tree = cx.document.tree();
        if tree.has_attribute(target, "autoscroll") || tree.has_attribute(imported, "autoscroll") {
            // Scroll position comes from the live frame element only
            let block = ScrollBlock::parse(tree.attribute(target, "data-autoscroll-block"));
            cx.host.scroll_into_view(cx.document, target, block);
        }

        cx.host.next_animation_frame().await;
        if let Some(focusable) = frame::first_autofocusable(cx.document, target) {
            cx.host.focus(cx.document, focusable);
        }
    }

    /// Find the frame matching `id` in fetched content. When only a
    /// recursing placeholder matches, its own `src` is loaded and the
    /// search repeats inside the resolved content.
    async fn extract_foreign_frame(
        cx: &mut FrameContext<'_>,
        mut fetched: Document,
        id: &str,
    ) -> Option<(Document, NodeId)> {
        for _ in 0..MAX_RECURSE_DEPTH {
            if let Some(found) = frame::frame_element_by_id(&fetched, id) {
                return Some((fetched, found));
            }
            let placeholder = frame::recursing_placeholder(&fetched, id)?;
            let src = fetched.tree().attribute(placeholder, "src")?.to_string();
            let url = match Location::wrap_with_base(&src, fetched.url()) {
                Ok(url) => url,
                Err(error) => {
                    tracing::warn!(%error, %src, "unresolvable placeholder src");
                    return None;
                }
            };
            tracing::debug!(url = url.absolute_url(), frame = %id, "following recursing placeholder");

            let mut request =
                FetchRequest::new(FetchMethod::Get, url.clone(), cx.host.create_transport());
            request.set_header(frame::FRAME_HEADER, id);
            if let Err(error) = request.dispatch().await {
                tracing::warn!(%error, frame = %id, "placeholder request failed to start");
                return None;
            }
            match request.settle().await {
                TransportOutcome::Response(response) if response.succeeded() => {
                    let html = response.response_html().ok()?;
                    fetched = weft_html::parse_with_url(&html, url.absolute_url());
                }
                _ => return None,
            }
        }
        tracing::warn!(frame = %id, "recursing placeholder depth limit reached");
        None
    }
}

#[async_trait(?Send)]
impl LinkInterceptorDelegate for FrameController {
    fn should_intercept_link_click(
        &mut self,
        cx: &mut FrameContext<'_>,
        link: NodeId,
        _url: &Location,
    ) -> bool {
        self.should_intercept_navigation(cx.document, link, None)
    }

    async fn link_click_intercepted(
        &mut self,
        cx: &mut FrameContext<'_>,
        link: NodeId,
        url: Location,
    ) {
        let target = frame::find_frame_element(cx.document, link, None, self.frame);
        let mut event = FrameEvent::new(
            EventName::BeforeVisit,
            target,
            true,
            EventDetail::BeforeVisit { url: url.clone() },
        );
        cx.dispatch_event(&mut event);
        if event.is_default_prevented() {
            return;
        }
        self.navigate_frame(cx, target, url).await;
    }
}

#[async_trait(?Send)]
impl FormInterceptorDelegate for FrameController {
    fn should_intercept_form_submission(
        &mut self,
        cx: &mut FrameContext<'_>,
        form: NodeId,
        submitter: Option<NodeId>,
    ) -> bool {
        self.should_intercept_navigation(cx.document, form, submitter)
    }

    async fn form_submission_intercepted(
        &mut self,
        cx: &mut FrameContext<'_>,
        form: NodeId,
        submitter: Option<NodeId>,
    ) {
        // Last writer wins; no queueing of submissions
        if let Some(previous) = self.form_submission.as_mut() {
            previous.stop();
        }

        if form::effective_method(cx.document, form, submitter).is_idempotent() {
            // GET forms are plain navigation; no tracked submission,
            // no transport minted here.
            let action = match form::effective_action(cx.document, form, submitter) {
                Ok(action) => action,
                Err(error) => {
                    tracing::error!(%error, frame = %self.id, "unresolvable form action");
                    return;
                }
            };
            let data = form::build_form_data(cx.document, form, submitter);
            let target = frame::find_frame_element(cx.document, form, submitter, self.frame);
            self.navigate_frame(cx, target, action.with_appended_query(&data))
                .await;
            return;
        }

        let mut submission = match FormSubmission::new(cx, form, submitter, false) {
            Ok(submission) => submission,
            Err(error) => {
                tracing::error!(%error, frame = %self.id, "could not derive form submission");
                return;
            }
        };
        submission.start(cx, self).await;
        self.form_submission = Some(submission);
    }
}

#[async_trait(?Send)]
impl FormSubmissionDelegate for FrameController {
    async fn form_submission_succeeded(
        &mut self,
        cx: &mut FrameContext<'_>,
        submission: &FormSubmission,
        response: &FetchResponse,
    ) {
        let target = frame::find_frame_element(
            cx.document,
            submission.form_element(),
            submission.submitter(),
            self.frame,
        );
        self.load_response(cx, target, submission.location(), response)
            .await;
    }

    fn form_submission_failed(
        &mut self,
        _cx: &mut FrameContext<'_>,
        _submission: &FormSubmission,
        response: &FetchResponse,
    ) {
        tracing::warn!(
            status = response.status_code(),
            frame = %self.id,
            "form submission failed"
        );
    }

    fn form_submission_errored(
        &mut self,
        _cx: &mut FrameContext<'_>,
        _submission: &FormSubmission,
        error: &SubmissionError,
    ) {
        tracing::error!(%error, frame = %self.id, "form submission errored");
    }

    fn header_contributor(&self) -> Option<&dyn HeaderContributor> {
        Some(self)
    }
}

impl HeaderContributor for FrameController {
    fn additional_headers(&self, _request: &FetchRequest) -> Vec<(String, String)> {
        vec![(frame::FRAME_HEADER.to_string(), self.id.clone())]
    }
}
