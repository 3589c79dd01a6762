//! Form submission lifecycle
//!
//! One `FormSubmission` is one attempt to submit one form: it derives
//! method/action/body from the DOM at construction, drives the
//! transport through its two phases, and reports exactly one terminal
//! outcome to its delegate.

use crate::csrf;
use crate::error::SubmissionError;
use crate::events::{EventDetail, EventName, FrameEvent};
use crate::form;
use crate::host::FrameContext;
use async_trait::async_trait;
use weft_dom::NodeId;
use weft_net::{FetchMethod, FetchRequest, FetchResponse, FormData, Location, TransportOutcome};

/// Linear submission states; no transition ever goes backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSubmissionState {
    Initialized,
    Requesting,
    Waiting,
    Receiving,
    Stopping,
    Stopped,
}

/// Terminal outcome of a submission
#[derive(Debug, Clone)]
pub enum FormSubmissionResult {
    Success { response: FetchResponse },
    Failure { response: FetchResponse },
    Errored { error: SubmissionError },
}

impl FormSubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Optional capability: contribute extra headers to an outgoing
/// request.
pub trait HeaderContributor {
    fn additional_headers(&self, request: &FetchRequest) -> Vec<(String, String)>;
}

/// Receives the submission's lifecycle callbacks. Only the success
/// hook is required; the rest default to no-ops.
#[async_trait(?Send)]
pub trait FormSubmissionDelegate {
    fn form_submission_started(&mut self, cx: &mut FrameContext<'_>, submission: &FormSubmission) {
        let _ = (cx, submission);
    }

    async fn form_submission_succeeded(
        &mut self,
        cx: &mut FrameContext<'_>,
        submission: &FormSubmission,
        response: &FetchResponse,
    );

    fn form_submission_failed(
        &mut self,
        cx: &mut FrameContext<'_>,
        submission: &FormSubmission,
        response: &FetchResponse,
    ) {
        let _ = (cx, submission, response);
    }

    fn form_submission_errored(
        &mut self,
        cx: &mut FrameContext<'_>,
        submission: &FormSubmission,
        error: &SubmissionError,
    ) {
        let _ = (cx, submission, error);
    }

    fn form_submission_finished(&mut self, cx: &mut FrameContext<'_>, submission: &FormSubmission) {
        let _ = (cx, submission);
    }

    /// Capability query for the optional additional-headers hook
    fn header_contributor(&self) -> Option<&dyn HeaderContributor> {
        None
    }
}

/// One form submission attempt
pub struct FormSubmission {
    form: NodeId,
    submitter: Option<NodeId>,
    method: FetchMethod,
    location: Location,
    form_data: FormData,
    fetch_request: FetchRequest,
    must_redirect: bool,
    state: FormSubmissionState,
    result: Option<FormSubmissionResult>,
}

impl FormSubmission {
    /// Derive a submission from the form (and submitter) as they
    /// stand in the document right now. Method, action, and body are
    /// immutable from here on.
    pub fn new(
        cx: &mut FrameContext<'_>,
        form: NodeId,
        submitter: Option<NodeId>,
        must_redirect: bool,
    ) -> Result<Self, SubmissionError> {
        let method = form::effective_method(cx.document, form, submitter);
        let location = form::effective_action(cx.document, form, submitter)?;
        let form_data = form::build_form_data(cx.document, form, submitter);
        let fetch_request = FetchRequest::new(method, location.clone(), cx.host.create_transport())
            .with_form_data(form_data.clone());

        Ok(Self {
            form,
            submitter,
            method,
            location,
            form_data,
            fetch_request,
            must_redirect,
            state: FormSubmissionState::Initialized,
            result: None,
        })
    }

    pub fn form_element(&self) -> NodeId {
        self.form
    }

    pub fn submitter(&self) -> Option<NodeId> {
        self.submitter
    }

    pub fn method(&self) -> FetchMethod {
        self.method
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    pub fn fetch_request(&self) -> &FetchRequest {
        &self.fetch_request
    }

    pub fn state(&self) -> FormSubmissionState {
        self.state
    }

    pub fn result(&self) -> Option<&FormSubmissionResult> {
        self.result.as_ref()
    }

    // The submission process

    /// Run the submission to completion. Valid only from
    /// `Initialized`; any other state is a no-op returning `None`.
    pub async fn start<D>(
        &mut self,
        cx: &mut FrameContext<'_>,
        delegate: &mut D,
    ) -> Option<&FormSubmissionResult>
    where
        D: FormSubmissionDelegate + ?Sized,
    {
        if self.state != FormSubmissionState::Initialized {
            return None;
        }
        self.state = FormSubmissionState::Requesting;
        self.prepare_headers(cx, delegate);

        match self.fetch_request.dispatch().await {
            Ok(()) => {
                self.request_started(cx, delegate);
                let outcome = self.fetch_request.settle().await;
                self.outcome_received(cx, delegate, outcome).await;
            }
            Err(error) => {
                self.result = Some(FormSubmissionResult::Errored {
                    error: SubmissionError::Net(error),
                });
                self.notify_errored(cx, delegate);
            }
        }

        self.request_finished(cx, delegate);
        self.result.as_ref()
    }

    /// Request cancellation. Returns `true` the first time; stopping
    /// and stopped submissions are a no-op returning `false`.
    pub fn stop(&mut self) -> bool {
        if matches!(
            self.state,
            FormSubmissionState::Stopping | FormSubmissionState::Stopped
        ) {
            return false;
        }
        self.state = FormSubmissionState::Stopping;
        self.fetch_request.cancel();
        true
    }

    // Request lifecycle

    fn prepare_headers<D>(&mut self, cx: &mut FrameContext<'_>, delegate: &D)
    where
        D: FormSubmissionDelegate + ?Sized,
    {
        let extra = delegate
            .header_contributor()
            .map(|contributor| contributor.additional_headers(&self.fetch_request))
            .unwrap_or_default();
        for (name, value) in extra {
            self.fetch_request.set_header(&name, &value);
        }

        if self.method != FetchMethod::Get {
            if let Some(token) = csrf::token(&*cx.host) {
                self.fetch_request.set_header(csrf::CSRF_HEADER, &token);
            }
        }
    }

    fn request_started<D>(&mut self, cx: &mut FrameContext<'_>, delegate: &mut D)
    where
        D: FormSubmissionDelegate + ?Sized,
    {
        self.state = FormSubmissionState::Waiting;
        let mut event = FrameEvent::new(
            EventName::SubmitStart,
            self.form,
            false,
            EventDetail::SubmitStart {
                url: self.location.clone(),
                method: self.method,
            },
        );
        cx.dispatch_event(&mut event);
        delegate.form_submission_started(cx, self);
    }

    async fn outcome_received<D>(
        &mut self,
        cx: &mut FrameContext<'_>,
        delegate: &mut D,
        outcome: TransportOutcome,
    ) where
        D: FormSubmissionDelegate + ?Sized,
    {
        match outcome {
            TransportOutcome::Response(response) => {
                if response.client_error() || response.server_error() {
                    self.result = Some(FormSubmissionResult::Failure { response });
                    if let Some(FormSubmissionResult::Failure { response }) = &self.result {
                        delegate.form_submission_failed(cx, self, response);
                    }
                } else if self.request_must_redirect() && succeeded_without_redirect(&response) {
                    self.result = Some(FormSubmissionResult::Errored {
                        error: SubmissionError::MustRedirect,
                    });
                    self.notify_errored(cx, delegate);
                } else {
                    self.state = FormSubmissionState::Receiving;
                    self.result = Some(FormSubmissionResult::Success { response });
                    if let Some(FormSubmissionResult::Success { response }) = &self.result {
                        delegate.form_submission_succeeded(cx, self, response).await;
                    }
                }
            }
            TransportOutcome::PreventedHandling(response) => {
                // A higher layer consumed the response; record the
                // result but issue no further callbacks.
                self.result = Some(if response.succeeded() {
                    FormSubmissionResult::Success { response }
                } else {
                    FormSubmissionResult::Failure { response }
                });
            }
            TransportOutcome::Error(error) => {
                self.result = Some(FormSubmissionResult::Errored {
                    error: SubmissionError::Net(error),
                });
                self.notify_errored(cx, delegate);
            }
            TransportOutcome::Cancelled => {}
        }
    }

    fn notify_errored<D>(&self, cx: &mut FrameContext<'_>, delegate: &mut D)
    where
        D: FormSubmissionDelegate + ?Sized,
    {
        if let Some(FormSubmissionResult::Errored { error }) = &self.result {
            delegate.form_submission_errored(cx, self, error);
        }
    }

    fn request_finished<D>(&mut self, cx: &mut FrameContext<'_>, delegate: &mut D)
    where
        D: FormSubmissionDelegate + ?Sized,
    {
        self.state = FormSubmissionState::Stopped;
        let detail = match &self.result {
            Some(FormSubmissionResult::Success { response }) => EventDetail::SubmitEnd {
                success: true,
                status: Some(response.status_code()),
                error: None,
            },
            Some(FormSubmissionResult::Failure { response }) => EventDetail::SubmitEnd {
                success: false,
                status: Some(response.status_code()),
                error: None,
            },
            Some(FormSubmissionResult::Errored { error }) => EventDetail::SubmitEnd {
                success: false,
                status: None,
                error: Some(error.to_string()),
            },
            None => EventDetail::SubmitEnd {
                success: false,
                status: None,
                error: None,
            },
        };
        let mut event = FrameEvent::new(EventName::SubmitEnd, self.form, false, detail);
        cx.dispatch_event(&mut event);
        delegate.form_submission_finished(cx, self);
    }

    fn request_must_redirect(&self) -> bool {
        !self.fetch_request.is_idempotent() && self.must_redirect
    }
}

fn succeeded_without_redirect(response: &FetchResponse) -> bool {
    response.status_code() == 200 && !response.redirected()
}
