//! Error types

use weft_net::NetError;

/// Frame controller errors
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A controller needs its element's id for targeting
    #[error("frame element has no id")]
    MissingFrameId,

    #[error(transparent)]
    Net(#[from] NetError),
}

/// Terminal error of a form submission, reported to the delegate
/// rather than thrown.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmissionError {
    /// A non-idempotent submission expecting a redirect received a
    /// bare 200
    #[error("Form responses must redirect to another location")]
    MustRedirect,

    #[error(transparent)]
    Net(#[from] NetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_redirect_message_is_fixed() {
        assert_eq!(
            SubmissionError::MustRedirect.to_string(),
            "Form responses must redirect to another location"
        );
    }
}
