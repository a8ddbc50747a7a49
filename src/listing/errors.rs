use std::time::Duration;

use thiserror::Error;

use crate::listing::validation::FieldErrors;
use crate::storage::StoreError;

/// Why a create-listing call did not produce a listing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Listing service timed out after {0:?}")]
    Timeout(Duration),

    #[error("Listing rejected: {0}")]
    Rejected(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SubmissionError {
    /// Transport-level failures are worth retrying as-is; rejections are not
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmissionError::Network(_) | SubmissionError::Timeout(_))
    }

    /// Text for the banner shown at the final step
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Network(_) | SubmissionError::Unexpected(_) => {
                "Failed to create listing. Please try again.".to_string()
            }
            SubmissionError::Timeout(_) => {
                "Creating the listing took too long. Please try again.".to_string()
            }
            SubmissionError::Rejected(reason) => reason.clone(),
            SubmissionError::Unauthenticated => {
                "You need to sign in before creating a listing.".to_string()
            }
        }
    }
}

impl From<StoreError> for SubmissionError {
    fn from(e: StoreError) -> Self {
        SubmissionError::Unexpected(e.to_string())
    }
}

/// Submission failure as kept in the wizard state until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalError {
    pub message: String,
    pub retryable: bool,
    pub cause: SubmissionError,
}

impl From<SubmissionError> for TerminalError {
    fn from(cause: SubmissionError) -> Self {
        Self {
            message: cause.user_message(),
            retryable: cause.is_retryable(),
            cause,
        }
    }
}

/// Rejected wizard operations. None of these change the draft.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Step {requested} is outside 1..={total}")]
    StepOutOfRange { requested: u8, total: u8 },

    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),

    #[error("Listing can only be submitted from the last step")]
    NotOnFinalStep,

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("The wizard is closed")]
    Closed,

    #[error("No image at position {0}")]
    NoSuchImage(usize),

    #[error("{0}")]
    Submission(SubmissionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_failures_are_retryable() {
        assert!(SubmissionError::Network("reset".into()).is_retryable());
        assert!(SubmissionError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(!SubmissionError::Rejected("price too low".into()).is_retryable());
        assert!(!SubmissionError::Unauthenticated.is_retryable());
    }

    #[test]
    fn rejection_reason_is_shown_verbatim() {
        let terminal = TerminalError::from(SubmissionError::Rejected("Title already used".into()));
        assert_eq!(terminal.message, "Title already used");
        assert!(!terminal.retryable);
    }
}
