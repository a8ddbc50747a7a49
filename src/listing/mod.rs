pub mod draft;
pub mod errors;
pub mod http;
pub mod images;
pub mod local;
pub mod steps;
pub mod traits;
pub mod types;
pub mod validation;
pub mod wizard;

pub use errors::{SubmissionError, TerminalError, WizardError};
pub use http::HttpListingService;
pub use images::{AttachReport, AttachmentError, PreviewProvider, SessionPreviews};
pub use local::LocalListingService;
pub use steps::{WizardStep, TOTAL_STEPS};
pub use traits::ListingService;
pub use types::{CreateListingRequest, ImageRef, StoredListing};
pub use validation::FieldErrors;
pub use wizard::{ListingWizard, WizardState, WizardStatus};
