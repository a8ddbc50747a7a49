use async_trait::async_trait;

use crate::listing::errors::SubmissionError;
use crate::listing::types::CreateListingRequest;
use crate::models::ListingId;

/// Backend that turns a finished draft into a published listing, or saves
/// changes to one that already exists.
/// Implemented by the HTTP client and by the local mock backend.
#[async_trait]
pub trait ListingService: Send + Sync {
    async fn create_listing(
        &self,
        request: &CreateListingRequest,
        token: &str,
    ) -> Result<ListingId, SubmissionError>;

    /// Replace the editable fields of listing `id`, keeping its id
    async fn update_listing(
        &self,
        id: &ListingId,
        request: &CreateListingRequest,
        token: &str,
    ) -> Result<ListingId, SubmissionError>;

    /// Name used in logs
    fn service_name(&self) -> &'static str;
}
