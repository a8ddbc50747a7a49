use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::listing::errors::{SubmissionError, TerminalError, WizardError};
use crate::listing::images::{self, AttachReport, PreviewProvider};
use crate::listing::steps::{WizardStep, TOTAL_STEPS};
use crate::listing::traits::ListingService;
use crate::listing::types::{CreateListingRequest, ImageRef, StoredListing};
use crate::listing::validation::{self, FieldErrors};
use crate::models::{FileHandle, ImageAttachment, ListingDraft, ListingField, ListingId, ListingKind};
use crate::session::SessionProvider;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the wizard is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStatus {
    Editing,
    Submitting,
    Succeeded(ListingId),
    Abandoned,
}

/// Control state of one wizard session. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub errors: FieldErrors,
    pub status: WizardStatus,
    /// Only ever set while `status` is `Editing`
    pub terminal_error: Option<TerminalError>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::first(),
            errors: FieldErrors::new(),
            status: WizardStatus::Editing,
            terminal_error: None,
        }
    }
}

/// Listing being edited rather than created
#[derive(Debug, Clone)]
struct EditTarget {
    id: ListingId,
    /// Images already uploaded, sent ahead of any newly attached ones
    images: Vec<ImageRef>,
    owner_id: Option<String>,
}

#[derive(Debug, Default)]
struct Session {
    draft: ListingDraft,
    state: WizardState,
    editing: Option<EditTarget>,
}

impl Session {
    fn ensure_editable(&self) -> Result<(), WizardError> {
        match self.state.status {
            WizardStatus::Editing => Ok(()),
            WizardStatus::Submitting => Err(WizardError::SubmissionInFlight),
            WizardStatus::Succeeded(_) | WizardStatus::Abandoned => Err(WizardError::Closed),
        }
    }
}

/// Multi-step add-listing flow: draft, navigation, validation, attachments and submission.
///
/// All methods take `&self`; the internal lock is released before the
/// submission call is awaited, so a second `submit` issued while the first is
/// pending sees the in-flight status and returns without calling the service.
pub struct ListingWizard {
    session: Mutex<Session>,
    service: Arc<dyn ListingService>,
    auth: Arc<dyn SessionProvider>,
    previews: Arc<dyn PreviewProvider>,
    submit_timeout: Duration,
}

impl ListingWizard {
    pub fn new(
        service: Arc<dyn ListingService>,
        auth: Arc<dyn SessionProvider>,
        previews: Arc<dyn PreviewProvider>,
    ) -> Self {
        debug!("Add-listing wizard opened ({} steps)", TOTAL_STEPS);
        Self {
            session: Mutex::new(Session::default()),
            service,
            auth,
            previews,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Open the wizard on a stored listing. Submitting saves the changes
    /// to that listing instead of creating a new one.
    pub fn for_existing(
        listing: &StoredListing,
        service: Arc<dyn ListingService>,
        auth: Arc<dyn SessionProvider>,
        previews: Arc<dyn PreviewProvider>,
    ) -> Self {
        let wizard = Self::new(service, auth, previews);
        {
            let mut session = wizard.lock();
            session.draft = listing.to_draft();
            session.editing = Some(EditTarget {
                id: ListingId(listing.id.clone()),
                images: listing.listing.images.clone(),
                owner_id: listing.listing.owner_id.clone(),
            });
        }
        info!("Editing listing {}", listing.id);
        wizard
    }

    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current_step(&self) -> u8 {
        self.lock().state.step.number()
    }

    pub fn state(&self) -> WizardState {
        self.lock().state.clone()
    }

    pub fn draft(&self) -> ListingDraft {
        self.lock().draft.clone()
    }

    /// Id of the listing being edited, if any
    pub fn editing(&self) -> Option<ListingId> {
        self.lock().editing.as_ref().map(|target| target.id.clone())
    }

    /// Previously uploaded images of the listing being edited
    pub fn existing_images(&self) -> Vec<ImageRef> {
        self.lock()
            .editing
            .as_ref()
            .map(|target| target.images.clone())
            .unwrap_or_default()
    }

    /// Apply an arbitrary change to the draft
    pub fn edit<R>(&self, change: impl FnOnce(&mut ListingDraft) -> R) -> Result<R, WizardError> {
        let mut session = self.lock();
        session.ensure_editable()?;
        Ok(change(&mut session.draft))
    }

    pub fn set_field(&self, field: ListingField, value: impl Into<String>) -> Result<(), WizardError> {
        let value = value.into();
        debug!("Draft field {} changed", field);
        self.edit(|draft| draft.set_field(field, value))
    }

    pub fn set_kind(&self, kind: ListingKind) -> Result<(), WizardError> {
        self.edit(|draft| draft.kind = kind)
    }

    pub fn toggle_feature(&self, feature: &str) -> Result<bool, WizardError> {
        self.edit(|draft| draft.toggle_feature(feature))
    }

    pub fn toggle_amenity(&self, amenity: &str) -> Result<bool, WizardError> {
        self.edit(|draft| draft.toggle_amenity(amenity))
    }

    /// Attach files in selection order; files that cannot be previewed are reported
    pub fn add_images(&self, files: Vec<FileHandle>) -> Result<AttachReport, WizardError> {
        let mut session = self.lock();
        session.ensure_editable()?;
        let report = images::add_images(&mut session.draft, files, self.previews.as_ref());
        info!(
            "Attached {} image(s), rejected {}",
            report.attached.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    pub fn remove_image(&self, index: usize) -> Result<ImageAttachment, WizardError> {
        let mut session = self.lock();
        session.ensure_editable()?;
        images::remove_image(&mut session.draft, index, self.previews.as_ref())
            .ok_or(WizardError::NoSuchImage(index))
    }

    /// Move to step `n` (1-based).
    ///
    /// Moving forward requires the current step, and any step skipped over,
    /// to validate; on failure the errors are recorded and the step stays put.
    /// Moving back always succeeds and keeps the draft as entered.
    pub fn go_to_step(&self, n: u8) -> Result<WizardStep, WizardError> {
        let mut session = self.lock();
        session.ensure_editable()?;

        let target = WizardStep::from_number(n).ok_or(WizardError::StepOutOfRange {
            requested: n,
            total: TOTAL_STEPS,
        })?;
        let current = session.state.step;

        if target > current {
            let errors: FieldErrors = current
                .through(target)
                .flat_map(|step| validation::validate_step(&session.draft, step))
                .collect();
            if !errors.is_empty() {
                debug!("Step {} blocked by {} field error(s)", current.number(), errors.len());
                session.state.errors = errors.clone();
                return Err(WizardError::Invalid(errors));
            }
        }

        session.state.errors.clear();
        session.state.step = target;
        info!("Wizard moved to step {}", target);
        Ok(target)
    }

    pub fn next(&self) -> Result<WizardStep, WizardError> {
        let current = self.current_step();
        self.go_to_step(current.saturating_add(1))
    }

    pub fn back(&self) -> Result<WizardStep, WizardError> {
        let current = self.current_step();
        self.go_to_step(current.saturating_sub(1))
    }

    /// Hide the submission error banner
    pub fn dismiss_error(&self) {
        self.lock().state.terminal_error = None;
    }

    /// Leave the wizard without creating a listing. The draft is discarded.
    pub fn abandon(&self) {
        let mut session = self.lock();
        if matches!(session.state.status, WizardStatus::Succeeded(_) | WizardStatus::Abandoned) {
            return;
        }
        images::release_all(&session.draft, self.previews.as_ref());
        session.draft = ListingDraft::default();
        session.editing = None;
        session.state.status = WizardStatus::Abandoned;
        session.state.errors.clear();
        session.state.terminal_error = None;
        info!("Wizard abandoned, draft discarded");
    }

    /// Send the draft to the listing service.
    ///
    /// Allowed only from the last step with a fully valid draft. On failure
    /// the draft and step are left exactly as they were and the error is kept
    /// as the terminal error until dismissed or the next attempt.
    pub async fn submit(&self) -> Result<ListingId, WizardError> {
        let (request, token, editing) = {
            let mut session = self.lock();
            session.ensure_editable()?;

            if !session.state.step.is_last() {
                return Err(WizardError::NotOnFinalStep);
            }

            let owner = self.auth.current_user().map(|u| u.id);
            let mut request = match CreateListingRequest::from_draft(&session.draft, owner) {
                Ok(request) => request,
                Err(errors) => {
                    session.state.errors = errors.clone();
                    return Err(WizardError::Invalid(errors));
                }
            };

            session.state.errors.clear();

            let Some(token) = self.auth.token() else {
                let cause = SubmissionError::Unauthenticated;
                session.state.terminal_error = Some(cause.clone().into());
                return Err(WizardError::Submission(cause));
            };

            if let Some(target) = &session.editing {
                let mut images = target.images.clone();
                images.append(&mut request.images);
                request.images = images;
                if request.owner_id.is_none() {
                    request.owner_id = target.owner_id.clone();
                }
            }

            session.state.terminal_error = None;
            session.state.status = WizardStatus::Submitting;
            let editing = session.editing.as_ref().map(|target| target.id.clone());
            (request, token, editing)
        };

        info!("Submitting listing '{}' to {}", request.title, self.service.service_name());

        let call = async {
            match &editing {
                Some(id) => self.service.update_listing(id, &request, &token).await,
                None => self.service.create_listing(&request, &token).await,
            }
        };
        let outcome = match tokio::time::timeout(self.submit_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::Timeout(self.submit_timeout)),
        };

        let mut session = self.lock();
        if session.state.status != WizardStatus::Submitting {
            warn!("Submission finished after the wizard was closed");
            return outcome.map_err(WizardError::Submission);
        }

        match outcome {
            Ok(id) => {
                images::release_all(&session.draft, self.previews.as_ref());
                session.draft = ListingDraft::default();
                session.editing = None;
                session.state.status = WizardStatus::Succeeded(id.clone());
                info!("✅ Listing {} saved", id);
                Ok(id)
            }
            Err(e) => {
                warn!("Listing submission failed: {}", e);
                session.state.status = WizardStatus::Editing;
                session.state.terminal_error = Some(e.clone().into());
                Err(WizardError::Submission(e))
            }
        }
    }
}

impl Drop for ListingWizard {
    fn drop(&mut self) {
        let session = self.session.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !session.draft.images.is_empty() {
            debug!("Wizard dropped, releasing {} preview(s)", session.draft.images.len());
            images::release_all(&session.draft, self.previews.as_ref());
        }
    }
}
