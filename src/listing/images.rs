use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use image::ImageFormat;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{FileHandle, ImageAttachment, ListingDraft, PreviewHandle};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("{0} is empty")]
    Empty(String),

    #[error("{0} is not a supported image")]
    Unsupported(String),
}

impl AttachmentError {
    pub fn file_name(&self) -> &str {
        match self {
            AttachmentError::Empty(name) | AttachmentError::Unsupported(name) => name,
        }
    }
}

/// Turns picked files into previews the UI can render before upload
pub trait PreviewProvider: Send + Sync {
    fn create(&self, file: &FileHandle) -> Result<PreviewHandle, AttachmentError>;

    /// Release a preview. Unknown handles are ignored.
    fn revoke(&self, handle: &PreviewHandle);
}

/// Outcome of one `add_images` batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachReport {
    /// Positions in the draft of the files that were attached
    pub attached: Vec<usize>,
    pub rejected: Vec<AttachmentError>,
}

impl AttachReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Accepted listing image format, detected from the file header
fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    match image::guess_format(bytes) {
        Ok(
            format @ (ImageFormat::Jpeg
            | ImageFormat::Png
            | ImageFormat::Gif
            | ImageFormat::WebP
            | ImageFormat::Bmp),
        ) => Some(format),
        _ => None,
    }
}

/// Previews valid for the lifetime of this provider.
///
/// Handles look like `blob:session/<uuid>` and are tracked so revocation can
/// be checked.
#[derive(Debug, Default)]
pub struct SessionPreviews {
    live: Mutex<HashSet<PreviewHandle>>,
}

impl SessionPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self) -> MutexGuard<'_, HashSet<PreviewHandle>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.live().contains(handle)
    }

    pub fn live_count(&self) -> usize {
        self.live().len()
    }
}

impl PreviewProvider for SessionPreviews {
    fn create(&self, file: &FileHandle) -> Result<PreviewHandle, AttachmentError> {
        if file.bytes.is_empty() {
            return Err(AttachmentError::Empty(file.name.clone()));
        }
        let format = sniff_format(&file.bytes)
            .ok_or_else(|| AttachmentError::Unsupported(file.name.clone()))?;

        let handle = PreviewHandle(format!("blob:session/{}", Uuid::new_v4()));
        debug!("Preview {} for {} ({:?}, {} bytes)", handle, file.name, format, file.size);
        self.live().insert(handle.clone());
        Ok(handle)
    }

    fn revoke(&self, handle: &PreviewHandle) {
        if self.live().remove(handle) {
            debug!("Revoked preview {}", handle);
        }
    }
}

/// Append `files` to the draft in the order given.
///
/// Files without a preview are left out and listed in the report; the rest of
/// the batch is still attached.
pub fn add_images(
    draft: &mut ListingDraft,
    files: Vec<FileHandle>,
    previews: &dyn PreviewProvider,
) -> AttachReport {
    let mut report = AttachReport::default();

    for file in files {
        match previews.create(&file) {
            Ok(preview) => {
                draft.images.push(ImageAttachment { file, preview });
                report.attached.push(draft.images.len() - 1);
            }
            Err(e) => {
                warn!("Skipping attachment: {}", e);
                report.rejected.push(e);
            }
        }
    }

    report
}

/// Remove the image at `index`, revoking its preview. Later images shift down by one.
pub fn remove_image(
    draft: &mut ListingDraft,
    index: usize,
    previews: &dyn PreviewProvider,
) -> Option<ImageAttachment> {
    if index >= draft.images.len() {
        return None;
    }
    let removed = draft.images.remove(index);
    previews.revoke(&removed.preview);
    Some(removed)
}

/// Revoke every preview held by the draft
pub fn release_all(draft: &ListingDraft, previews: &dyn PreviewProvider) {
    for image in &draft.images {
        previews.revoke(&image.preview);
    }
}
