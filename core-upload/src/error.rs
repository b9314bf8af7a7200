use core_content::ContentError;
use core_media::MediaError;
use thiserror::Error;

/// Errors that abort a save before or during reconciliation.
///
/// Upload and repository failures are not errors here; they are reported
/// through [`SaveOutcome`](crate::SaveOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Upload settings rejected: {0}")]
    Settings(#[from] core_runtime::Error),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

pub type Result<T> = std::result::Result<T, UploadError>;
