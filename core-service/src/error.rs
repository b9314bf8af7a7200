use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Edit session for {content_id} is closed")]
    SessionClosed { content_id: String },

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Media error: {0}")]
    Media(#[from] core_media::MediaError),

    #[error("Content error: {0}")]
    Content(#[from] core_content::ContentError),

    #[error("Upload error: {0}")]
    Upload(#[from] core_upload::UploadError),
}

impl CoreError {
    /// Errors the user can fix by correcting their input (empty name,
    /// malformed or duplicate video URL). Everything else is a wiring or
    /// environment problem.
    pub fn is_user_error(&self) -> bool {
        match self {
            CoreError::Content(err) => err.is_user_error(),
            CoreError::Upload(core_upload::UploadError::Content(err)) => err.is_user_error(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
