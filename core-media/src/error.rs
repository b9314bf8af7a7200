use thiserror::Error;

use crate::item::MediaKey;

/// Errors raised by gallery mutations.
///
/// All of them indicate wiring mistakes in the caller (stale keys, indices
/// from another list); a correctly wired UI never observes them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Media item {key} not found")]
    NotFound { key: MediaKey },

    #[error("Index {index} out of range for gallery of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid transition for media item {key}: {reason}")]
    InvalidTransition { key: MediaKey, reason: String },

    #[error("Media item {key} has not been uploaded yet")]
    Unresolved { key: MediaKey },

    #[error("Invalid drag gesture: {0}")]
    InvalidGesture(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;
