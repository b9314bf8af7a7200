use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Empty or malformed user input; shown inline next to the field
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Duplicate entry: {value}")]
    DuplicateEntry { value: String },

    #[error("Index {index} out of range for list of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ContentError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the user can fix the error by editing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::DuplicateEntry { .. })
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
