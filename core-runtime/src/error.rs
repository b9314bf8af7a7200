use thiserror::Error;

/// Errors raised while assembling the editor runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tunable is outside its accepted range
    #[error("Invalid setting `{setting}`: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },

    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// The tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn invalid(setting: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
