use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Remote service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Whether retrying the same call may succeed.
    ///
    /// Client-side rejections (4xx) are permanent except 408 and 429. A local
    /// file that is gone or unreadable is permanent too.
    pub fn is_transient(&self) -> bool {
        match self {
            BridgeError::Rejected { status, .. } => {
                matches!(status, 408 | 429) || !(400..500).contains(status)
            }
            BridgeError::NotAvailable(_) => false,
            BridgeError::Io(err) => !matches!(
                err.kind(),
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied
            ),
            BridgeError::OperationFailed(_) => true,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(BridgeError::OperationFailed("reset".into()).is_transient());
        assert!(BridgeError::Rejected {
            status: 503,
            message: "busy".into()
        }
        .is_transient());
        assert!(!BridgeError::Rejected {
            status: 413,
            message: "too large".into()
        }
        .is_transient());
        assert!(!BridgeError::NotAvailable("store".into()).is_transient());
    }

    #[test]
    fn test_retry_later_statuses_are_transient() {
        for status in [408, 429] {
            let err = BridgeError::Rejected {
                status,
                message: "slow down".into(),
            };
            assert!(err.is_transient(), "{status} should be retried");
        }
        assert!(!BridgeError::Rejected {
            status: 404,
            message: "missing".into()
        }
        .is_transient());
    }

    #[test]
    fn test_missing_local_file_is_permanent() {
        let gone = BridgeError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!gone.is_transient());

        let interrupted =
            BridgeError::from(std::io::Error::new(std::io::ErrorKind::Interrupted, "signal"));
        assert!(interrupted.is_transient());
    }
}
