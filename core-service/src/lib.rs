//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (remote media store,
//! content repository) into the editor core and exposes [`EditSession`], the
//! single entry point an edit screen talks to. Desktop apps typically enable
//! the `desktop-shims` feature (which depends on `bridge-desktop`) and build
//! their configuration with [`desktop_config`].

pub mod error;
pub mod session;

pub use error::{CoreError, Result};
pub use session::{EditSession, DEFAULT_SLOT_EXTENT};

pub use bridge_traits::{ContentFields, ContentId, ContentRecord, LocalMediaRef};
pub use core_media::MediaKey;
pub use core_runtime::config::EditorConfig;
pub use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
pub use core_upload::{PartialFailure, SaveOutcome, SaveReport, UploadFailure};

/// Endpoints of the HTTP backend used by desktop hosts.
#[cfg(feature = "desktop-shims")]
#[derive(Debug, Clone)]
pub struct DesktopEndpoints {
    /// Endpoint receiving raw media uploads
    pub upload_url: String,
    /// Base URL of the content API; records live at `<base>/content/<id>`
    pub content_api_url: String,
    pub auth_token: Option<String>,
}

/// Build an [`EditorConfig`] backed by the `bridge-desktop` HTTP adapters.
///
/// ```no_run
/// # #[cfg(feature = "desktop-shims")]
/// # fn example() -> core_service::Result<()> {
/// use core_service::{desktop_config, ContentId, DesktopEndpoints, EditSession};
///
/// let config = desktop_config(DesktopEndpoints {
///     upload_url: "https://api.example/media".to_string(),
///     content_api_url: "https://api.example".to_string(),
///     auth_token: None,
/// })?;
/// let session = EditSession::new(&config, ContentId::new("lesson-1"))?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn desktop_config(endpoints: DesktopEndpoints) -> Result<EditorConfig> {
    use bridge_desktop::{HttpContentRepository, HttpMediaStore};
    use std::sync::Arc;

    let mut media_store = HttpMediaStore::new(&endpoints.upload_url)
        .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;
    let mut repository = HttpContentRepository::new(&endpoints.content_api_url)
        .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;

    if let Some(token) = endpoints.auth_token {
        media_store = media_store.with_auth_token(token.clone());
        repository = repository.with_auth_token(token);
    }

    Ok(EditorConfig::builder()
        .media_store(Arc::new(media_store))
        .content_repository(Arc::new(repository))
        .build()?)
}

#[cfg(all(test, feature = "desktop-shims"))]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_config_uses_defaults() {
        let config = desktop_config(DesktopEndpoints {
            upload_url: "https://api.test/media".to_string(),
            content_api_url: "https://api.test".to_string(),
            auth_token: Some("token".to_string()),
        })
        .unwrap();

        assert_eq!(config.upload.max_concurrent_uploads, 3);
    }

    #[test]
    fn test_desktop_config_rejects_bad_url() {
        let err = desktop_config(DesktopEndpoints {
            upload_url: "::".to_string(),
            content_api_url: "https://api.test".to_string(),
            auth_token: None,
        })
        .unwrap_err();

        assert!(matches!(err, CoreError::InitializationFailed(_)));
    }
}
