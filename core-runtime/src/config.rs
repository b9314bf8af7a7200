//! # Editor Configuration Module
//!
//! Provides configuration management for the lesson editor core.
//!
//! ## Overview
//!
//! An [`EditorConfig`] holds the bridge implementations the core cannot work
//! without, together with the upload tunables. It is built through
//! [`EditorConfigBuilder`], which validates everything up front so a
//! misconfigured host fails at startup instead of on the first save.
//!
//! ## Required Dependencies
//!
//! - `RemoteMediaStore` - Receives staged gallery media
//! - `ContentRepository` - Persists the finished record
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::EditorConfig;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = EditorConfig::builder()
//!     .media_store(Arc::new(MyMediaStore))
//!     .content_repository(Arc::new(MyRepository))
//!     .max_concurrent_uploads(3)
//!     .upload_timeout(Duration::from_secs(60))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{ContentRepository, RemoteMediaStore};
use std::sync::Arc;
use std::time::Duration;

/// Default number of uploads allowed in flight at once
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: usize = 3;

/// Default timeout for a single upload attempt
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of attempts per item within one save
pub const DEFAULT_MAX_UPLOAD_ATTEMPTS: u32 = 3;

/// Default delay before the first retry; doubles on each further attempt
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// Default event bus capacity
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Upper bound for `max_concurrent_uploads`
const MAX_CONCURRENT_UPLOADS_LIMIT: usize = 16;

/// Tunables for draining local media to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSettings {
    /// Maximum uploads in flight at once
    pub max_concurrent_uploads: usize,

    /// Timeout for one upload attempt; expiry fails only that item
    pub upload_timeout: Duration,

    /// Attempts per item within one save before it is reported as failed
    pub max_upload_attempts: u32,

    /// Backoff before the first retry
    pub retry_backoff: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_concurrent_uploads: DEFAULT_MAX_CONCURRENT_UPLOADS,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
            max_upload_attempts: DEFAULT_MAX_UPLOAD_ATTEMPTS,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl UploadSettings {
    /// Delay before attempt number `attempt` (1-based retries).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Validates the upload tunables.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_uploads == 0 {
            return Err(Error::invalid("max_concurrent_uploads", "must be at least 1"));
        }

        if self.max_concurrent_uploads > MAX_CONCURRENT_UPLOADS_LIMIT {
            return Err(Error::invalid(
                "max_concurrent_uploads",
                format!("must not exceed {}", MAX_CONCURRENT_UPLOADS_LIMIT),
            ));
        }

        if self.upload_timeout.is_zero() {
            return Err(Error::invalid("upload_timeout", "must be greater than zero"));
        }

        if self.max_upload_attempts == 0 {
            return Err(Error::invalid("max_upload_attempts", "must be at least 1"));
        }

        Ok(())
    }
}

/// Editor configuration.
///
/// Use [`EditorConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct EditorConfig {
    /// Remote object store for gallery media (required)
    pub media_store: Arc<dyn RemoteMediaStore>,

    /// Row store for lesson records (required)
    pub content_repository: Arc<dyn ContentRepository>,

    /// Upload tunables
    pub upload: UploadSettings,

    /// Event bus capacity
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for EditorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorConfig")
            .field("media_store", &"RemoteMediaStore { ... }")
            .field("content_repository", &"ContentRepository { ... }")
            .field("upload", &self.upload)
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl EditorConfig {
    /// Creates a new builder.
    pub fn builder() -> EditorConfigBuilder {
        EditorConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.upload.validate()?;

        if self.event_buffer_size == 0 {
            return Err(Error::invalid("event_buffer_size", "must be greater than zero"));
        }

        Ok(())
    }
}

/// Builder for [`EditorConfig`].
#[derive(Default)]
pub struct EditorConfigBuilder {
    media_store: Option<Arc<dyn RemoteMediaStore>>,
    content_repository: Option<Arc<dyn ContentRepository>>,
    upload: UploadSettings,
    event_buffer_size: Option<usize>,
}

impl EditorConfigBuilder {
    /// Sets the remote media store.
    pub fn media_store(mut self, store: Arc<dyn RemoteMediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    /// Sets the content repository.
    pub fn content_repository(mut self, repository: Arc<dyn ContentRepository>) -> Self {
        self.content_repository = Some(repository);
        self
    }

    /// Sets the maximum number of uploads in flight.
    pub fn max_concurrent_uploads(mut self, max: usize) -> Self {
        self.upload.max_concurrent_uploads = max;
        self
    }

    /// Sets the per-attempt upload timeout.
    pub fn upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload.upload_timeout = timeout;
        self
    }

    /// Sets how many times an item is attempted within one save.
    pub fn max_upload_attempts(mut self, attempts: u32) -> Self {
        self.upload.max_upload_attempts = attempts;
        self
    }

    /// Sets the initial retry backoff.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.upload.retry_backoff = backoff;
        self
    }

    /// Replaces all upload tunables at once.
    pub fn upload_settings(mut self, settings: UploadSettings) -> Self {
        self.upload = settings;
        self
    }

    /// Sets the event bus capacity.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] when a required bridge was not
    /// provided and [`Error::InvalidSetting`] when a tunable is out of range.
    pub fn build(self) -> Result<EditorConfig> {
        let media_store = self.media_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "RemoteMediaStore".to_string(),
            message: "RemoteMediaStore implementation is required to upload gallery media. \
                     Desktop: use bridge_desktop::HttpMediaStore. \
                     Mobile: inject the platform storage SDK adapter."
                .to_string(),
        })?;

        let content_repository =
            self.content_repository
                .ok_or_else(|| Error::CapabilityMissing {
                    capability: "ContentRepository".to_string(),
                    message: "ContentRepository implementation is required to persist lessons. \
                             Desktop: use bridge_desktop::HttpContentRepository. \
                             Mobile: inject the platform row-store adapter."
                        .to_string(),
                })?;

        let config = EditorConfig {
            media_store,
            content_repository,
            upload: self.upload,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::{
        error::Result as BridgeResult, ContentFields, ContentId, LocalMediaRef,
    };

    struct NullStore;

    #[async_trait]
    impl RemoteMediaStore for NullStore {
        async fn upload(&self, media: &LocalMediaRef) -> BridgeResult<String> {
            Ok(format!("https://cdn.test/{}", media.file_name()))
        }
    }

    struct NullRepository;

    #[async_trait]
    impl ContentRepository for NullRepository {
        async fn save(
            &self,
            _content_id: &ContentId,
            _media_urls: &[String],
            _video_urls: &[String],
            _fields: &ContentFields,
        ) -> BridgeResult<()> {
            Ok(())
        }
    }

    fn complete_builder() -> EditorConfigBuilder {
        EditorConfig::builder()
            .media_store(Arc::new(NullStore))
            .content_repository(Arc::new(NullRepository))
    }

    #[test]
    fn test_defaults() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.upload.max_concurrent_uploads, 3);
        assert_eq!(config.upload.upload_timeout, Duration::from_secs(60));
        assert_eq!(config.upload.max_upload_attempts, 3);
        assert_eq!(config.event_buffer_size, DEFAULT_EVENT_BUFFER_SIZE);
    }

    #[test]
    fn test_missing_media_store() {
        let err = EditorConfig::builder()
            .content_repository(Arc::new(NullRepository))
            .build()
            .unwrap_err();

        match err {
            Error::CapabilityMissing { capability, .. } => {
                assert_eq!(capability, "RemoteMediaStore")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_content_repository() {
        let err = EditorConfig::builder()
            .media_store(Arc::new(NullStore))
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::CapabilityMissing { ref capability, .. } if capability == "ContentRepository"
        ));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = complete_builder().max_concurrent_uploads(0).build().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSetting {
                setting: "max_concurrent_uploads",
                ..
            }
        ));
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let err = complete_builder()
            .max_concurrent_uploads(MAX_CONCURRENT_UPLOADS_LIMIT + 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = complete_builder()
            .upload_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { .. }));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = complete_builder().max_upload_attempts(0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidSetting { .. }));
    }

    #[test]
    fn test_backoff_doubles() {
        let settings = UploadSettings {
            retry_backoff: Duration::from_millis(100),
            ..UploadSettings::default()
        };

        assert_eq!(settings.backoff_for(1), Duration::from_millis(100));
        assert_eq!(settings.backoff_for(2), Duration::from_millis(200));
        assert_eq!(settings.backoff_for(3), Duration::from_millis(400));
    }

    #[test]
    fn test_debug_hides_bridges() {
        let config = complete_builder().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("RemoteMediaStore { ... }"));
        assert!(debug.contains("max_concurrent_uploads: 3"));
    }
}
