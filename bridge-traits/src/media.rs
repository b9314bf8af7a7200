//! Remote Media Storage Abstractions
//!
//! Provides the contract for moving locally staged media bytes into the
//! host's remote object store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Handle to media bytes staged on the editing device.
///
/// The `location` is opaque to the core: desktop hosts use a filesystem path,
/// mobile hosts typically hand over a content URI from the photo picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalMediaRef {
    /// Host-specific location of the staged bytes
    pub location: String,
    /// MIME type reported by the picker, if known
    pub mime_type: Option<String>,
}

impl LocalMediaRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Last path segment of the location, used as upload file name and in logs.
    pub fn file_name(&self) -> &str {
        self.location
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.location.as_str())
    }
}

impl fmt::Display for LocalMediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Remote media store trait
///
/// Abstracts the object storage backend that receives gallery media:
/// - Desktop: HTTP upload endpoint (see `bridge-desktop`)
/// - Mobile: platform SDK of the hosting backend
///
/// Uploads are not assumed to be idempotent. Callers must not upload the same
/// staged item again once a remote URL has been obtained for it.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::media::{LocalMediaRef, RemoteMediaStore};
///
/// async fn push(store: &dyn RemoteMediaStore) -> Result<String> {
///     let staged = LocalMediaRef::new("/tmp/picked/IMG_0001.jpg").with_mime_type("image/jpeg");
///     store.upload(&staged).await
/// }
/// ```
#[async_trait]
pub trait RemoteMediaStore: Send + Sync {
    /// Upload the staged bytes and return the public URL of the stored object.
    async fn upload(&self, media: &LocalMediaRef) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(
            LocalMediaRef::new("/home/user/pictures/cover.jpg").file_name(),
            "cover.jpg"
        );
        assert_eq!(
            LocalMediaRef::new("C:\\Users\\Jan\\cover.png").file_name(),
            "cover.png"
        );
        assert_eq!(
            LocalMediaRef::new("content://media/external/images/42").file_name(),
            "42"
        );
        assert_eq!(LocalMediaRef::new("cover.jpg").file_name(), "cover.jpg");
    }

    #[test]
    fn test_display_hides_directories() {
        let staged = LocalMediaRef::new("/private/var/staging/a.heic").with_mime_type("image/heic");
        assert_eq!(staged.to_string(), "a.heic");
        assert_eq!(staged.mime_type.as_deref(), Some("image/heic"));
    }
}
