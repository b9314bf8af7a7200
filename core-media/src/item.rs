//! Gallery item model.

use bridge_traits::LocalMediaRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a gallery item.
///
/// Assigned once when the item enters a collection and never reused. Reorder
/// and upload reconciliation address items by key, never by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaKey(Uuid);

impl MediaKey {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MediaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the bytes of an item currently live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MediaSource {
    /// Staged on the device, not uploaded yet
    Local(LocalMediaRef),
    /// Stored remotely, referenced by URL
    Remote(String),
}

/// One entry of the gallery.
///
/// Fields are private: `order` is maintained by
/// [`MediaCollection`](crate::MediaCollection) and always equals the item's
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    key: MediaKey,
    source: MediaSource,
    order: usize,
}

impl MediaItem {
    pub(crate) fn new(source: MediaSource, order: usize) -> Self {
        Self {
            key: MediaKey::new(),
            source,
            order,
        }
    }

    pub fn key(&self) -> MediaKey {
        self.key
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    pub fn is_local(&self) -> bool {
        matches!(self.source, MediaSource::Local(_))
    }

    pub fn local_ref(&self) -> Option<&LocalMediaRef> {
        match &self.source {
            MediaSource::Local(local) => Some(local),
            MediaSource::Remote(_) => None,
        }
    }

    pub fn remote_url(&self) -> Option<&str> {
        match &self.source {
            MediaSource::Local(_) => None,
            MediaSource::Remote(url) => Some(url),
        }
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }

    pub(crate) fn set_source(&mut self, source: MediaSource) {
        self.source = source;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let a = MediaItem::new(MediaSource::Remote("https://cdn.test/a.jpg".into()), 0);
        let b = MediaItem::new(MediaSource::Remote("https://cdn.test/a.jpg".into()), 0);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_exactly_one_location() {
        let local = MediaItem::new(MediaSource::Local(LocalMediaRef::new("/tmp/a.jpg")), 0);
        assert!(local.is_local());
        assert!(local.local_ref().is_some());
        assert!(local.remote_url().is_none());

        let remote = MediaItem::new(MediaSource::Remote("https://cdn.test/a.jpg".into()), 1);
        assert!(!remote.is_local());
        assert!(remote.local_ref().is_none());
        assert_eq!(remote.remote_url(), Some("https://cdn.test/a.jpg"));
        assert_eq!(remote.order(), 1);
    }
}
