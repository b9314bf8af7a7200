//! The in-memory record being edited.

use bridge_traits::{ContentFields, ContentId, ContentRecord};
use core_media::MediaCollection;
use serde::Serialize;

use crate::accessibility::AccessibilityTextBuilder;
use crate::error::{ContentError, Result};
use crate::video_urls::VideoUrlList;

/// Scalar fields, gallery and video list of one lesson.
///
/// A draft is committed or discarded as a unit. Gallery and video list are
/// reachable mutably so callers go through their own mutators, which keep
/// the ordering invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDraft {
    id: ContentId,
    fields: ContentFields,
    media: MediaCollection,
    videos: VideoUrlList,
}

impl ContentDraft {
    /// Empty draft for a record that has not been persisted yet.
    pub fn new(id: ContentId) -> Self {
        Self {
            id,
            fields: ContentFields::default(),
            media: MediaCollection::new(),
            videos: VideoUrlList::new(),
        }
    }

    /// Draft seeded from a persisted record; its media start out remote.
    pub fn from_record(record: ContentRecord) -> Result<Self> {
        let videos = VideoUrlList::from_values(&record.video_urls)?;
        Ok(Self {
            id: record.id,
            fields: record.fields,
            media: MediaCollection::from_remote_urls(record.media_urls),
            videos,
        })
    }

    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn fields(&self) -> &ContentFields {
        &self.fields
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.description = description.into();
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.fields.style = style.into();
    }

    pub fn media(&self) -> &MediaCollection {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaCollection {
        &mut self.media
    }

    pub fn videos(&self) -> &VideoUrlList {
        &self.videos
    }

    pub fn videos_mut(&mut self) -> &mut VideoUrlList {
        &mut self.videos
    }

    /// Checks that must pass before any upload is issued.
    pub fn validate_for_save(&self) -> Result<()> {
        if self.fields.name.trim().is_empty() {
            return Err(ContentError::validation("name", "must not be empty"));
        }
        Ok(())
    }

    /// Assistive summary of the current state, rebuilt on every call.
    pub fn accessibility_text(&self) -> String {
        AccessibilityTextBuilder::build(&self.fields, self.media.len(), self.videos.len())
    }
}
