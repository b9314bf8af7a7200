//! # Edit Session
//!
//! One open edit screen: a [`ContentDraft`], the coordinator that saves it,
//! and the event bus the host listens on.
//!
//! All edits are synchronous and go through the draft's own mutators, so the
//! gallery and video list keep their ordering invariants. `save` is the only
//! async operation.
//!
//! ## Lifecycle
//!
//! ```text
//! new/open ──> editing ──save──> saved ──edit──> editing
//!                 │                │
//!                 └────discard─────┴──> closed (every call fails with SessionClosed)
//! ```

use bridge_traits::{ContentFields, ContentId, ContentRecord, LocalMediaRef};
use core_content::{ContentDraft, VideoUrlList};
use core_media::{MediaCollection, MediaKey, ReorderController};
use core_runtime::config::EditorConfig;
use core_runtime::events::{CoreEvent, DraftEvent, EventBus, EventStream, MediaEvent};
use core_upload::{SaveOutcome, UploadCoordinator};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::error::{CoreError, Result};

/// Drag displacement unit when the host does not set one: one slot.
pub const DEFAULT_SLOT_EXTENT: f64 = 1.0;

pub struct EditSession {
    draft: ContentDraft,
    coordinator: UploadCoordinator,
    reorder: ReorderController,
    events: EventBus,
    cancel: CancellationToken,
    discarded: bool,
    dirty: bool,
}

impl EditSession {
    /// Session for a lesson that does not exist remotely yet.
    pub fn new(config: &EditorConfig, content_id: ContentId) -> Result<Self> {
        Self::with_draft(config, ContentDraft::new(content_id))
    }

    /// Session editing an existing record; its media start out remote.
    pub fn open(config: &EditorConfig, record: ContentRecord) -> Result<Self> {
        Self::with_draft(config, ContentDraft::from_record(record)?)
    }

    fn with_draft(config: &EditorConfig, draft: ContentDraft) -> Result<Self> {
        config.validate()?;
        let events = EventBus::new(config.event_buffer_size);

        debug!(content_id = %draft.id(), media = draft.media().len(), "Edit session opened");
        Ok(Self {
            coordinator: UploadCoordinator::from_config(config, events.clone())?,
            reorder: ReorderController::new(DEFAULT_SLOT_EXTENT)?,
            draft,
            events,
            cancel: CancellationToken::new(),
            discarded: false,
            dirty: false,
        })
    }

    /// Distance between two gallery slots in the host's layout units.
    pub fn with_slot_extent(mut self, slot_extent: f64) -> Result<Self> {
        self.reorder = ReorderController::new(slot_extent)?;
        Ok(self)
    }

    pub fn id(&self) -> &ContentId {
        self.draft.id()
    }

    pub fn draft(&self) -> &ContentDraft {
        &self.draft
    }

    pub fn fields(&self) -> &ContentFields {
        self.draft.fields()
    }

    pub fn media(&self) -> &MediaCollection {
        self.draft.media()
    }

    pub fn videos(&self) -> &VideoUrlList {
        self.draft.videos()
    }

    pub fn is_closed(&self) -> bool {
        self.discarded || self.cancel.is_cancelled()
    }

    /// Whether anything changed since the last successful save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Token that abandons the session. Cancelling it stops a running save
    /// without touching the gallery and closes the session.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn events(&self) -> EventStream {
        EventStream::new(self.events.subscribe())
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    // ------------------------------------------------------------------
    // Scalar fields
    // ------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.draft.set_name(name);
        self.changed();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.draft.set_description(description);
        self.changed();
        Ok(())
    }

    pub fn set_style(&mut self, style: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.draft.set_style(style);
        self.changed();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Gallery
    // ------------------------------------------------------------------

    pub fn add_media(&mut self, media: LocalMediaRef) -> Result<MediaKey> {
        self.ensure_open()?;
        let key = self.draft.media_mut().add(media);
        let order = self.draft.media().len() - 1;

        self.dirty = true;
        self.emit(CoreEvent::Media(MediaEvent::Added {
            media_key: key.to_string(),
            order,
        }));
        Ok(key)
    }

    pub fn remove_media(&mut self, key: MediaKey) -> Result<()> {
        self.ensure_open()?;
        self.draft.media_mut().remove(key)?;

        self.dirty = true;
        self.emit(CoreEvent::Media(MediaEvent::Removed {
            media_key: key.to_string(),
        }));
        Ok(())
    }

    /// Move an item to `new_index` (clamped). Returns its final index.
    pub fn reorder_media(&mut self, key: MediaKey, new_index: usize) -> Result<usize> {
        self.ensure_open()?;
        let outcome = self.draft.media_mut().reorder(key, new_index)?;
        if !outcome.is_noop() {
            self.moved(key, outcome.from, outcome.to);
        }
        Ok(outcome.to)
    }

    /// Keyboard/assistive move between two positions.
    pub fn move_media(&mut self, from: usize, to: usize) -> Result<Option<usize>> {
        self.ensure_open()?;
        let key = self.draft.media().get_at(from).map(|item| item.key());
        let moved = self.reorder.move_to(self.draft.media_mut(), from, to)?;
        if let (Some(key), Some(to)) = (key, moved) {
            self.moved(key, from, to);
        }
        Ok(moved)
    }

    /// End of a drag gesture; `displacement` is in the units of the slot extent.
    pub fn finish_drag(&mut self, key: MediaKey, displacement: f64) -> Result<Option<usize>> {
        self.ensure_open()?;
        let from = self.draft.media().index_of(key);
        let moved = self
            .reorder
            .finish_drag(self.draft.media_mut(), key, displacement)?;
        if let (Some(from), Some(to)) = (from, moved) {
            self.moved(key, from, to);
        }
        Ok(moved)
    }

    // ------------------------------------------------------------------
    // Video references
    // ------------------------------------------------------------------

    pub fn add_video_url(&mut self, url: &str) -> Result<usize> {
        self.ensure_open()?;
        let index = self.draft.videos_mut().add(url)?;
        self.changed();
        Ok(index)
    }

    pub fn remove_video_url(&mut self, index: usize) -> Result<()> {
        self.ensure_open()?;
        self.draft.videos_mut().remove(index)?;
        self.changed();
        Ok(())
    }

    pub fn move_video_url(&mut self, from: usize, to: usize) -> Result<usize> {
        self.ensure_open()?;
        let to = self.draft.videos_mut().move_entry(from, to)?;
        self.changed();
        Ok(to)
    }

    // ------------------------------------------------------------------
    // Derived state and lifecycle
    // ------------------------------------------------------------------

    /// Read-aloud summary of the current form, recomputed on every call.
    pub fn accessibility_text(&self) -> String {
        self.draft.accessibility_text()
    }

    /// Upload staged media and persist the record.
    ///
    /// `Err` means nothing was attempted (closed session, empty name) or an
    /// internal inconsistency; upload and repository failures come back as a
    /// [`SaveOutcome`] and leave the session editable.
    #[instrument(skip(self), fields(content_id = %self.draft.id()))]
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        self.ensure_open()?;
        let outcome = self.coordinator.save(&mut self.draft, &self.cancel).await?;

        match &outcome {
            SaveOutcome::Saved(report) => {
                self.dirty = false;
                info!(media = report.media_urls.len(), "Session saved");
            }
            other => debug!(outcome = ?other, "Session not saved"),
        }
        Ok(outcome)
    }

    /// Abandon the session. A running save stops reconciling; later calls
    /// fail with [`CoreError::SessionClosed`].
    pub fn discard(&mut self) {
        if self.discarded {
            return;
        }
        self.cancel.cancel();
        self.discarded = true;

        info!(content_id = %self.draft.id(), unsaved = self.dirty, "Edit session discarded");
        self.emit(CoreEvent::Draft(DraftEvent::Discarded {
            content_id: self.draft.id().to_string(),
        }));
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(CoreError::SessionClosed {
                content_id: self.draft.id().to_string(),
            });
        }
        Ok(())
    }

    fn changed(&mut self) {
        self.dirty = true;
        self.emit(CoreEvent::Draft(DraftEvent::Changed {
            content_id: self.draft.id().to_string(),
        }));
    }

    fn moved(&mut self, key: MediaKey, from: usize, to: usize) {
        self.dirty = true;
        self.emit(CoreEvent::Media(MediaEvent::Reordered {
            media_key: key.to_string(),
            from,
            to,
        }));
    }

    fn emit(&self, event: CoreEvent) {
        self.events.emit(event).ok();
    }
}
