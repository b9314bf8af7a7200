//! # Event Bus System
//!
//! Typed notifications from the editor core to the host, carried over
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! - **Event Types**: [`CoreEvent`] wraps one enum per domain
//! - **EventBus**: cloneable publisher handle
//! - **EventStream**: receiver wrapper with an optional filter
//!
//! ```text
//! ┌──────────────┐  emit   ┌──────────┐  subscribe  ┌────────────┐
//! │ EditSession  ├────────>│          ├────────────>│ UI refresh │
//! └──────────────┘         │ EventBus │             └────────────┘
//! ┌──────────────┐  emit   │          │  subscribe  ┌────────────┐
//! │ Uploads      ├────────>│          ├────────────>│ Progress   │
//! └──────────────┘         └──────────┘             └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, MediaEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut sub = bus.subscribe();
//!
//! bus.emit(CoreEvent::Media(MediaEvent::Removed {
//!     media_key: "3f2a".to_string(),
//! }))
//! .ok();
//!
//! assert!(matches!(sub.recv().await, Ok(CoreEvent::Media(_))));
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Publishing without subscribers returns an error which callers ignore with
//! `.ok()`. Slow subscribers receive `RecvError::Lagged(n)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast::{self, error::RecvError, error::SendError, Receiver};

pub use crate::config::DEFAULT_EVENT_BUFFER_SIZE;

/// Top-level event enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Gallery mutations
    Media(MediaEvent),
    /// Upload progress during save
    Upload(UploadEvent),
    /// Draft lifecycle
    Draft(DraftEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Media(e) => e.description(),
            CoreEvent::Upload(e) => e.description(),
            CoreEvent::Draft(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Upload(UploadEvent::ItemFailed { .. }) => EventSeverity::Warning,
            CoreEvent::Upload(UploadEvent::Finished { failed, .. }) if *failed > 0 => {
                EventSeverity::Warning
            }
            CoreEvent::Draft(DraftEvent::SaveFailed { .. }) => EventSeverity::Error,
            CoreEvent::Draft(DraftEvent::Saved { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Gallery mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum MediaEvent {
    /// A staged item was appended.
    Added {
        media_key: String,
        /// Position of the new item
        order: usize,
    },
    /// An item was deleted; trailing items shifted up.
    Removed { media_key: String },
    /// An item moved.
    Reordered {
        media_key: String,
        from: usize,
        to: usize,
    },
}

impl MediaEvent {
    fn description(&self) -> &str {
        match self {
            MediaEvent::Added { .. } => "Media added",
            MediaEvent::Removed { .. } => "Media removed",
            MediaEvent::Reordered { .. } => "Media reordered",
        }
    }
}

/// Upload progress during a save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum UploadEvent {
    /// Uploads were issued for every local item.
    Started { content_id: String, pending: usize },
    /// One item now has a remote URL.
    ItemUploaded { media_key: String, remote_url: String },
    /// One item exhausted its attempts and stays local.
    ItemFailed {
        media_key: String,
        message: String,
        attempts: u32,
    },
    /// Every issued upload has settled.
    Finished {
        content_id: String,
        uploaded: usize,
        failed: usize,
    },
}

impl UploadEvent {
    fn description(&self) -> &str {
        match self {
            UploadEvent::Started { .. } => "Uploads started",
            UploadEvent::ItemUploaded { .. } => "Media uploaded",
            UploadEvent::ItemFailed { .. } => "Media upload failed",
            UploadEvent::Finished { .. } => "Uploads settled",
        }
    }
}

/// Draft lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum DraftEvent {
    /// A scalar field or the video list changed.
    Changed { content_id: String },
    /// The record was persisted.
    Saved {
        content_id: String,
        media_count: usize,
        video_count: usize,
    },
    /// Save ended without persisting; the draft stays editable.
    SaveFailed {
        content_id: String,
        message: String,
        recoverable: bool,
    },
    /// The session was abandoned.
    Discarded { content_id: String },
}

impl DraftEvent {
    fn description(&self) -> &str {
        match self {
            DraftEvent::Changed { .. } => "Draft changed",
            DraftEvent::Saved { .. } => "Draft saved",
            DraftEvent::SaveFailed { .. } => "Draft save failed",
            DraftEvent::Discarded { .. } => "Draft discarded",
        }
    }
}

/// Central event bus.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// * `capacity` - Events buffered per subscriber before it lags
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers reached, or an error when nobody listens.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// Receiver wrapper with optional filtering.
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` are returned by `recv`/`try_recv`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &CoreEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next matching event.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Returns the next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
