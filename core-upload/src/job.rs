//! # Upload Jobs
//!
//! One job per staged gallery item, created when a save starts.
//!
//! A job carries the item's key and position as they were at issue time.
//! Reconciliation uses that snapshot and nothing else, so the order in which
//! uploads settle has no influence on the final gallery.
//!
//! ## Retry Logic
//!
//! Each attempt is bounded by `upload_timeout`. Transient failures and
//! timeouts are retried up to `max_upload_attempts` times, waiting
//! `retry_backoff * 2^(attempt - 1)` between attempts. Permanent store
//! errors (4xx rejections other than 408/429, a missing staged file, missing
//! capability) stop immediately.

use bridge_traits::{BridgeError, LocalMediaRef, RemoteMediaStore};
use core_media::{MediaItem, MediaKey};
use core_runtime::config::UploadSettings;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Why an item could not be uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadFailureCause {
    /// The last attempt did not settle within the per-item timeout
    Timeout { after_ms: u64 },
    /// The store returned an error
    Store { message: String, transient: bool },
}

impl UploadFailureCause {
    fn from_bridge(err: &BridgeError) -> Self {
        Self::Store {
            message: err.to_string(),
            transient: err.is_transient(),
        }
    }

    fn timeout(after: Duration) -> Self {
        Self::Timeout {
            after_ms: u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Whether another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Store { transient, .. } => *transient,
        }
    }
}

impl fmt::Display for UploadFailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { after_ms } => write!(f, "upload timed out after {after_ms} ms"),
            Self::Store { message, .. } => f.write_str(message),
        }
    }
}

/// A gallery item that could not be uploaded during a save.
///
/// The item stays local and is picked up again by the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadFailure {
    pub key: MediaKey,
    pub cause: UploadFailureCause,
    pub attempts: u32,
}

/// Snapshot of a staged item taken when its upload is issued.
#[derive(Debug, Clone)]
pub struct UploadJob {
    key: MediaKey,
    order: usize,
    media: LocalMediaRef,
}

impl UploadJob {
    /// `None` for items that are already remote.
    pub fn snapshot(item: &MediaItem) -> Option<Self> {
        item.local_ref().map(|media| Self {
            key: item.key(),
            order: item.order(),
            media: media.clone(),
        })
    }

    pub fn key(&self) -> MediaKey {
        self.key
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Upload with timeout and retries until success or attempts run out.
    pub async fn run(self, store: &dyn RemoteMediaStore, settings: &UploadSettings) -> SettledUpload {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let cause = match tokio::time::timeout(settings.upload_timeout, store.upload(&self.media)).await {
                Ok(Ok(remote_url)) => {
                    debug!(media_key = %self.key, media = %self.media, attempt, "Upload succeeded");
                    return self.settle(attempt, Ok(remote_url));
                }
                Ok(Err(err)) => UploadFailureCause::from_bridge(&err),
                Err(_) => UploadFailureCause::timeout(settings.upload_timeout),
            };

            if !cause.is_retryable() || attempt >= settings.max_upload_attempts {
                warn!(media_key = %self.key, media = %self.media, attempt, error = %cause, "Upload failed");
                return self.settle(attempt, Err(cause));
            }

            let backoff = settings.backoff_for(attempt);
            debug!(
                media_key = %self.key,
                attempt,
                backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                error = %cause,
                "Upload attempt failed, retrying"
            );
            tokio::time::sleep(backoff).await;
        }
    }

    fn settle(self, attempts: u32, result: Result<String, UploadFailureCause>) -> SettledUpload {
        SettledUpload {
            key: self.key,
            order: self.order,
            attempts,
            result,
        }
    }
}

/// Result of one job, tagged with its issue-time snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledUpload {
    pub key: MediaKey,
    pub order: usize,
    pub attempts: u32,
    pub result: Result<String, UploadFailureCause>,
}
