//! # Upload Coordinator
//!
//! Drains staged gallery media to the remote store and commits the draft.
//!
//! ## Workflow
//!
//! 1. Validate the draft (a lesson needs a name)
//! 2. Snapshot every local item as an [`UploadJob`]
//! 3. Spawn one task per job, bounded by a semaphore of
//!    `max_concurrent_uploads` permits
//! 4. Collect results from an mpsc channel as they settle
//! 5. Reconcile by snapshotted key: successes resolve to remote, failures stay local
//! 6. With every item remote, hand the ordered URL list, the video values and
//!    the scalar fields to the content repository
//!
//! ## Cancellation
//!
//! When the [`CancellationToken`] fires (or the `save` future is dropped) the
//! coordinator stops listening. Running uploads finish in their tasks but
//! their results are discarded, queued uploads never start, and the gallery
//! is left exactly as it was.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_upload::{SaveOutcome, UploadCoordinator};
//! use tokio_util::sync::CancellationToken;
//!
//! let coordinator = UploadCoordinator::from_config(&config, events.clone())?;
//! match coordinator.save(&mut draft, &CancellationToken::new()).await? {
//!     SaveOutcome::Saved(report) => println!("saved {} images", report.media_urls.len()),
//!     SaveOutcome::PartialFailure(partial) => println!("{} uploads failed", partial.failures.len()),
//!     other => println!("not saved: {other:?}"),
//! }
//! ```

use bridge_traits::{ContentRepository, RemoteMediaStore};
use core_content::ContentDraft;
use core_media::{MediaCollection, MediaKey};
use core_runtime::config::{EditorConfig, UploadSettings};
use core_runtime::events::{CoreEvent, DraftEvent, EventBus, UploadEvent};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::job::{SettledUpload, UploadFailure, UploadJob};

/// Outcome of one pass over the local items of a gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPass {
    /// Every issued upload settled and was reconciled.
    Settled(UploadReport),
    /// The pass was cancelled; the gallery was not touched.
    Cancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    /// Items that became remote, in display order
    pub uploaded: Vec<MediaKey>,
    /// Items that stay local, in display order
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Some uploads failed; the record was not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialFailure {
    pub failures: Vec<UploadFailure>,
    /// Items that did upload in this save and stay remote
    pub uploaded: Vec<MediaKey>,
}

impl PartialFailure {
    pub fn failed_keys(&self) -> Vec<MediaKey> {
        self.failures.iter().map(|failure| failure.key).collect()
    }
}

/// What was handed to the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    pub media_urls: Vec<String>,
    pub video_urls: Vec<String>,
    /// Uploads performed by this save
    pub uploaded: usize,
}

/// Result of [`UploadCoordinator::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved(SaveReport),
    PartialFailure(PartialFailure),
    /// Every upload succeeded but the repository rejected the record.
    /// Saving again does not re-upload anything.
    RepositoryFailure { reason: String },
    Cancelled,
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Uploads staged media and persists drafts.
pub struct UploadCoordinator {
    store: Arc<dyn RemoteMediaStore>,
    repository: Arc<dyn ContentRepository>,
    settings: UploadSettings,
    events: EventBus,
}

impl UploadCoordinator {
    /// Fails with [`UploadError::Settings`](crate::UploadError::Settings) when `settings` are out of range;
    /// a zero concurrency cap would never hand out a permit.
    pub fn new(
        store: Arc<dyn RemoteMediaStore>,
        repository: Arc<dyn ContentRepository>,
        settings: UploadSettings,
        events: EventBus,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            store,
            repository,
            settings,
            events,
        })
    }

    pub fn from_config(config: &EditorConfig, events: EventBus) -> Result<Self> {
        Self::new(
            Arc::clone(&config.media_store),
            Arc::clone(&config.content_repository),
            config.upload,
            events,
        )
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Upload every local item of `collection` and reconcile the results.
    ///
    /// Items that are already remote are never uploaded again.
    #[instrument(skip_all, fields(pending = collection.local_items().count()))]
    pub async fn upload_pending(
        &self,
        collection: &mut MediaCollection,
        cancel: &CancellationToken,
    ) -> Result<UploadPass> {
        let jobs: Vec<UploadJob> = collection
            .local_items()
            .filter_map(UploadJob::snapshot)
            .collect();

        if jobs.is_empty() {
            return Ok(UploadPass::Settled(UploadReport::default()));
        }
        if cancel.is_cancelled() {
            return Ok(UploadPass::Cancelled);
        }

        let issued = jobs.len();
        let (tx, mut rx) = mpsc::channel::<SettledUpload>(issued);
        let permits = Arc::new(Semaphore::new(self.settings.max_concurrent_uploads));

        for job in jobs {
            let tx = tx.clone();
            let permits = Arc::clone(&permits);
            let store = Arc::clone(&self.store);
            let settings = self.settings;
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                if cancel.is_cancelled() || tx.is_closed() {
                    debug!(media_key = %job.key(), "Skipping upload of abandoned save");
                    return;
                }
                let settled = job.run(store.as_ref(), &settings).await;
                // The receiver is gone when the save was abandoned.
                let _ = tx.send(settled).await;
            });
        }
        drop(tx);

        let mut settled = Vec::with_capacity(issued);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(settled = settled.len(), issued, "Upload pass cancelled");
                    return Ok(UploadPass::Cancelled);
                }
                next = rx.recv() => match next {
                    Some(result) => {
                        self.publish_settled(&result);
                        settled.push(result);
                    }
                    None => break,
                },
            }
        }

        let report = reconcile(collection, settled)?;
        debug!(
            uploaded = report.uploaded.len(),
            failed = report.failures.len(),
            "Upload pass settled"
        );
        Ok(UploadPass::Settled(report))
    }

    /// Upload the draft's staged media, then persist the record.
    ///
    /// Returns `Err` only for invalid drafts or internal inconsistencies;
    /// upload and repository failures are reported as a [`SaveOutcome`].
    #[instrument(skip_all, fields(content_id = %draft.id()))]
    pub async fn save(
        &self,
        draft: &mut ContentDraft,
        cancel: &CancellationToken,
    ) -> Result<SaveOutcome> {
        draft.validate_for_save()?;
        let content_id = draft.id().to_string();

        let pending = draft.media().local_items().count();
        if pending > 0 {
            self.emit(UploadEvent::Started {
                content_id: content_id.clone(),
                pending,
            });
        }

        let report = match self.upload_pending(draft.media_mut(), cancel).await? {
            UploadPass::Settled(report) => report,
            UploadPass::Cancelled => {
                self.emit_save_failed(&content_id, "save cancelled");
                return Ok(SaveOutcome::Cancelled);
            }
        };

        if pending > 0 {
            self.emit(UploadEvent::Finished {
                content_id: content_id.clone(),
                uploaded: report.uploaded.len(),
                failed: report.failures.len(),
            });
        }

        if !report.is_complete() {
            warn!(failed = report.failures.len(), "Save stopped by failed uploads");
            self.emit_save_failed(
                &content_id,
                &format!("{} media uploads failed", report.failures.len()),
            );
            return Ok(SaveOutcome::PartialFailure(PartialFailure {
                failures: report.failures,
                uploaded: report.uploaded,
            }));
        }

        if cancel.is_cancelled() {
            self.emit_save_failed(&content_id, "save cancelled");
            return Ok(SaveOutcome::Cancelled);
        }

        let media_urls = draft.media().to_ordered_url_list()?;
        let video_urls = draft.videos().values();

        if let Err(err) = self
            .repository
            .save(draft.id(), &media_urls, &video_urls, draft.fields())
            .await
        {
            warn!(error = %err, "Content repository rejected the record");
            self.emit_save_failed(&content_id, &err.to_string());
            return Ok(SaveOutcome::RepositoryFailure {
                reason: err.to_string(),
            });
        }

        info!(
            media = media_urls.len(),
            videos = video_urls.len(),
            uploaded = report.uploaded.len(),
            "Draft saved"
        );
        self.events
            .emit(CoreEvent::Draft(DraftEvent::Saved {
                content_id,
                media_count: media_urls.len(),
                video_count: video_urls.len(),
            }))
            .ok();

        Ok(SaveOutcome::Saved(SaveReport {
            media_urls,
            video_urls,
            uploaded: report.uploaded.len(),
        }))
    }

    fn publish_settled(&self, settled: &SettledUpload) {
        let event = match &settled.result {
            Ok(remote_url) => UploadEvent::ItemUploaded {
                media_key: settled.key.to_string(),
                remote_url: remote_url.clone(),
            },
            Err(cause) => UploadEvent::ItemFailed {
                media_key: settled.key.to_string(),
                message: cause.to_string(),
                attempts: settled.attempts,
            },
        };
        self.emit(event);
    }

    fn emit(&self, event: UploadEvent) {
        self.events.emit(CoreEvent::Upload(event)).ok();
    }

    fn emit_save_failed(&self, content_id: &str, message: &str) {
        self.events
            .emit(CoreEvent::Draft(DraftEvent::SaveFailed {
                content_id: content_id.to_string(),
                message: message.to_string(),
                recoverable: true,
            }))
            .ok();
    }
}

/// Apply settled uploads by their snapshotted key, in display order.
fn reconcile(
    collection: &mut MediaCollection,
    mut settled: Vec<SettledUpload>,
) -> Result<UploadReport> {
    settled.sort_by_key(|result| result.order);

    let mut report = UploadReport::default();
    for SettledUpload {
        key,
        attempts,
        result,
        ..
    } in settled
    {
        match result {
            Ok(remote_url) => {
                collection.resolve(key, remote_url)?;
                report.uploaded.push(key);
            }
            Err(cause) => report.failures.push(UploadFailure {
                key,
                cause,
                attempts,
            }),
        }
    }
    Ok(report)
}
