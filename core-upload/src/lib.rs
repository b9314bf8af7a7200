//! # Upload & Save Module
//!
//! Turns staged gallery media into remote URLs and commits the draft.
//!
//! ## Components
//!
//! - **Upload Jobs** (`job`): issue-time snapshot of one local item, with per-attempt timeout and retry
//! - **Upload Coordinator** (`coordinator`): bounded concurrent uploads, key-based reconciliation, repository commit

pub mod coordinator;
pub mod error;
pub mod job;

pub use coordinator::{
    PartialFailure, SaveOutcome, SaveReport, UploadCoordinator, UploadPass, UploadReport,
};
pub use error::{Result, UploadError};
pub use job::{SettledUpload, UploadFailure, UploadFailureCause, UploadJob};
