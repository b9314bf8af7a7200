//! # Host Bridge Traits
//!
//! Contracts between the lesson editor core and the services the host provides.
//!
//! ## Overview
//!
//! The core never talks to storage backends directly. Every external capability
//! it needs is expressed here as a trait and injected by the host:
//!
//! - [`RemoteMediaStore`](media::RemoteMediaStore) - Uploads staged gallery media, returns a URL
//! - [`ContentRepository`](content::ContentRepository) - Persists the finished lesson record
//! - [`LoggerSink`](logging::LoggerSink) - Mirrors structured logs into host logging
//!
//! Desktop adapters live in `bridge-desktop`. Mobile hosts inject their own.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should map backend-specific failures onto it and keep HTTP status codes in
//! [`BridgeError::Rejected`] so the core can tell permanent rejections from
//! transient failures.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync`; uploads run on separate tokio tasks.

pub mod content;
pub mod error;
pub mod logging;
pub mod media;

pub use error::BridgeError;

pub use content::{ContentFields, ContentId, ContentRecord, ContentRepository};
pub use logging::{LogEntry, LogLevel, LoggerSink};
pub use media::{LocalMediaRef, RemoteMediaStore};
