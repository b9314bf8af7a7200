//! # Desktop Bridge Implementations
//!
//! Default implementations of the editor's bridge traits for desktop hosts
//! (macOS, Windows, Linux), talking to a plain HTTP backend:
//! - `RemoteMediaStore` as [`HttpMediaStore`] (raw `POST` upload, JSON reply)
//! - `ContentRepository` as [`HttpContentRepository`] (JSON `PUT` per record)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{HttpContentRepository, HttpMediaStore};
//! use core_runtime::config::EditorConfig;
//! use std::sync::Arc;
//!
//! let config = EditorConfig::builder()
//!     .media_store(Arc::new(HttpMediaStore::new("https://api.example/media")?))
//!     .content_repository(Arc::new(HttpContentRepository::new("https://api.example")?))
//!     .build()?;
//! ```

mod content_repository;
mod http;
mod media_store;

pub use content_repository::{ContentPayload, HttpContentRepository};
pub use http::DEFAULT_REQUEST_TIMEOUT;
pub use media_store::{guess_mime_type, HttpMediaStore, FILE_NAME_HEADER};
