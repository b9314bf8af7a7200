//! # Core Media
//!
//! Gallery model for the lesson editor: stable-keyed items that are either
//! staged locally or stored remotely, kept in a contiguous display order.
//!
//! - [`MediaCollection`] owns the items and every piece of index arithmetic
//! - [`ReorderController`] translates drag gestures into one `reorder` call
//!
//! Upload reconciliation lives in `core-upload` and only ever calls
//! [`MediaCollection::resolve`] by key.

pub mod collection;
pub mod error;
pub mod item;
pub mod reorder;

pub use collection::{MediaCollection, Reorder};
pub use error::{MediaError, Result};
pub use item::{MediaItem, MediaKey, MediaSource};
pub use reorder::ReorderController;
