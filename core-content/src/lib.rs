//! # Core Content
//!
//! Everything about a lesson draft except the gallery itself:
//!
//! - **Video list** (`video_urls`): validated, de-duplicated external video references
//! - **Accessibility** (`accessibility`): read-aloud summary of the form
//! - **Draft** (`draft`): fields, gallery and video list edited as one unit

pub mod accessibility;
pub mod draft;
pub mod error;
pub mod video_urls;

pub use accessibility::AccessibilityTextBuilder;
pub use draft::ContentDraft;
pub use error::{ContentError, Result};
pub use video_urls::{VideoUrlEntry, VideoUrlList};
