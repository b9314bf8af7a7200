//! Content Persistence Abstractions
//!
//! Provides the contract for committing an edited lesson to the host's row
//! store, plus the plain data types exchanged across that boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Identifier of a persisted content record (lesson/entry).
///
/// Assigned by the row store; the core treats it as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scalar form fields of a content record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFields {
    pub name: String,
    pub description: String,
    pub style: String,
}

impl ContentFields {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            style: style.into(),
        }
    }
}

/// Snapshot of an already persisted record, used to seed an edit session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub fields: ContentFields,
    /// Gallery media URLs in display order
    pub media_urls: Vec<String>,
    /// External video references in display order
    pub video_urls: Vec<String>,
}

/// Content repository trait
///
/// Abstracts the row store that owns lesson records. The core calls it exactly
/// once per successful save, after every gallery item has a remote URL.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::content::{ContentFields, ContentId, ContentRepository};
///
/// async fn commit(repo: &dyn ContentRepository) -> Result<()> {
///     let fields = ContentFields::new("Salsa basis", "Eerste les", "salsa");
///     repo.save(
///         &ContentId::new("lesson-7"),
///         &["https://cdn.example.com/a.jpg".to_string()],
///         &[],
///         &fields,
///     )
///     .await
/// }
/// ```
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Persist the record.
    ///
    /// # Arguments
    ///
    /// * `content_id` - Record being saved
    /// * `media_urls` - Gallery URLs in display order
    /// * `video_urls` - Video references in display order
    /// * `fields` - Scalar form fields
    async fn save(
        &self,
        content_id: &ContentId,
        media_urls: &[String],
        video_urls: &[String],
        fields: &ContentFields,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_display() {
        let id = ContentId::new("lesson-42");
        assert_eq!(id.as_str(), "lesson-42");
        assert_eq!(id.to_string(), "lesson-42");
    }

    #[test]
    fn test_record_serialization_shape() {
        let record = ContentRecord {
            id: ContentId::new("lesson-1"),
            fields: ContentFields::new("Bachata", "", "latin"),
            media_urls: vec!["https://cdn.example.com/1.jpg".to_string()],
            video_urls: vec![],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "lesson-1");
        assert_eq!(json["fields"]["style"], "latin");
        assert_eq!(json["media_urls"][0], "https://cdn.example.com/1.jpg");
    }
}
