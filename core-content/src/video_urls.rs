//! Ordered list of external video references.
//!
//! Entries are stored trimmed and compared case-insensitively, so
//! `" https://Video.test/1 "` and `"https://video.test/1"` count as the same
//! video. Only absolute `http`/`https` URLs with a host are accepted.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{ContentError, Result};

const FIELD: &str = "video URL";

/// One video reference and its display position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUrlEntry {
    value: String,
    order: usize,
}

impl VideoUrlEntry {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn order(&self) -> usize {
        self.order
    }

    fn normalized(&self) -> String {
        normalize(&self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUrlList {
    entries: Vec<VideoUrlEntry>,
}

impl VideoUrlList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from persisted values, applying the same checks as
    /// [`add`](Self::add).
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for value in values {
            list.add(value.as_ref())?;
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoUrlEntry> {
        self.entries.iter()
    }

    /// Values in display order, as handed to the content repository.
    pub fn values(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.value.clone()).collect()
    }

    pub fn contains(&self, url: &str) -> bool {
        let needle = normalize(url);
        self.entries.iter().any(|entry| entry.normalized() == needle)
    }

    /// Validate and append a URL. Returns its index.
    pub fn add(&mut self, url: &str) -> Result<usize> {
        let value = url.trim();
        validate_shape(value)?;

        if self.contains(value) {
            return Err(ContentError::DuplicateEntry {
                value: value.to_string(),
            });
        }

        let order = self.entries.len();
        self.entries.push(VideoUrlEntry {
            value: value.to_string(),
            order,
        });
        debug!(order, "Video URL added");
        Ok(order)
    }

    pub fn remove(&mut self, index: usize) -> Result<VideoUrlEntry> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        self.renumber(index);
        Ok(removed)
    }

    /// Move the entry at `from` to `to` (clamped to the last position).
    ///
    /// Returns the index the entry ended up at.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<usize> {
        self.check_index(from)?;
        let to = to.min(self.entries.len() - 1);
        if from == to {
            return Ok(to);
        }

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.renumber(from.min(to));
        Ok(to)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(ContentError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    fn renumber(&mut self, start: usize) {
        for (index, entry) in self.entries.iter_mut().enumerate().skip(start) {
            entry.order = index;
        }
    }
}

fn normalize(url: &str) -> String {
    url.trim().to_lowercase()
}

fn validate_shape(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ContentError::validation(FIELD, "must not be empty"));
    }

    let parsed = Url::parse(value)
        .map_err(|e| ContentError::validation(FIELD, format!("not a valid URL ({e})")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ContentError::validation(
            FIELD,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ContentError::validation(FIELD, "missing host")),
    }
}
