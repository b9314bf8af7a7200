//! # Media Collection
//!
//! Ordered gallery of mixed local and remote items.
//!
//! ## Invariants
//!
//! - `order` of every item equals its position, so orders are exactly `0..n`
//! - an item is either `Local` or `Remote`, never both
//! - a key identifies the same item for the whole session, whatever its position
//!
//! All index arithmetic lives in this file. Other components (drag handling,
//! upload reconciliation) go through `add`, `remove`, `reorder` and `resolve`.
//!
//! ## Usage
//!
//! ```rust
//! use bridge_traits::LocalMediaRef;
//! use core_media::MediaCollection;
//!
//! let mut gallery = MediaCollection::new();
//! let a = gallery.add(LocalMediaRef::new("/tmp/a.jpg"));
//! let b = gallery.add(LocalMediaRef::new("/tmp/b.jpg"));
//!
//! gallery.reorder(b, 0).unwrap();
//! assert_eq!(gallery.keys(), vec![b, a]);
//! ```

use bridge_traits::LocalMediaRef;
use serde::Serialize;
use tracing::debug;

use crate::error::{MediaError, Result};
use crate::item::{MediaItem, MediaKey, MediaSource};

/// Positions involved in a `reorder` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reorder {
    pub key: MediaKey,
    pub from: usize,
    pub to: usize,
}

impl Reorder {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered gallery owned by one edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaCollection {
    items: Vec<MediaItem>,
}

impl MediaCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with already persisted media, in display order.
    pub fn from_remote_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collection = Self::new();
        for url in urls {
            collection.add_remote(url);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    pub fn get(&self, key: MediaKey) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.key() == key)
    }

    pub fn get_at(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn index_of(&self, key: MediaKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    pub fn contains(&self, key: MediaKey) -> bool {
        self.index_of(key).is_some()
    }

    /// Keys in display order.
    pub fn keys(&self) -> Vec<MediaKey> {
        self.items.iter().map(MediaItem::key).collect()
    }

    /// Items still waiting for an upload, in display order.
    pub fn local_items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter().filter(|item| item.is_local())
    }

    pub fn has_pending_uploads(&self) -> bool {
        self.items.iter().any(MediaItem::is_local)
    }

    /// Append a staged item at the end of the gallery.
    pub fn add(&mut self, local: LocalMediaRef) -> MediaKey {
        self.push(MediaSource::Local(local))
    }

    /// Append an item that already lives in remote storage.
    pub fn add_remote(&mut self, url: impl Into<String>) -> MediaKey {
        self.push(MediaSource::Remote(url.into()))
    }

    fn push(&mut self, source: MediaSource) -> MediaKey {
        let item = MediaItem::new(source, self.items.len());
        let key = item.key();
        debug!(media_key = %key, order = item.order(), local = item.is_local(), "Media added");
        self.items.push(item);
        key
    }

    /// Delete an item; every later item moves up one position.
    pub fn remove(&mut self, key: MediaKey) -> Result<MediaItem> {
        let index = self.require_index(key)?;
        let removed = self.items.remove(index);
        self.renumber(index..self.items.len());

        debug!(media_key = %key, from = index, remaining = self.items.len(), "Media removed");
        Ok(removed)
    }

    /// Move an item to `new_index`, clamped to the last position.
    ///
    /// Items between the old and new position shift by one towards the gap.
    /// Moving an item onto its own position changes nothing.
    pub fn reorder(&mut self, key: MediaKey, new_index: usize) -> Result<Reorder> {
        let from = self.require_index(key)?;
        let to = new_index.min(self.items.len() - 1);
        let outcome = Reorder { key, from, to };

        if outcome.is_noop() {
            return Ok(outcome);
        }

        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.renumber(from.min(to)..=from.max(to));

        debug!(media_key = %key, from, to, "Media reordered");
        Ok(outcome)
    }

    /// Record the remote URL of a staged item after its upload.
    ///
    /// Key and position are preserved.
    pub fn resolve(&mut self, key: MediaKey, remote_url: impl Into<String>) -> Result<()> {
        let index = self.require_index(key)?;
        let item = &mut self.items[index];

        if !item.is_local() {
            return Err(MediaError::InvalidTransition {
                key,
                reason: "item is already remote".to_string(),
            });
        }

        item.set_source(MediaSource::Remote(remote_url.into()));
        Ok(())
    }

    /// Remote URLs in display order.
    ///
    /// Fails with [`MediaError::Unresolved`] naming the first item that is
    /// still local.
    pub fn to_ordered_url_list(&self) -> Result<Vec<String>> {
        self.items
            .iter()
            .map(|item| {
                item.remote_url()
                    .map(str::to_string)
                    .ok_or(MediaError::Unresolved { key: item.key() })
            })
            .collect()
    }

    /// Whether every `order` equals its position.
    pub fn is_contiguous(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(index, item)| item.order() == index)
    }

    fn require_index(&self, key: MediaKey) -> Result<usize> {
        self.index_of(key).ok_or(MediaError::NotFound { key })
    }

    fn renumber(&mut self, range: impl IntoIterator<Item = usize>) {
        for index in range {
            self.items[index].set_order(index);
        }
        debug_assert!(self.is_contiguous());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str) -> LocalMediaRef {
        LocalMediaRef::new(format!("/tmp/staging/{name}.jpg"))
    }

    fn gallery(names: &[&str]) -> (MediaCollection, Vec<MediaKey>) {
        let mut collection = MediaCollection::new();
        let keys = names.iter().map(|name| collection.add(staged(name))).collect();
        (collection, keys)
    }

    fn orders(collection: &MediaCollection) -> Vec<usize> {
        collection.iter().map(MediaItem::order).collect()
    }

    #[test]
    fn test_add_appends_with_next_order() {
        let (collection, keys) = gallery(&["a", "b", "c"]);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.keys(), keys);
        assert_eq!(orders(&collection), vec![0, 1, 2]);
        assert!(collection.iter().all(MediaItem::is_local));
    }

    #[test]
    fn test_remove_renumbers_trailing_items() {
        let (mut collection, keys) = gallery(&["a", "b", "c", "d"]);

        let removed = collection.remove(keys[1]).unwrap();
        assert_eq!(removed.key(), keys[1]);
        assert_eq!(collection.keys(), vec![keys[0], keys[2], keys[3]]);
        assert_eq!(orders(&collection), vec![0, 1, 2]);
    }

    #[test]
    fn test_remove_unknown_key() {
        let (mut collection, keys) = gallery(&["a"]);
        collection.remove(keys[0]).unwrap();

        assert_eq!(
            collection.remove(keys[0]),
            Err(MediaError::NotFound { key: keys[0] })
        );
        assert!(collection.is_empty());
    }

    #[test]
    fn test_reorder_last_to_front() {
        let (mut collection, keys) = gallery(&["a", "b", "c"]);
        let (a, b, c) = (keys[0], keys[1], keys[2]);

        let outcome = collection.reorder(c, 0).unwrap();
        assert_eq!(outcome, Reorder { key: c, from: 2, to: 0 });
        assert_eq!(collection.keys(), vec![c, a, b]);
        assert_eq!(orders(&collection), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_front_to_middle() {
        let (mut collection, keys) = gallery(&["a", "b", "c", "d"]);

        collection.reorder(keys[0], 2).unwrap();
        assert_eq!(collection.keys(), vec![keys[1], keys[2], keys[0], keys[3]]);
        assert!(collection.is_contiguous());
    }

    #[test]
    fn test_reorder_clamps_target() {
        let (mut collection, keys) = gallery(&["a", "b", "c"]);

        let outcome = collection.reorder(keys[0], 99).unwrap();
        assert_eq!(outcome.to, 2);
        assert_eq!(collection.keys(), vec![keys[1], keys[2], keys[0]]);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let (mut collection, keys) = gallery(&["a", "b"]);
        let before = collection.clone();

        let outcome = collection.reorder(keys[1], 1).unwrap();
        assert!(outcome.is_noop());
        assert_eq!(collection, before);
    }

    #[test]
    fn test_reorder_unknown_key() {
        let (mut collection, _) = gallery(&["a"]);
        let (_, foreign) = gallery(&["x"]);

        assert!(matches!(
            collection.reorder(foreign[0], 0),
            Err(MediaError::NotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_keeps_key_and_order() {
        let (mut collection, keys) = gallery(&["a", "b"]);

        collection.resolve(keys[1], "https://cdn.test/b.jpg").unwrap();
        let item = collection.get(keys[1]).unwrap();
        assert_eq!(item.order(), 1);
        assert_eq!(item.remote_url(), Some("https://cdn.test/b.jpg"));
        assert!(collection.has_pending_uploads());
        assert_eq!(collection.local_items().count(), 1);
    }

    #[test]
    fn test_double_resolve_is_invalid_transition() {
        let (mut collection, keys) = gallery(&["a"]);
        collection.resolve(keys[0], "https://cdn.test/a.jpg").unwrap();

        let err = collection
            .resolve(keys[0], "https://cdn.test/other.jpg")
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidTransition { key, .. } if key == keys[0]));
        assert_eq!(
            collection.get(keys[0]).unwrap().remote_url(),
            Some("https://cdn.test/a.jpg")
        );
    }

    #[test]
    fn test_ordered_url_list_requires_all_remote() {
        let mut collection = MediaCollection::from_remote_urls(["https://cdn.test/1.jpg"]);
        let pending = collection.add(staged("two"));

        assert_eq!(
            collection.to_ordered_url_list(),
            Err(MediaError::Unresolved { key: pending })
        );

        collection.resolve(pending, "https://cdn.test/2.jpg").unwrap();
        assert_eq!(
            collection.to_ordered_url_list().unwrap(),
            vec!["https://cdn.test/1.jpg", "https://cdn.test/2.jpg"]
        );
    }

    #[test]
    fn test_contiguity_after_mixed_operations() {
        let (mut collection, keys) = gallery(&["a", "b", "c", "d", "e"]);
        let extra = collection.add_remote("https://cdn.test/f.jpg");

        collection.reorder(keys[4], 0).unwrap();
        collection.remove(keys[2]).unwrap();
        collection.reorder(extra, 1).unwrap();
        collection.add(staged("g"));
        collection.remove(keys[0]).unwrap();
        collection.reorder(keys[1], 10).unwrap();

        assert!(collection.is_contiguous());
        assert_eq!(orders(&collection), (0..collection.len()).collect::<Vec<_>>());
    }

    /// One xorshift64 step.
    fn xorshift(state: &mut u64) -> u64 {
        *state ^= *state << 13;
        *state ^= *state >> 7;
        *state ^= *state << 17;
        *state
    }

    #[test]
    fn test_contiguity_after_generated_sequences() {
        for seed in 1..=64u64 {
            let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let mut collection = MediaCollection::new();

            for step in 0..60 {
                let keys = collection.keys();
                let pick = |state: &mut u64| keys[xorshift(state) as usize % keys.len()];

                match xorshift(&mut state) % 5 {
                    0 => {
                        collection.add(staged(&format!("s{seed}-{step}")));
                    }
                    1 => {
                        collection.add_remote(format!("https://cdn.test/{seed}-{step}.jpg"));
                    }
                    2 if !keys.is_empty() => {
                        collection.remove(pick(&mut state)).unwrap();
                    }
                    3 if !keys.is_empty() => {
                        let key = pick(&mut state);
                        let target = xorshift(&mut state) as usize % (keys.len() + 2);
                        collection.reorder(key, target).unwrap();
                    }
                    4 => {
                        let local: Vec<MediaKey> =
                            collection.local_items().map(|item| item.key()).collect();
                        if let Some(&key) = local.first() {
                            collection.resolve(key, format!("https://cdn.test/{key}.jpg")).unwrap();
                        }
                    }
                    _ => {}
                }

                assert!(
                    collection.is_contiguous(),
                    "seed {seed} step {step}: orders {:?}",
                    orders(&collection)
                );
            }
        }
    }

    #[test]
    fn test_remove_last_item_then_add() {
        let (mut collection, keys) = gallery(&["a"]);
        collection.remove(keys[0]).unwrap();

        let fresh = collection.add(staged("b"));
        assert_ne!(fresh, keys[0]);
        assert_eq!(collection.get(fresh).unwrap().order(), 0);
    }
}
