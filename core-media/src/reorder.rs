//! Drag gesture to index translation.
//!
//! A [`ReorderController`] turns a continuous drag displacement into a
//! target slot and ends every gesture in at most one
//! [`MediaCollection::reorder`] call. It holds no gallery state itself.

use tracing::trace;

use crate::collection::MediaCollection;
use crate::error::{MediaError, Result};
use crate::item::MediaKey;

/// Maps drag gestures onto gallery positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderController {
    slot_extent: f64,
}

impl ReorderController {
    /// `slot_extent` is the distance, in the host's layout units, between
    /// two neighbouring gallery slots.
    pub fn new(slot_extent: f64) -> Result<Self> {
        if !slot_extent.is_finite() || slot_extent <= 0.0 {
            return Err(MediaError::InvalidGesture(format!(
                "slot extent must be a positive finite number, got {slot_extent}"
            )));
        }
        Ok(Self { slot_extent })
    }

    pub fn slot_extent(&self) -> f64 {
        self.slot_extent
    }

    /// Nearest slot for an item dragged `displacement` units away from
    /// `source`, clamped to `0..len`.
    ///
    /// Returns `None` for an empty gallery.
    pub fn target_index(&self, source: usize, displacement: f64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let last = (len - 1) as f64;
        let slots = if displacement.is_finite() {
            displacement / self.slot_extent
        } else {
            0.0
        };
        let target = (source as f64 + slots).round().clamp(0.0, last);
        Some(target as usize)
    }

    /// Complete a drag of `key` and apply it to the gallery.
    ///
    /// Returns the new index, or `None` when the item settles on its own
    /// slot and the gallery is left untouched.
    pub fn finish_drag(
        &self,
        collection: &mut MediaCollection,
        key: MediaKey,
        displacement: f64,
    ) -> Result<Option<usize>> {
        let source = collection
            .index_of(key)
            .ok_or(MediaError::NotFound { key })?;
        let target = self
            .target_index(source, displacement, collection.len())
            .unwrap_or(source);

        trace!(media_key = %key, source, target, displacement, "Drag finished");
        Self::apply(collection, key, source, target)
    }

    /// Discrete move from one position to another, for keyboard and
    /// assistive reordering.
    pub fn move_to(
        &self,
        collection: &mut MediaCollection,
        from: usize,
        to: usize,
    ) -> Result<Option<usize>> {
        let key = collection
            .get_at(from)
            .map(|item| item.key())
            .ok_or(MediaError::IndexOutOfRange {
                index: from,
                len: collection.len(),
            })?;
        let target = to.min(collection.len() - 1);

        Self::apply(collection, key, from, target)
    }

    fn apply(
        collection: &mut MediaCollection,
        key: MediaKey,
        source: usize,
        target: usize,
    ) -> Result<Option<usize>> {
        if source == target {
            return Ok(None);
        }
        let outcome = collection.reorder(key, target)?;
        Ok(Some(outcome.to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::LocalMediaRef;

    fn gallery(len: usize) -> (MediaCollection, Vec<MediaKey>) {
        let mut collection = MediaCollection::new();
        let keys = (0..len)
            .map(|i| collection.add(LocalMediaRef::new(format!("/staging/{i}.png"))))
            .collect();
        (collection, keys)
    }

    #[test]
    fn test_rejects_bad_slot_extent() {
        assert!(ReorderController::new(0.0).is_err());
        assert!(ReorderController::new(-12.0).is_err());
        assert!(ReorderController::new(f64::NAN).is_err());
        assert!(ReorderController::new(f64::INFINITY).is_err());
        assert_eq!(ReorderController::new(96.0).unwrap().slot_extent(), 96.0);
    }

    #[test]
    fn test_target_index_rounds_to_nearest_slot() {
        let controller = ReorderController::new(100.0).unwrap();

        assert_eq!(controller.target_index(2, 0.0, 5), Some(2));
        assert_eq!(controller.target_index(2, 49.0, 5), Some(2));
        assert_eq!(controller.target_index(2, 51.0, 5), Some(3));
        assert_eq!(controller.target_index(2, -151.0, 5), Some(0));
    }

    #[test]
    fn test_target_index_clamps() {
        let controller = ReorderController::new(100.0).unwrap();

        assert_eq!(controller.target_index(1, 10_000.0, 4), Some(3));
        assert_eq!(controller.target_index(1, -10_000.0, 4), Some(0));
        assert_eq!(controller.target_index(1, f64::NAN, 4), Some(1));
        assert_eq!(controller.target_index(0, 50.0, 0), None);
    }

    #[test]
    fn test_finish_drag_applies_single_reorder() {
        let controller = ReorderController::new(80.0).unwrap();
        let (mut collection, keys) = gallery(3);

        let moved = controller
            .finish_drag(&mut collection, keys[2], -160.0)
            .unwrap();
        assert_eq!(moved, Some(0));
        assert_eq!(collection.keys(), vec![keys[2], keys[0], keys[1]]);
    }

    #[test]
    fn test_short_drag_is_suppressed() {
        let controller = ReorderController::new(80.0).unwrap();
        let (mut collection, keys) = gallery(3);
        let before = collection.clone();

        let moved = controller.finish_drag(&mut collection, keys[1], 30.0).unwrap();
        assert_eq!(moved, None);
        assert_eq!(collection, before);
    }

    #[test]
    fn test_finish_drag_unknown_key() {
        let controller = ReorderController::new(80.0).unwrap();
        let (mut collection, _) = gallery(2);
        let (_, foreign) = gallery(1);

        assert!(matches!(
            controller.finish_drag(&mut collection, foreign[0], 80.0),
            Err(MediaError::NotFound { .. })
        ));
    }

    #[test]
    fn test_move_to() {
        let controller = ReorderController::new(80.0).unwrap();
        let (mut collection, keys) = gallery(4);

        assert_eq!(controller.move_to(&mut collection, 0, 9).unwrap(), Some(3));
        assert_eq!(collection.keys(), vec![keys[1], keys[2], keys[3], keys[0]]);
        assert_eq!(controller.move_to(&mut collection, 1, 1).unwrap(), None);
        assert_eq!(
            controller.move_to(&mut collection, 4, 0),
            Err(MediaError::IndexOutOfRange { index: 4, len: 4 })
        );
    }
}
