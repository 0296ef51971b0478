// THEORY:
// The `ActiveKeySet` is the user's selection: the RGB keys that survive a filter
// pass. It is an unordered set with no size limit. Swatches flip membership one at
// a time, either with a discrete click or by painting across several swatches in a
// single drag.
//
// A drag is tracked by `DragGesture`. Pointer-move events arrive many times per
// swatch, so the gesture remembers which swatches it has already entered and
// toggles each one at most once until the gesture ends.

use crate::core_modules::pixel::pixel::RgbKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of RGB keys kept by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveKeySet {
    keys: HashSet<RgbKey>,
}

impl ActiveKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key`. Returns `true` when the key is now active.
    pub fn toggle(&mut self, key: RgbKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Returns `true` if the key was not already active.
    pub fn insert(&mut self, key: RgbKey) -> bool {
        self.keys.insert(key)
    }

    /// Returns `true` if the key was active.
    pub fn remove(&mut self, key: &RgbKey) -> bool {
        self.keys.remove(key)
    }

    #[inline]
    pub fn contains(&self, key: &RgbKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RgbKey> {
        self.keys.iter()
    }

    /// Keys in a stable order, for display and persistence.
    pub fn sorted(&self) -> Vec<RgbKey> {
        let mut keys: Vec<RgbKey> = self.keys.iter().copied().collect();
        keys.sort_unstable();
        keys
    }
}

impl FromIterator<RgbKey> for ActiveKeySet {
    fn from_iter<I: IntoIterator<Item = RgbKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl Extend<RgbKey> for ActiveKeySet {
    fn extend<I: IntoIterator<Item = RgbKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

/// A drag-paint gesture across swatches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragGesture {
    visited: HashSet<RgbKey>,
}

impl DragGesture {
    pub fn begin() -> Self {
        Self::default()
    }

    /// Toggles `key` in `active` the first time the gesture enters it.
    /// Returns `Some(new_state)` when a toggle happened, `None` on a repeat visit.
    pub fn enter(&mut self, key: RgbKey, active: &mut ActiveKeySet) -> Option<bool> {
        if self.visited.insert(key) {
            Some(active.toggle(key))
        } else {
            None
        }
    }

    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}
