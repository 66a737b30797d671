//! Level-indexed lookup tables with clamp-to-bounds access.

use serde::{Deserialize, Serialize};

/// An ordered, level-indexed table.
///
/// Lookups past the end reuse the last entry; the only way a lookup can
/// fail is an empty table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClampedTable<T> {
    entries: Vec<T>,
}

impl<T> Default for ClampedTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for ClampedTable<T> {
    fn from(entries: Vec<T>) -> Self {
        Self { entries }
    }
}

impl<T> ClampedTable<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index clamped into `0..len`, or `None` for an empty table.
    pub fn clamp_index(&self, index: usize) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(index.min(self.entries.len() - 1))
        }
    }

    /// Entry at `index`, clamped into the valid range.
    pub fn get_clamped(&self, index: usize) -> Option<&T> {
        self.clamp_index(index).map(|i| &self.entries[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }
}
