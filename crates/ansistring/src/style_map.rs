//! Sparse position-to-style mapping with change tracking.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Maps character positions to accumulated escape text.
///
/// The map carries a dirty flag that the owning string uses to know when
/// its rendered form is stale. Insertion-like operations always mark the
/// map as modified (appending to an already-styled position changes the
/// rendered output without changing the entry count); removal operations
/// mark it only when an entry actually disappeared.
///
/// Equality compares entries only, never the flag.
#[derive(Clone, Default)]
pub struct StyleMap {
    entries: BTreeMap<usize, String>,
    modified: Cell<bool>,
}

impl StyleMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends escape text at a position, creating the entry if absent.
    pub fn append(&mut self, index: usize, text: &str) {
        self.entries
            .entry(index)
            .and_modify(|existing| existing.push_str(text))
            .or_insert_with(|| text.to_string());
        self.modified.set(true);
    }

    /// Replaces the escape text at a position.
    pub fn set(&mut self, index: usize, text: String) {
        self.entries.insert(index, text);
        self.modified.set(true);
    }

    /// Removes the entry at a position. Missing positions are a no-op.
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        let removed = self.entries.remove(&index).is_some();
        if removed {
            self.modified.set(true);
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.modified.set(true);
        }
    }

    /// Bulk-inserts entries, replacing any that collide.
    pub fn extend<I: IntoIterator<Item = (usize, String)>>(&mut self, iter: I) {
        let mut inserted = false;
        for (index, text) in iter {
            self.entries.insert(index, text);
            inserted = true;
        }
        if inserted {
            self.modified.set(true);
        }
    }

    /// The escape text at a position, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(&index).map(|s| s.as_str())
    }

    /// Returns whether a position carries styling.
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Number of styled positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no position carries styling.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(|(&i, s)| (i, s.as_str()))
    }

    /// Copies the entries inside `range`, renumbered to start at zero.
    pub fn slice(&self, range: Range<usize>) -> StyleMap {
        let entries = self
            .entries
            .range(range.clone())
            .map(|(&i, s)| (i - range.start, s.clone()))
            .collect();
        StyleMap {
            entries,
            modified: Cell::new(false),
        }
    }

    /// Reads and clears the modified flag. Called once per render.
    pub fn take_modified(&self) -> bool {
        self.modified.replace(false)
    }
}

impl PartialEq for StyleMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for StyleMap {}

impl fmt::Debug for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl FromIterator<(usize, String)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        StyleMap {
            entries: iter.into_iter().collect(),
            modified: Cell::new(false),
        }
    }
}
