//! Lines chosen for printing.

use std::collections::HashSet;

use cartonforge_core::EntryId;

/// Set of selected order lines.
///
/// Independent of the splits; validated against them only at print time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: HashSet<EntryId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, entry_id: &EntryId) -> bool {
        self.rows.contains(entry_id)
    }

    /// Flip membership; returns whether the line is now selected.
    pub fn toggle(&mut self, entry_id: EntryId) -> bool {
        if self.rows.remove(&entry_id) {
            false
        } else {
            self.rows.insert(entry_id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<EntryId> for Selection {
    fn from_iter<I: IntoIterator<Item = EntryId>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
