//! Row selection and expansion state, tracked by row key.

use std::collections::{HashMap, HashSet};

use crate::model::RowKey;

/// Tracks which rows are selected.
///
/// Every current row has an entry; rows start unselected. When the item
/// collection changes, [`SelectionState::reconcile`] drops keys that are gone
/// and adds new keys as unselected, so selection survives re-renders of the
/// same items.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: HashMap<RowKey, bool>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aligns the state with the current row keys.
    pub fn reconcile<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) {
        let mut next = HashMap::new();
        for key in keys {
            let selected = self.selected.get(key).copied().unwrap_or(false);
            next.insert(key.clone(), selected);
        }
        let dropped = self
            .selected
            .keys()
            .filter(|k| !next.contains_key(*k))
            .count();
        if dropped > 0 {
            log::debug!("Selection dropped {} stale keys", dropped);
        }
        self.selected = next;
    }

    /// Toggle selection for a key. Returns false for unknown keys.
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        match self.selected.get_mut(key) {
            Some(selected) => {
                *selected = !*selected;
                true
            }
            None => false,
        }
    }

    /// Sets every row to `selected`.
    pub fn set_all(&mut self, selected: bool) {
        for value in self.selected.values_mut() {
            *value = selected;
        }
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.get(key).copied().unwrap_or(false)
    }

    /// True only if there is at least one row and every row is selected.
    pub fn all_selected(&self) -> bool {
        !self.selected.is_empty() && self.selected.values().all(|s| *s)
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.selected.values().filter(|s| **s).count()
    }

    /// Unselects every row, keeping the keys.
    pub fn clear(&mut self) {
        self.set_all(false);
    }
}

/// Tracks which rows show their detail row.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<RowKey>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets expanded keys that are no longer present.
    pub fn reconcile<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) {
        let current: HashSet<&RowKey> = keys.into_iter().collect();
        self.expanded.retain(|key| current.contains(key));
    }

    /// Flip one row. Returns the new expanded state.
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        }
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains(key)
    }

    /// Expands every given key.
    pub fn expand<'a>(&mut self, keys: impl IntoIterator<Item = &'a RowKey>) {
        self.expanded.extend(keys.into_iter().cloned());
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<RowKey> {
        raw.iter().map(|k| RowKey::from(*k)).collect()
    }

    #[test]
    fn test_reconcile_keeps_surviving_selection() {
        let mut state = SelectionState::new();
        state.reconcile(&keys(&["1", "2"]));
        assert!(state.toggle(&RowKey::from("2")));

        state.reconcile(&keys(&["2", "3"]));
        assert!(state.is_selected(&RowKey::from("2")));
        assert!(!state.is_selected(&RowKey::from("3")));
        assert!(!state.toggle(&RowKey::from("1")));
        assert_eq!(state.count(), 1);
    }

    #[test]
    fn test_all_selected_needs_rows() {
        let mut state = SelectionState::new();
        assert!(!state.all_selected());
        state.reconcile(&keys(&["1"]));
        state.set_all(true);
        assert!(state.all_selected());
    }

    #[test]
    fn test_clear_keeps_rows_unselected() {
        let mut state = SelectionState::new();
        state.reconcile(&keys(&["1", "2"]));
        state.set_all(true);
        state.clear();
        assert_eq!(state.count(), 0);
        assert!(!state.all_selected());
        assert!(state.toggle(&RowKey::from("1")));
    }

    #[test]
    fn test_expansion_reconcile() {
        let mut state = ExpansionState::new();
        let all = keys(&["1", "2"]);
        state.expand(&all);
        state.reconcile(&keys(&["2"]));
        assert!(!state.is_expanded(&RowKey::from("1")));
        assert!(state.is_expanded(&RowKey::from("2")));
        assert!(!state.toggle(&RowKey::from("2")));
        assert!(state.is_empty());
    }
}
