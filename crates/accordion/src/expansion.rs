//! Expansion state for parent rows.
//!
//! [`ExpansionState`] owns the set of currently-expanded
//! [`RowKey`](crate::RowKey)s together with the exclusivity policy. It is
//! a value type: the engine clones it to capture the before-snapshot of a
//! transition, mutates the live copy, and hands both snapshots to the
//! diff computation.

use std::collections::HashSet;

use crate::position::RowKey;

/// The set of currently-expanded parent rows, plus the exclusivity policy.
///
/// When exclusive expansion is enabled, at most one row is expanded at a
/// time: expanding a row implicitly collapses every other member first,
/// within the same call.
///
/// # Example
///
/// ```
/// use accordion::{ExpansionState, RowKey};
///
/// let mut state = ExpansionState::new().with_exclusive(true);
/// state.expand(RowKey::new(0, 1));
/// state.expand(RowKey::new(1, 0));
///
/// // Exclusive mode: the second expand displaced the first.
/// assert!(!state.is_expanded(RowKey::new(0, 1)));
/// assert!(state.is_expanded(RowKey::new(1, 0)));
/// assert_eq!(state.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<RowKey>,
    exclusive: bool,
}

impl ExpansionState {
    /// Creates an empty state with exclusive expansion disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclusivity policy using the builder pattern.
    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.set_exclusive(exclusive);
        self
    }

    /// Returns `true` if exclusive expansion is enabled.
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Sets the exclusivity policy.
    ///
    /// Enabling exclusivity while several rows are expanded keeps only
    /// the smallest key (the first in flat order) and collapses the rest.
    /// Returns `true` if the expanded set changed as a result.
    pub fn set_exclusive(&mut self, exclusive: bool) -> bool {
        self.exclusive = exclusive;
        if exclusive && self.expanded.len() > 1 {
            // min() is over a non-empty set here.
            let keep = self.expanded.iter().copied().min();
            if let Some(keep) = keep {
                self.expanded.retain(|&k| k == keep);
                return true;
            }
        }
        false
    }

    /// Returns `true` if the parent row `key` is expanded.
    pub fn is_expanded(&self, key: RowKey) -> bool {
        self.expanded.contains(&key)
    }

    /// Expands the parent row `key`.
    ///
    /// In exclusive mode, every other expanded row is collapsed first as
    /// part of the same call. Expanding an already-expanded key is a
    /// no-op. Returns `true` if the set changed.
    pub fn expand(&mut self, key: RowKey) -> bool {
        if self.expanded.contains(&key) {
            return false;
        }
        if self.exclusive {
            self.expanded.clear();
        }
        self.expanded.insert(key);
        true
    }

    /// Collapses the parent row `key` if it is expanded.
    ///
    /// Idempotent: collapsing an unknown or already-collapsed key is a
    /// no-op. Returns `true` if the set changed.
    pub fn collapse(&mut self, key: RowKey) -> bool {
        self.expanded.remove(&key)
    }

    /// Collapses every expanded row regardless of policy.
    ///
    /// Returns `true` if the set was non-empty.
    pub fn collapse_all(&mut self) -> bool {
        if self.expanded.is_empty() {
            return false;
        }
        self.expanded.clear();
        true
    }

    /// Removes every expanded key for which `keep` returns `false`.
    ///
    /// Used by the engine on reload to drop keys the model no longer
    /// knows about. Returns `true` if the set changed.
    pub fn retain<F>(&mut self, keep: F) -> bool
    where
        F: FnMut(&RowKey) -> bool,
    {
        let before = self.expanded.len();
        self.expanded.retain(keep);
        self.expanded.len() != before
    }

    /// Returns the number of expanded rows.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Iterates over the expanded keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = RowKey> + '_ {
        self.expanded.iter().copied()
    }

    /// Returns the expanded keys sorted in (section, row) order.
    pub fn sorted_keys(&self) -> Vec<RowKey> {
        let mut keys: Vec<RowKey> = self.expanded.iter().copied().collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_and_collapse() {
        let mut state = ExpansionState::new();
        let key = RowKey::new(0, 1);

        assert!(state.expand(key));
        assert!(state.is_expanded(key));
        assert_eq!(state.len(), 1);

        assert!(state.collapse(key));
        assert!(!state.is_expanded(key));
        assert!(state.is_empty());
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut state = ExpansionState::new();
        let key = RowKey::new(0, 0);
        assert!(state.expand(key));
        assert!(!state.expand(key));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_collapse_unknown_key_is_noop() {
        let mut state = ExpansionState::new();
        assert!(!state.collapse(RowKey::new(3, 3)));
        assert!(!state.collapse_all());
    }

    #[test]
    fn test_exclusive_displaces_previous() {
        let mut state = ExpansionState::new().with_exclusive(true);
        let first = RowKey::new(0, 1);
        let second = RowKey::new(1, 0);

        state.expand(first);
        state.expand(second);

        assert!(!state.is_expanded(first));
        assert!(state.is_expanded(second));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_exclusive_cardinality_bound() {
        let mut state = ExpansionState::new().with_exclusive(true);
        for section in 0..4 {
            for row in 0..4 {
                state.expand(RowKey::new(section, row));
                assert!(state.len() <= 1);
            }
        }
    }

    #[test]
    fn test_enabling_exclusive_keeps_first_key() {
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(1, 0));
        state.expand(RowKey::new(0, 2));
        state.expand(RowKey::new(0, 5));

        assert!(state.set_exclusive(true));
        assert_eq!(state.sorted_keys(), vec![RowKey::new(0, 2)]);

        // Disabling never touches the set.
        assert!(!state.set_exclusive(false));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_collapse_all() {
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 0));
        state.expand(RowKey::new(0, 1));

        assert!(state.collapse_all());
        assert!(state.is_empty());
        assert!(!state.collapse_all());
    }

    #[test]
    fn test_sorted_keys() {
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(2, 0));
        state.expand(RowKey::new(0, 1));
        state.expand(RowKey::new(0, 0));

        assert_eq!(
            state.sorted_keys(),
            vec![RowKey::new(0, 0), RowKey::new(0, 1), RowKey::new(2, 0)]
        );
    }

    #[test]
    fn test_retain() {
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 0));
        state.expand(RowKey::new(5, 5));

        assert!(state.retain(|key| key.section < 5));
        assert_eq!(state.sorted_keys(), vec![RowKey::new(0, 0)]);
        assert!(!state.retain(|_| true));
    }
}
