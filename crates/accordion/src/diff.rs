//! Flat-index deltas between expansion states.
//!
//! A [`FlatDiff`] is the set of flat indices a host must insert and
//! remove to animate the transition between two expansion snapshots over
//! the same model, instead of redrawing the whole list. Removals are
//! expressed in the pre-transition index space, insertions in the
//! post-transition space, the convention row-animation APIs expect.

use crate::expansion::ExpansionState;
use crate::flatten::FlatLayout;
use crate::model::OutlineModel;

/// Insert/remove flat index sets describing one expansion transition.
///
/// Both lists are sorted ascending. Applying `removed` to the pre-state
/// flat list (highest index first) and then `inserted` (lowest index
/// first) reconciles it to exactly the post-state flat list.
///
/// # Example
///
/// ```
/// use accordion::{ExpansionState, FlatDiff, RowKey, VecOutline};
///
/// let outline = VecOutline::new(vec![vec![0, 2, 0], vec![0]]);
/// let pre = ExpansionState::new();
/// let mut post = pre.clone();
/// post.expand(RowKey::new(0, 1));
///
/// let diff = FlatDiff::between(&outline, &pre, &post);
/// assert_eq!(diff.inserted(), &[2, 3]);
/// assert!(diff.removed().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatDiff {
    inserted: Vec<usize>,
    removed: Vec<usize>,
}

impl FlatDiff {
    /// Creates an empty diff (the no-op transition).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Computes the diff between two expansion snapshots over `model`.
    ///
    /// Every row expanded in `pre` but not in `post` contributes its
    /// sub-row range from the pre layout to the removals; every row
    /// expanded in `post` but not in `pre` contributes its range from the
    /// post layout to the insertions. Rows expanded in both snapshots
    /// contribute nothing.
    ///
    /// This single computation covers a plain expand, a plain collapse,
    /// an exclusive-mode re-expansion (one removed range in pre indices
    /// plus one inserted range in post indices), and a collapse-all (the
    /// union of all removed ranges).
    pub fn between(model: &dyn OutlineModel, pre: &ExpansionState, post: &ExpansionState) -> Self {
        let pre_layout = FlatLayout::build(model, pre);
        let post_layout = FlatLayout::build(model, post);

        let mut removed = Vec::new();
        for key in pre.sorted_keys() {
            if !post.is_expanded(key)
                && let Some(range) = pre_layout.sub_row_range(key)
            {
                removed.extend(range);
            }
        }

        let mut inserted = Vec::new();
        for key in post.sorted_keys() {
            if !pre.is_expanded(key)
                && let Some(range) = post_layout.sub_row_range(key)
            {
                inserted.extend(range);
            }
        }

        // Keys are visited in (section, row) order and spans are laid out
        // in the same order, so both lists arrive sorted.
        debug_assert!(removed.windows(2).all(|pair| pair[0] < pair[1]));
        debug_assert!(inserted.windows(2).all(|pair| pair[0] < pair[1]));
        debug_assert_eq!(
            pre_layout.len() + inserted.len(),
            post_layout.len() + removed.len()
        );

        Self { inserted, removed }
    }

    /// Flat indices to insert, in post-transition indexing, ascending.
    pub fn inserted(&self) -> &[usize] {
        &self.inserted
    }

    /// Flat indices to remove, in pre-transition indexing, ascending.
    pub fn removed(&self) -> &[usize] {
        &self.removed
    }

    /// Returns `true` if the transition changes nothing.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}
