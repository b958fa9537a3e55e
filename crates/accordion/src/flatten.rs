//! Hierarchical-to-flat index translation.
//!
//! [`FlatLayout`] is an immutable snapshot of the flat index space induced
//! by a model shape and an expansion state. The flat space is contiguous
//! and zero-based, strictly increasing in `(section, row, sub_row)` order,
//! with every parent row immediately preceding its currently-visible
//! sub-rows.
//!
//! Layouts are cheap to build (one pass over the parent rows) and are
//! never kept across mutations: the engine rebuilds its cached layout on
//! every expansion or model change, so no stale flat index can survive a
//! transition.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::expansion::ExpansionState;
use crate::model::OutlineModel;
use crate::position::{RowKey, RowPath};

/// One parent row's slice of the flat index space.
#[derive(Debug, Clone, Copy)]
struct RowSpan {
    /// The parent row.
    key: RowKey,
    /// Number of visible sub-rows (zero when collapsed).
    sub_rows: usize,
    /// Flat index of the parent row itself.
    first: usize,
}

impl RowSpan {
    /// Total flat slots this row occupies: itself plus visible sub-rows.
    fn slots(&self) -> usize {
        1 + self.sub_rows
    }
}

/// A snapshot of the flat index space for one (model, expansion) pair.
///
/// Provides the bidirectional mapping between flat indices and
/// [`RowPath`]s, and the total flat count. Both directions are exact
/// inverses over their valid domains.
///
/// # Example
///
/// ```
/// use accordion::{ExpansionState, FlatLayout, RowKey, RowPath, VecOutline};
///
/// let outline = VecOutline::new(vec![vec![0, 2, 0], vec![0]]);
/// let mut state = ExpansionState::new();
/// state.expand(RowKey::new(0, 1));
///
/// let layout = FlatLayout::build(&outline, &state);
/// assert_eq!(layout.len(), 6);
/// assert_eq!(layout.path_at(2).unwrap(), RowPath::sub_row(0, 1, 0));
/// assert_eq!(layout.index_of(&RowPath::parent(1, 0)).unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct FlatLayout {
    /// Spans in model order; `first` values form a strictly increasing
    /// prefix-sum table over the flat space.
    spans: Vec<RowSpan>,
    /// Total flat count.
    len: usize,
}

impl FlatLayout {
    /// Builds the layout for the given model shape and expansion state.
    ///
    /// Collapsed and non-expanded rows contribute a single slot; expanded
    /// rows additionally contribute one slot per sub-row.
    pub fn build(model: &dyn OutlineModel, state: &ExpansionState) -> Self {
        let mut spans = Vec::new();
        let mut next = 0;

        for section in 0..model.section_count() {
            for row in 0..model.row_count(section) {
                let key = RowKey::new(section, row);
                let sub_rows = if state.is_expanded(key) {
                    model.sub_row_count(key)
                } else {
                    0
                };
                spans.push(RowSpan {
                    key,
                    sub_rows,
                    first: next,
                });
                next += 1 + sub_rows;
            }
        }

        Self { spans, len: next }
    }

    /// Returns the total flat count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the flat list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the logical position at `flat`.
    ///
    /// Fails with [`Error::OutOfRange`] when `flat` is outside
    /// `[0, len())`.
    pub fn path_at(&self, flat: usize) -> Result<RowPath> {
        if flat >= self.len {
            return Err(Error::out_of_range(flat, self.len));
        }

        // Last span whose first slot is at or before `flat`. The bound
        // check above guarantees at least one span exists.
        let span_index = self.spans.partition_point(|span| span.first <= flat) - 1;
        let span = &self.spans[span_index];
        let offset = flat - span.first;

        debug_assert!(offset < span.slots());

        if offset == 0 {
            Ok(RowPath::from_key(span.key))
        } else {
            Ok(RowPath::sub_row(span.key.section, span.key.row, offset - 1))
        }
    }

    /// Returns the flat index of the logical position `path`.
    ///
    /// Fails with [`Error::InvalidPosition`] when the path names an
    /// unknown parent row, a sub-row of a row that is not currently
    /// expanded, or a sub-row offset outside the row's visible count.
    pub fn index_of(&self, path: &RowPath) -> Result<usize> {
        let span = self
            .span_for(path.key())
            .ok_or(Error::invalid_position(*path))?;

        match path.sub_row_offset() {
            None => Ok(span.first),
            Some(sub) if sub < span.sub_rows => Ok(span.first + 1 + sub),
            Some(_) => Err(Error::invalid_position(*path)),
        }
    }

    /// Returns the flat range occupied by `key`'s visible sub-rows.
    ///
    /// The range is empty when the row is collapsed; `None` when the key
    /// is not part of the layout at all.
    pub fn sub_row_range(&self, key: RowKey) -> Option<Range<usize>> {
        self.span_for(key)
            .map(|span| span.first + 1..span.first + 1 + span.sub_rows)
    }

    /// Iterates every logical position in flat order.
    pub fn paths(&self) -> impl Iterator<Item = RowPath> + '_ {
        self.spans.iter().flat_map(|span| {
            let key = span.key;
            std::iter::once(RowPath::from_key(key)).chain(
                (0..span.sub_rows).map(move |sub| RowPath::sub_row(key.section, key.row, sub)),
            )
        })
    }

    /// Binary search over the spans, which are sorted by key.
    fn span_for(&self, key: RowKey) -> Option<&RowSpan> {
        self.spans
            .binary_search_by(|span| span.key.cmp(&key))
            .ok()
            .map(|i| &self.spans[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VecOutline;

    fn layout(outline: &VecOutline, state: &ExpansionState) -> FlatLayout {
        FlatLayout::build(outline, state)
    }

    #[test]
    fn test_collapsed_count_is_row_total() {
        let outline = VecOutline::new(vec![vec![0, 2, 0], vec![0]]);
        let layout = layout(&outline, &ExpansionState::new());
        assert_eq!(layout.len(), 4);
        assert!(!layout.is_empty());
    }

    #[test]
    fn test_empty_model() {
        let outline = VecOutline::new(vec![]);
        let layout = layout(&outline, &ExpansionState::new());
        assert_eq!(layout.len(), 0);
        assert!(layout.is_empty());
        assert_eq!(
            layout.path_at(0),
            Err(Error::out_of_range(0, 0))
        );
    }

    #[test]
    fn test_expanded_rows_add_their_sub_rows() {
        let outline = VecOutline::new(vec![vec![0, 2, 0], vec![0]]);
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 1));

        let layout = layout(&outline, &state);
        assert_eq!(layout.len(), 6);

        assert_eq!(layout.path_at(0).unwrap(), RowPath::parent(0, 0));
        assert_eq!(layout.path_at(1).unwrap(), RowPath::parent(0, 1));
        assert_eq!(layout.path_at(2).unwrap(), RowPath::sub_row(0, 1, 0));
        assert_eq!(layout.path_at(3).unwrap(), RowPath::sub_row(0, 1, 1));
        assert_eq!(layout.path_at(4).unwrap(), RowPath::parent(0, 2));
        assert_eq!(layout.path_at(5).unwrap(), RowPath::parent(1, 0));
    }

    #[test]
    fn test_path_at_out_of_range() {
        let outline = VecOutline::new(vec![vec![0, 0]]);
        let layout = layout(&outline, &ExpansionState::new());
        assert_eq!(layout.path_at(2), Err(Error::out_of_range(2, 2)));
    }

    #[test]
    fn test_index_of_rejects_hidden_sub_row() {
        let outline = VecOutline::new(vec![vec![0, 2, 0]]);
        let layout = layout(&outline, &ExpansionState::new());

        let hidden = RowPath::sub_row(0, 1, 0);
        assert_eq!(
            layout.index_of(&hidden),
            Err(Error::invalid_position(hidden))
        );
    }

    #[test]
    fn test_index_of_rejects_sub_row_outside_count() {
        let outline = VecOutline::new(vec![vec![2]]);
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 0));
        let layout = layout(&outline, &state);

        let overshoot = RowPath::sub_row(0, 0, 2);
        assert_eq!(
            layout.index_of(&overshoot),
            Err(Error::invalid_position(overshoot))
        );
    }

    #[test]
    fn test_index_of_rejects_unknown_parent() {
        let outline = VecOutline::new(vec![vec![1]]);
        let layout = layout(&outline, &ExpansionState::new());

        let missing = RowPath::parent(2, 0);
        assert_eq!(
            layout.index_of(&missing),
            Err(Error::invalid_position(missing))
        );
    }

    #[test]
    fn test_round_trip_both_directions() {
        let outline = VecOutline::new(vec![vec![0, 3, 1], vec![2, 0], vec![4]]);
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 1));
        state.expand(RowKey::new(1, 0));
        state.expand(RowKey::new(2, 0));

        let layout = layout(&outline, &state);

        for flat in 0..layout.len() {
            let path = layout.path_at(flat).unwrap();
            assert_eq!(layout.index_of(&path).unwrap(), flat);
        }

        for (flat, path) in layout.paths().enumerate() {
            assert_eq!(layout.path_at(flat).unwrap(), path);
        }
    }

    #[test]
    fn test_count_matches_successful_path_lookups() {
        let outline = VecOutline::new(vec![vec![1, 2], vec![3]]);
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 1));

        let layout = layout(&outline, &state);
        let reachable = (0..layout.len() + 5)
            .filter(|&flat| layout.path_at(flat).is_ok())
            .count();
        assert_eq!(reachable, layout.len());
    }

    #[test]
    fn test_sub_row_range() {
        let outline = VecOutline::new(vec![vec![0, 2, 0]]);
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 1));
        let layout = layout(&outline, &state);

        assert_eq!(layout.sub_row_range(RowKey::new(0, 1)), Some(2..4));
        // Collapsed rows have an empty range at their own slot boundary.
        assert_eq!(layout.sub_row_range(RowKey::new(0, 0)), Some(1..1));
        assert_eq!(layout.sub_row_range(RowKey::new(7, 0)), None);
    }

    #[test]
    fn test_flat_order_is_strictly_increasing() {
        let outline = VecOutline::new(vec![vec![2, 1], vec![3]]);
        let mut state = ExpansionState::new();
        state.expand(RowKey::new(0, 0));
        state.expand(RowKey::new(1, 0));

        let layout = layout(&outline, &state);
        let paths: Vec<RowPath> = layout.paths().collect();
        assert!(paths.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
