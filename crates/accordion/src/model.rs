//! The data-source capability trait for two-level list shapes.
//!
//! An [`OutlineModel`] is a read-only shape descriptor: it tells the
//! engine how many sections and rows exist and how many sub-rows each
//! parent row currently has. It deliberately says nothing about cell
//! content; producing cells for a [`RowPath`](crate::RowPath) is the
//! rendering collaborator's job, and the engine never inspects them.
//!
//! Hosts usually implement `OutlineModel` over their own data. For tests
//! and simple integrations, [`VecOutline`] is a ready-made implementation
//! over plain sub-row counts.

use std::collections::HashSet;

use crate::position::{RowKey, RowPath};

/// Read-only shape descriptor for a two-level expandable list.
///
/// # Implementation Requirements
///
/// At minimum, implement:
/// - [`section_count`](OutlineModel::section_count) - number of sections
/// - [`row_count`](OutlineModel::row_count) - parent rows per section
/// - [`sub_row_count`](OutlineModel::sub_row_count) - sub-rows per parent
///
/// The remaining methods have defaults and are resolved once per reload
/// by the engine, not re-queried per frame.
///
/// # Contract
///
/// The shape must stay stable between engine mutations: the engine caches
/// a flat layout and rebuilds it only when its own state changes or when
/// the host calls [`Accordion::reload`](crate::Accordion::reload). A host
/// that mutates its data must reload before issuing further queries.
pub trait OutlineModel {
    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of parent rows in `section`.
    fn row_count(&self, section: usize) -> usize;

    /// Returns the current number of sub-rows under the parent row `key`.
    ///
    /// Rows with zero sub-rows are treated as non-expandable by default.
    fn sub_row_count(&self, key: RowKey) -> usize;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Returns `true` if the parent row `key` can be expanded.
    ///
    /// The default treats any row with at least one sub-row as
    /// expandable. Override to keep a row collapsed regardless of its
    /// sub-row count.
    fn is_expandable(&self, key: RowKey) -> bool {
        self.sub_row_count(key) > 0
    }

    /// Returns `true` if the parent row `key` should start expanded.
    ///
    /// Consulted once when a model is installed or reloaded, never per
    /// frame. The default starts everything collapsed.
    fn initial_expansion(&self, _key: RowKey) -> bool {
        false
    }

    /// Returns an optional height override for the row at `path`.
    ///
    /// The engine forwards this value to the host untouched; it never
    /// interprets heights itself.
    fn row_height(&self, _path: &RowPath) -> Option<f32> {
        None
    }

    // -------------------------------------------------------------------------
    // Convenience methods
    // -------------------------------------------------------------------------

    /// Returns `true` if `key` names a parent row inside the model.
    fn contains_key(&self, key: RowKey) -> bool {
        key.section < self.section_count() && key.row < self.row_count(key.section)
    }
}

/// A ready-made [`OutlineModel`] over plain sub-row counts.
///
/// Each section is a `Vec<usize>` of sub-row counts, one entry per parent
/// row. Useful for tests and for hosts whose shape is already tabulated.
///
/// # Example
///
/// ```
/// use accordion::{OutlineModel, RowKey, VecOutline};
///
/// // Two sections: the first has three rows (the second row has two
/// // sub-rows), the second has a single plain row.
/// let outline = VecOutline::new(vec![vec![0, 2, 0], vec![0]]);
///
/// assert_eq!(outline.section_count(), 2);
/// assert_eq!(outline.sub_row_count(RowKey::new(0, 1)), 2);
/// assert!(outline.is_expandable(RowKey::new(0, 1)));
/// assert!(!outline.is_expandable(RowKey::new(1, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VecOutline {
    /// Sub-row counts indexed by `[section][row]`.
    sections: Vec<Vec<usize>>,
    /// Rows that should start expanded.
    initially_expanded: HashSet<RowKey>,
}

impl VecOutline {
    /// Creates an outline from sub-row counts indexed by `[section][row]`.
    pub fn new(sections: Vec<Vec<usize>>) -> Self {
        Self {
            sections,
            initially_expanded: HashSet::new(),
        }
    }

    /// Marks rows that should start expanded when the model is installed.
    pub fn with_initially_expanded<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = RowKey>,
    {
        self.initially_expanded.extend(keys);
        self
    }
}

impl OutlineModel for VecOutline {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, Vec::len)
    }

    fn sub_row_count(&self, key: RowKey) -> usize {
        self.sections
            .get(key.section)
            .and_then(|rows| rows.get(key.row))
            .copied()
            .unwrap_or(0)
    }

    fn initial_expansion(&self, key: RowKey) -> bool {
        self.initially_expanded.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_outline_shape() {
        let outline = VecOutline::new(vec![vec![0, 2, 0], vec![3]]);
        assert_eq!(outline.section_count(), 2);
        assert_eq!(outline.row_count(0), 3);
        assert_eq!(outline.row_count(1), 1);
        assert_eq!(outline.row_count(9), 0);
        assert_eq!(outline.sub_row_count(RowKey::new(0, 1)), 2);
        assert_eq!(outline.sub_row_count(RowKey::new(1, 0)), 3);
        assert_eq!(outline.sub_row_count(RowKey::new(9, 9)), 0);
    }

    #[test]
    fn test_contains_key() {
        let outline = VecOutline::new(vec![vec![0, 1]]);
        assert!(outline.contains_key(RowKey::new(0, 0)));
        assert!(outline.contains_key(RowKey::new(0, 1)));
        assert!(!outline.contains_key(RowKey::new(0, 2)));
        assert!(!outline.contains_key(RowKey::new(1, 0)));
    }

    #[test]
    fn test_default_expandability_follows_sub_row_count() {
        let outline = VecOutline::new(vec![vec![0, 4]]);
        assert!(!outline.is_expandable(RowKey::new(0, 0)));
        assert!(outline.is_expandable(RowKey::new(0, 1)));
    }

    #[test]
    fn test_initial_expansion_marks() {
        let outline = VecOutline::new(vec![vec![2, 2]])
            .with_initially_expanded([RowKey::new(0, 1)]);
        assert!(!outline.initial_expansion(RowKey::new(0, 0)));
        assert!(outline.initial_expansion(RowKey::new(0, 1)));
    }

    #[test]
    fn test_default_row_height_is_none() {
        let outline = VecOutline::new(vec![vec![1]]);
        assert_eq!(outline.row_height(&RowPath::parent(0, 0)), None);
    }
}
