//! Logical positions within a two-level expandable list.
//!
//! The engine addresses rows in two coordinate systems: the *logical*
//! system used by data sources and callers, and the *flat* system used by
//! the scrolling presentation. This module provides the logical side:
//!
//! - [`RowKey`]: identifies a parent row by its `(section, row)` pair
//! - [`RowPath`]: a full logical position, either a parent row or one of
//!   its sub-rows
//!
//! Logical positions are plain data. Whether a given position actually
//! exists under the current model and expansion state is checked at
//! translation time by [`FlatLayout`](crate::FlatLayout).

use std::fmt;

/// Identifies a parent row by its `(section, row)` pair.
///
/// Keys are the unit of expansion: the expanded set tracks `RowKey`s, and
/// expand/collapse operations take them. Ordering is lexicographic in
/// `(section, row)`, matching the model's own ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey {
    /// The section containing the row.
    pub section: usize,
    /// The row within its section.
    pub row: usize,
}

impl RowKey {
    /// Creates a key for the row at `(section, row)`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.row)
    }
}

/// A logical position: a parent row, or a sub-row beneath one.
///
/// `sub_row == None` denotes the parent row itself; `Some(n)` denotes the
/// sub-row at offset `n` under that parent. This is an explicit tagged
/// position rather than an extension of a generic index type, so the
/// parent/sub-row distinction is always visible in the API.
///
/// # Ordering
///
/// Paths order lexicographically in `(section, row, sub_row)` with the
/// parent sorting before its own sub-rows, which is exactly the order the
/// flat index space presents them in.
///
/// # Example
///
/// ```
/// use accordion::RowPath;
///
/// let parent = RowPath::parent(0, 3);
/// let child = RowPath::sub_row(0, 3, 1);
///
/// assert!(parent < child);
/// assert_eq!(parent.key(), child.key());
/// assert!(!parent.is_sub_row());
/// assert!(child.is_sub_row());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowPath {
    section: usize,
    row: usize,
    sub_row: Option<usize>,
}

impl RowPath {
    /// Creates a path for the parent row at `(section, row)`.
    #[inline]
    pub const fn parent(section: usize, row: usize) -> Self {
        Self {
            section,
            row,
            sub_row: None,
        }
    }

    /// Creates a path for the sub-row at offset `sub_row` under the
    /// parent row at `(section, row)`.
    #[inline]
    pub const fn sub_row(section: usize, row: usize, sub_row: usize) -> Self {
        Self {
            section,
            row,
            sub_row: Some(sub_row),
        }
    }

    /// Returns the path of the parent row identified by `key`.
    #[inline]
    pub const fn from_key(key: RowKey) -> Self {
        Self::parent(key.section, key.row)
    }

    /// The section containing this position.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// The parent row within the section.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// The sub-row offset, or `None` for the parent row itself.
    #[inline]
    pub const fn sub_row_offset(&self) -> Option<usize> {
        self.sub_row
    }

    /// Returns `true` if this path denotes a sub-row.
    #[inline]
    pub const fn is_sub_row(&self) -> bool {
        self.sub_row.is_some()
    }

    /// The key of the parent row this path belongs to.
    ///
    /// For a parent path this is the row itself; for a sub-row path it is
    /// the enclosing parent.
    #[inline]
    pub const fn key(&self) -> RowKey {
        RowKey::new(self.section, self.row)
    }

    /// Returns the parent-row path with the same key.
    #[inline]
    pub const fn as_parent(&self) -> Self {
        Self::parent(self.section, self.row)
    }
}

impl From<RowKey> for RowPath {
    fn from(key: RowKey) -> Self {
        Self::from_key(key)
    }
}

impl fmt::Debug for RowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_row {
            Some(sub) => write!(f, "RowPath({}.{}.{})", self.section, self.row, sub),
            None => write!(f, "RowPath({}.{})", self.section, self.row),
        }
    }
}

impl fmt::Display for RowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_row {
            Some(sub) => write!(f, "{}.{}.{}", self.section, self.row, sub),
            None => write!(f, "{}.{}", self.section, self.row),
        }
    }
}
