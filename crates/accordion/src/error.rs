//! Error types for the accordion engine.

use crate::position::RowPath;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by index translation and scroll resolution.
///
/// All errors are synchronous results of the offending call and indicate a
/// caller-side logic error (a stale flat index or a stale logical
/// position), never a transient condition. The engine neither retries nor
/// partially applies anything on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A flat index outside the current flat count.
    #[error("flat index {index} is out of range (flat count is {len})")]
    OutOfRange { index: usize, len: usize },

    /// A logical position that does not exist under the current model and
    /// expansion state: an unknown `(section, row)`, a sub-row of a
    /// collapsed parent at translation time, or a sub-row offset outside
    /// the parent's current count.
    #[error("no row at position {path} under the current model and expansion state")]
    InvalidPosition { path: RowPath },

    /// A scroll target that exists in the model but is currently hidden
    /// because its parent row is collapsed.
    #[error("row at position {path} is hidden by its collapsed parent")]
    NotVisible { path: RowPath },
}

impl Error {
    /// Creates an out-of-range error for a flat index.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Creates an invalid-position error.
    pub fn invalid_position(path: RowPath) -> Self {
        Self::InvalidPosition { path }
    }

    /// Creates a not-visible error for a hidden scroll target.
    pub fn not_visible(path: RowPath) -> Self {
        Self::NotVisible { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::out_of_range(6, 4);
        assert_eq!(err.to_string(), "flat index 6 is out of range (flat count is 4)");

        let err = Error::invalid_position(RowPath::sub_row(0, 1, 5));
        assert!(err.to_string().contains("0.1.5"));

        let err = Error::not_visible(RowPath::sub_row(2, 0, 1));
        assert!(err.to_string().contains("collapsed parent"));
    }
}
