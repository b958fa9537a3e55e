//! The accordion engine facade.
//!
//! [`Accordion`] owns the expansion state for one hosting list widget and
//! presents the two-level model as a flat, linearly-indexed list:
//!
//! - queries translate between flat indices and [`RowPath`]s
//! - mutations (expand, collapse, collapse-all) return the [`FlatDiff`]
//!   the host applies as an insert/remove animation
//! - scroll resolution turns a caller-supplied logical position into the
//!   flat index to scroll to
//!
//! Every mutation captures a before-snapshot strictly prior to touching
//! the expansion set and an after-snapshot strictly after, computes the
//! diff between them, and rebuilds the cached flat layout; no flat index
//! ever survives a transition.

use std::sync::Arc;

use crate::diff::FlatDiff;
use crate::error::{Error, Result};
use crate::expansion::ExpansionState;
use crate::flatten::FlatLayout;
use crate::model::OutlineModel;
use crate::position::{RowKey, RowPath};
use crate::signal::Signal;

/// Expandable two-level list engine.
///
/// One `Accordion` instance belongs to one hosting list widget; there is
/// no shared or global expansion state. The host drives it from a single
/// thread of control tied to its rendering loop.
///
/// # Signals
///
/// - `expanded(RowKey)`: a parent row was expanded
/// - `collapsed(RowKey)`: a parent row was collapsed
/// - `reset(())`: the model was replaced or reloaded; all cached host
///   state about the flat list is stale
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use accordion::{Accordion, RowKey, RowPath, VecOutline};
///
/// let outline = Arc::new(VecOutline::new(vec![vec![0, 2, 0], vec![0]]));
/// let mut list = Accordion::new(outline);
///
/// assert_eq!(list.flat_count(), 4);
///
/// let diff = list.expand(RowKey::new(0, 1));
/// assert_eq!(diff.inserted(), &[2, 3]);
/// assert_eq!(list.flat_count(), 6);
/// assert_eq!(list.path_at(2).unwrap(), RowPath::sub_row(0, 1, 0));
/// ```
pub struct Accordion {
    model: Arc<dyn OutlineModel>,
    state: ExpansionState,
    /// Layout cache; rebuilt after every mutation, never kept stale.
    layout: FlatLayout,

    /// Emitted when a parent row is expanded.
    pub expanded: Signal<RowKey>,
    /// Emitted when a parent row is collapsed.
    pub collapsed: Signal<RowKey>,
    /// Emitted when the model is replaced or reloaded.
    pub reset: Signal<()>,
}

impl Accordion {
    /// Creates an engine over the given model.
    ///
    /// The model's [`initial_expansion`](OutlineModel::initial_expansion)
    /// hints are applied once, here; rows marked for initial expansion
    /// start expanded without producing a diff or signals.
    pub fn new(model: Arc<dyn OutlineModel>) -> Self {
        let state = initial_state(&*model, false);
        let layout = FlatLayout::build(&*model, &state);
        Self {
            model,
            state,
            layout,
            expanded: Signal::new(),
            collapsed: Signal::new(),
            reset: Signal::new(),
        }
    }

    /// Sets the exclusivity policy using the builder pattern.
    pub fn with_exclusive_expansion(mut self, exclusive: bool) -> Self {
        self.set_exclusive_expansion(exclusive);
        self
    }

    // =========================================================================
    // Model
    // =========================================================================

    /// Returns the current model.
    pub fn model(&self) -> &Arc<dyn OutlineModel> {
        &self.model
    }

    /// Replaces the model, resetting expansion to the new model's
    /// initial-expansion hints.
    ///
    /// The exclusivity policy is kept. Emits `reset`.
    pub fn set_model(&mut self, model: Arc<dyn OutlineModel>) {
        self.state = initial_state(&*model, self.state.is_exclusive());
        self.layout = FlatLayout::build(&*model, &self.state);
        self.model = model;
        self.reset.emit(());
    }

    /// Re-reads the model's shape after the host mutated its data.
    ///
    /// Expanded rows that no longer exist or are no longer expandable are
    /// dropped; surviving rows stay expanded with their new sub-row
    /// counts. Emits `reset`; the host must treat the whole flat list as
    /// changed, so no diff is produced.
    pub fn reload(&mut self) {
        let model = Arc::clone(&self.model);
        let dropped = self
            .state
            .retain(|&key| model.contains_key(key) && model.is_expandable(key));
        if dropped {
            tracing::debug!(
                target: "accordion::engine",
                "reload dropped expanded rows no longer present in the model"
            );
        }
        self.layout = FlatLayout::build(&*self.model, &self.state);
        self.reset.emit(());
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the total flat count.
    pub fn flat_count(&self) -> usize {
        self.layout.len()
    }

    /// Returns the logical position at the flat index `flat`.
    pub fn path_at(&self, flat: usize) -> Result<RowPath> {
        self.layout.path_at(flat)
    }

    /// Returns the flat index of the logical position `path`.
    pub fn flat_index_of(&self, path: &RowPath) -> Result<usize> {
        self.layout.index_of(path)
    }

    /// Returns `true` if the parent row `key` is expanded.
    pub fn is_expanded(&self, key: RowKey) -> bool {
        self.state.is_expanded(key)
    }

    /// Returns the expanded keys in (section, row) order.
    pub fn expanded_keys(&self) -> Vec<RowKey> {
        self.state.sorted_keys()
    }

    /// Returns `true` if exclusive expansion is enabled.
    pub fn is_exclusive(&self) -> bool {
        self.state.is_exclusive()
    }

    /// Returns the current expansion state snapshot.
    pub fn expansion_state(&self) -> &ExpansionState {
        &self.state
    }

    /// Returns the model's height override for the row at `path`, if any.
    pub fn row_height(&self, path: &RowPath) -> Option<f32> {
        self.model.row_height(path)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Expands the parent row `key`, returning the insert/remove diff.
    ///
    /// In exclusive mode any previously expanded row is collapsed within
    /// the same transition, and the diff covers both edits. Unknown,
    /// non-expandable, and already-expanded keys are no-ops with an empty
    /// diff.
    pub fn expand(&mut self, key: RowKey) -> FlatDiff {
        if !self.model.contains_key(key) || !self.model.is_expandable(key) {
            tracing::debug!(
                target: "accordion::engine",
                %key,
                "ignoring expand of a non-expandable row"
            );
            return FlatDiff::empty();
        }
        if self.state.is_expanded(key) {
            return FlatDiff::empty();
        }
        self.transition(|state| {
            state.expand(key);
        })
    }

    /// Collapses the parent row `key`, returning the removal diff.
    ///
    /// Idempotent: collapsing a row that is not expanded (including
    /// unknown keys) is a no-op with an empty diff.
    pub fn collapse(&mut self, key: RowKey) -> FlatDiff {
        if !self.state.is_expanded(key) {
            return FlatDiff::empty();
        }
        self.transition(|state| {
            state.collapse(key);
        })
    }

    /// Expands `key` if collapsed, collapses it if expanded.
    pub fn toggle(&mut self, key: RowKey) -> FlatDiff {
        if self.state.is_expanded(key) {
            self.collapse(key)
        } else {
            self.expand(key)
        }
    }

    /// Collapses every expanded row, returning the union of their
    /// removal ranges. Idempotent when nothing is expanded.
    pub fn collapse_all(&mut self) -> FlatDiff {
        if self.state.is_empty() {
            return FlatDiff::empty();
        }
        self.transition(|state| {
            state.collapse_all();
        })
    }

    /// Sets the exclusivity policy.
    ///
    /// Enabling it while several rows are expanded collapses all but the
    /// first, and the diff reports those removals like any other
    /// transition.
    pub fn set_exclusive_expansion(&mut self, exclusive: bool) -> FlatDiff {
        self.transition(|state| {
            state.set_exclusive(exclusive);
        })
    }

    // =========================================================================
    // Scroll resolution
    // =========================================================================

    /// Resolves `path` to the flat index to scroll to under the current
    /// expansion state.
    ///
    /// Fails with [`Error::NotVisible`] when `path` is a sub-row that
    /// exists in the model but whose parent is currently collapsed, and
    /// with [`Error::InvalidPosition`] when `path` does not exist at all.
    pub fn scroll_target(&self, path: &RowPath) -> Result<usize> {
        if let Some(sub) = path.sub_row_offset() {
            let key = path.key();
            if self.model.contains_key(key)
                && sub < self.model.sub_row_count(key)
                && !self.state.is_expanded(key)
            {
                return Err(Error::not_visible(*path));
            }
        }
        self.layout.index_of(path)
    }

    /// Collapses everything, then resolves `path` against the fully
    /// collapsed state.
    ///
    /// Because every sub-row is hidden after the collapse, a sub-row
    /// target fails with [`Error::InvalidPosition`], validated before
    /// any mutation, so a failed call changes nothing. On success,
    /// returns the collapse diff together with the flat index to scroll
    /// to; whether the host animates the collapse before or alongside the
    /// scroll is its own choice.
    pub fn refresh_and_scroll_to(&mut self, path: &RowPath) -> Result<(FlatDiff, usize)> {
        if path.is_sub_row() || !self.model.contains_key(path.key()) {
            return Err(Error::invalid_position(*path));
        }
        let diff = self.collapse_all();
        let index = self.layout.index_of(path)?;
        Ok((diff, index))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Runs one atomic expansion transition.
    ///
    /// The before-snapshot is captured strictly before the mutation and
    /// the after-snapshot strictly after; the diff is computed between
    /// them and the layout cache rebuilt before any signal fires.
    fn transition<F>(&mut self, mutate: F) -> FlatDiff
    where
        F: FnOnce(&mut ExpansionState),
    {
        let before = self.state.clone();
        mutate(&mut self.state);

        let diff = FlatDiff::between(&*self.model, &before, &self.state);
        self.layout = FlatLayout::build(&*self.model, &self.state);

        for key in before.sorted_keys() {
            if !self.state.is_expanded(key) {
                self.collapsed.emit(key);
            }
        }
        for key in self.state.sorted_keys() {
            if !before.is_expanded(key) {
                self.expanded.emit(key);
            }
        }

        diff
    }
}

impl std::fmt::Debug for Accordion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accordion")
            .field("flat_count", &self.flat_count())
            .field("expanded", &self.state.sorted_keys())
            .field("exclusive", &self.is_exclusive())
            .finish()
    }
}

/// Builds the starting expansion state for a freshly installed model.
fn initial_state(model: &dyn OutlineModel, exclusive: bool) -> ExpansionState {
    let mut state = ExpansionState::new().with_exclusive(exclusive);
    for section in 0..model.section_count() {
        for row in 0..model.row_count(section) {
            let key = RowKey::new(section, row);
            if model.initial_expansion(key) && model.is_expandable(key) {
                state.expand(key);
            }
        }
    }
    state
}
