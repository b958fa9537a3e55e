//! Accordion: an index-mapping and diff engine for expandable
//! two-level lists.
//!
//! A two-level list has top-level parent rows, each optionally
//! expandable into an ordered run of sub-rows, but scrolling containers
//! want a flat, linearly-indexed list. This crate is the translation
//! layer between the two views of the same data:
//!
//! - [`OutlineModel`]: the host's read-only shape descriptor (sections,
//!   rows, sub-row counts)
//! - [`ExpansionState`]: which parent rows are currently expanded, with
//!   an optional only-one-at-a-time policy
//! - [`FlatLayout`]: bidirectional flat index ↔ [`RowPath`] translation
//!   and the total flat count
//! - [`FlatDiff`]: the insert/remove flat index sets a host applies as
//!   an animation when the expansion state changes
//! - [`Accordion`]: the per-widget facade tying the above together, with
//!   [`Signal`]-based change notification and scroll-target resolution
//!
//! Rendering is out of scope: the engine never produces or inspects
//! cells. The host asks for the [`RowPath`] behind each visible flat
//! index and draws whatever it likes.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────┐ shape  ┌──────────────┐ diffs   ┌─────────────┐
//! │ OutlineModel │───────>│  Accordion   │────────>│    Host     │
//! │ (data source)│        │  engine      │ signals │ list widget │
//! └──────────────┘        └──────────────┘         └─────────────┘
//!                          │          │
//!                    ┌─────┘          └─────┐
//!              ┌───────────┐         ┌────────────┐
//!              │ FlatLayout│         │ Expansion  │
//!              │ (indices) │         │ State      │
//!              └───────────┘         └────────────┘
//! ```
//!
//! The host mutates expansion through the engine, applies the returned
//! [`FlatDiff`] as row insert/remove animations, and queries
//! [`Accordion::path_at`] per visible flat index while painting.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use accordion::{Accordion, RowKey, RowPath, VecOutline};
//!
//! // Section 0 has three rows; the middle one expands into two
//! // sub-rows. Section 1 has one plain row.
//! let outline = Arc::new(VecOutline::new(vec![vec![0, 2, 0], vec![0]]));
//! let mut list = Accordion::new(outline).with_exclusive_expansion(true);
//!
//! assert_eq!(list.flat_count(), 4);
//!
//! let diff = list.expand(RowKey::new(0, 1));
//! assert_eq!(diff.inserted(), &[2, 3]);
//!
//! // The parent still immediately precedes its sub-rows.
//! assert_eq!(list.path_at(1).unwrap(), RowPath::parent(0, 1));
//! assert_eq!(list.path_at(2).unwrap(), RowPath::sub_row(0, 1, 0));
//! ```

mod diff;
mod engine;
mod error;
mod expansion;
mod flatten;
mod model;
mod position;
mod signal;

pub use diff::FlatDiff;
pub use engine::Accordion;
pub use error::{Error, Result};
pub use expansion::ExpansionState;
pub use flatten::FlatLayout;
pub use model::{OutlineModel, VecOutline};
pub use position::{RowKey, RowPath};
pub use signal::{ConnectionId, Signal};
