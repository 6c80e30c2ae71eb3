// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for scene commits and pointer queries.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`Scene`](crate::scene::Scene) calls as it commits mutations, recomputes
//! render order, and answers hit tests. All method bodies default to no-ops,
//! so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) gates per-view [`ViewChange`] records and
//!   the corresponding `TraceSink` method.

#[cfg(feature = "trace-rich")]
use alloc::vec::Vec;

#[cfg(feature = "trace-rich")]
use crate::view::ViewChanges;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which aspect of a view changed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewField {
    /// Child list changed.
    Topology,
    /// Z-index changed.
    ZIndex,
    /// Hit quad changed.
    Quad,
    /// View was created.
    Added,
    /// View was destroyed.
    Removed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a commit drains pending view changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitEvent {
    /// Monotonic commit counter.
    pub commit_index: u64,
    /// Live views after the commit.
    pub views: u32,
    /// Slots with topology changes.
    pub topology_changes: u32,
    /// Slots with z-index changes.
    pub z_index_changes: u32,
    /// Slots with quad changes.
    pub quad_changes: u32,
    /// Views created.
    pub added: u32,
    /// Views destroyed.
    pub removed: u32,
    /// Whether the commit invalidated render order.
    pub order_invalidated: bool,
}

/// Emitted whenever the scene asks the render root to refresh render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderUpdateEvent {
    /// Commit counter at the time of the update.
    pub commit_index: u64,
    /// Raw slot index of the root view, if one is set.
    pub root: Option<u32>,
    /// Whether a full pass actually ran (`false` if order was already clean).
    pub recomputed: bool,
    /// Number of views numbered by the most recent pass.
    pub ordered: u32,
}

/// Emitted after every hit test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitTestEvent {
    /// Commit counter at the time of the query.
    pub commit_index: u64,
    /// Query x coordinate.
    pub x: f64,
    /// Query y coordinate.
    pub y: f64,
    /// Number of registered candidates scanned.
    pub candidates: u32,
    /// Raw slot index of the hit view, if any.
    pub hit: Option<u32>,
    /// Render order of the hit view (`0` on a miss).
    pub hit_order: u32,
}

/// A per-commit view change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewChange {
    /// Slot index of the view that changed.
    pub view_index: u32,
    /// Which aspect changed.
    pub field: ViewField,
}

/// Flattens drained changes into per-view records.
#[cfg(feature = "trace-rich")]
#[must_use]
pub fn view_changes(changes: &ViewChanges) -> Vec<ViewChange> {
    let lists = [
        (&changes.added, ViewField::Added),
        (&changes.removed, ViewField::Removed),
        (&changes.topology, ViewField::Topology),
        (&changes.z_indices, ViewField::ZIndex),
        (&changes.quads, ViewField::Quad),
    ];
    lists
        .into_iter()
        .flat_map(|(slots, field)| {
            slots.iter().map(move |&view_index| ViewChange { view_index, field })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a scene.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after pending view changes are drained.
    fn on_commit(&mut self, e: &CommitEvent) {
        _ = e;
    }

    /// Called after the render root is asked to refresh render order.
    fn on_order_update(&mut self, e: &OrderUpdateEvent) {
        _ = e;
    }

    /// Called after a hit test.
    fn on_hit_test(&mut self, e: &HitTestEvent) {
        _ = e;
    }

    /// Called with per-view changes of a commit (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_view_changes(&mut self, commit_index: u64, changes: &[ViewChange]) {
        _ = (commit_index, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`CommitEvent`].
    #[inline]
    pub fn commit(&mut self, e: &CommitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_commit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OrderUpdateEvent`].
    #[inline]
    pub fn order_update(&mut self, e: &OrderUpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_order_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HitTestEvent`].
    #[inline]
    pub fn hit_test(&mut self, e: &HitTestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hit_test(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Returns whether per-view change records would reach a sink.
    ///
    /// Lets callers skip building [`ViewChange`] lists nobody will see.
    #[cfg(feature = "trace-rich")]
    #[inline]
    #[must_use]
    pub fn wants_view_changes(&self) -> bool {
        self.sink.is_some()
    }

    /// Emits per-view changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn view_changes(&mut self, commit_index: u64, changes: &[ViewChange]) {
        if let Some(s) = &mut self.sink {
            s.on_view_changes(commit_index, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
