// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draining accumulated view changes.
//!
//! Every [`ViewStore`] mutation marks a dirty channel (see
//! [`dirty`](crate::dirty)). [`ViewStore::take_changes`] drains all channels at
//! once and reports which slots changed in each category. The render root
//! only needs to know whether anything order-affecting happened; hover and
//! render-plan consumers use the per-slot lists.
//!
//! [`ViewChanges`] uses raw slot indices (`u32`) rather than [`ViewId`]
//! handles. Removed slots may already be reused by the time a consumer looks
//! at them, so resolve indices through
//! [`ViewStore::id_at`] only for slots that are not in `removed`.
//!
//! [`ViewId`]: super::ViewId

use alloc::vec::Vec;

use super::store::ViewStore;
use crate::dirty;

/// The set of changes drained by one [`ViewStore::take_changes`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewChanges {
    /// Slots whose child list changed, plus created and destroyed slots.
    pub topology: Vec<u32>,
    /// Slots whose z-index changed.
    pub z_indices: Vec<u32>,
    /// Slots whose hit quad changed.
    pub quads: Vec<u32>,
    /// Views created since the last drain.
    pub added: Vec<u32>,
    /// Views destroyed since the last drain.
    pub removed: Vec<u32>,
}

impl ViewChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.topology.clear();
        self.z_indices.clear();
        self.quads.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topology.is_empty()
            && self.z_indices.is_empty()
            && self.quads.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }

    /// Returns `true` if the drained changes invalidate render order.
    #[must_use]
    pub fn affects_render_order(&self) -> bool {
        !self.topology.is_empty() || !self.z_indices.is_empty()
    }
}

impl ViewStore {
    /// Drains every dirty channel and returns what changed.
    pub fn take_changes(&mut self) -> ViewChanges {
        let mut changes = ViewChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a caller-provided
    /// buffer.
    pub fn take_changes_into(&mut self, changes: &mut ViewChanges) {
        changes.clear();

        changes.topology = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.z_indices = self
            .dirty
            .drain(dirty::Z_INDEX)
            .deterministic()
            .run()
            .collect();
        changes.quads = self
            .dirty
            .drain(dirty::QUAD)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::Quad;

    #[test]
    fn creation_is_reported_once() {
        let mut store = ViewStore::new();
        let a = store.create_view();
        let changes = store.take_changes();
        assert_eq!(changes.added, &[a.index()]);
        assert!(changes.topology.contains(&a.index()));
        assert!(changes.affects_render_order());

        let changes = store.take_changes();
        assert!(changes.is_empty(), "second drain sees nothing");
    }

    #[test]
    fn channels_are_separated() {
        let mut store = ViewStore::new();
        let a = store.create_view();
        let b = store.create_view();
        let _ = store.take_changes();

        store.set_z_index(a, 2);
        store.set_quad(b, Some(Quad::new(0.0, 0.0, 4.0, 4.0)));
        let changes = store.take_changes();
        assert_eq!(changes.z_indices, &[a.index()]);
        assert_eq!(changes.quads, &[b.index()]);
        assert!(changes.topology.is_empty());
        assert!(changes.affects_render_order());
    }

    #[test]
    fn quad_only_changes_keep_order() {
        let mut store = ViewStore::new();
        let a = store.create_view();
        let _ = store.take_changes();
        store.set_quad(a, Some(Quad::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!store.take_changes().affects_render_order());
    }

    #[test]
    fn attach_marks_parent() {
        let mut store = ViewStore::new();
        let p = store.create_view();
        let c = store.create_view();
        let _ = store.take_changes();

        store.add_child(p, c);
        let changes = store.take_changes();
        assert_eq!(changes.topology, &[p.index()]);
    }

    #[test]
    fn destroy_is_reported() {
        let mut store = ViewStore::new();
        let p = store.create_view();
        let c = store.create_view();
        store.add_child(p, c);
        store.set_z_index(c, 5);
        let _ = store.take_changes();

        store.set_z_index(c, 6);
        store.destroy_view(c);
        let changes = store.take_changes();
        assert_eq!(changes.removed, &[c.index()]);
        assert!(changes.z_indices.is_empty(), "pending marks of a destroyed view are dropped");
        assert!(changes.topology.contains(&p.index()));
        assert!(changes.topology.contains(&c.index()));
    }

    #[test]
    fn take_changes_into_reuses_buffer() {
        let mut store = ViewStore::new();
        let mut changes = ViewChanges::default();
        let a = store.create_view();
        store.take_changes_into(&mut changes);
        assert_eq!(changes.added, &[a.index()]);
        store.take_changes_into(&mut changes);
        assert!(changes.is_empty());
    }
}
