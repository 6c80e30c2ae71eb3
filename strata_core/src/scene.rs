// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One active scene: a view store wired to a render root.
//!
//! [`Scene`] keeps the two halves consistent so callers do not have to:
//!
//! - Every created view is registered as a hit-test candidate, and every
//!   destroyed view is unregistered (and unset as root view if it was one).
//!   This holds for views created or destroyed directly on the store too:
//!   the registry catches up before each commit and hit test.
//! - [`commit`](Scene::commit) drains the store's dirty channels, marks render
//!   order dirty if any topology or z-index change was drained, and refreshes
//!   render order.
//! - [`hit_test`](Scene::hit_test) notices undrained order-affecting changes,
//!   so a query never observes a stale order under the default
//!   [`RootConfig`].
//!
//! A typical update cycle:
//!
//! ```
//! use kurbo::Point;
//! use strata_core::quad::Quad;
//! use strata_core::scene::Scene;
//! use strata_core::trace::Tracer;
//!
//! let mut scene = Scene::new();
//! let panel = scene.create_view();
//! let button = scene.create_view();
//! scene.set_root_view(Some(panel));
//! scene.set_child_at_index(panel, 0, button);
//! scene.store_mut().set_quad(panel, Some(Quad::new(0.0, 0.0, 100.0, 100.0)));
//! scene.store_mut().set_quad(button, Some(Quad::new(10.0, 10.0, 20.0, 20.0)));
//!
//! let mut tracer = Tracer::none();
//! scene.commit(&mut tracer);
//! assert_eq!(scene.hit_test(Point::new(15.0, 15.0), &mut tracer), Some(button));
//! assert_eq!(scene.hit_test(Point::new(50.0, 50.0), &mut tracer), Some(panel));
//! ```

use kurbo::Point;

use crate::root::{RenderRoot, RootConfig};
use crate::trace::{CommitEvent, HitTestEvent, OrderUpdateEvent, Tracer};
use crate::view::{ViewChanges, ViewId, ViewStore};

/// A view store plus the render root that orders it.
#[derive(Debug)]
pub struct Scene {
    store: ViewStore,
    root: RenderRoot<ViewId>,
    changes: ViewChanges,
    commit_index: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with the default [`RootConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RootConfig::default())
    }

    /// Creates an empty scene.
    #[must_use]
    pub fn with_config(config: RootConfig) -> Self {
        Self {
            store: ViewStore::new(),
            root: RenderRoot::with_config(config),
            changes: ViewChanges::default(),
            commit_index: 0,
        }
    }

    /// Returns the view store.
    #[must_use]
    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    /// Returns the view store for property mutation.
    ///
    /// Changes made here, including views created or destroyed on the store,
    /// are picked up by the next [`commit`](Self::commit) or
    /// [`hit_test`](Self::hit_test).
    #[must_use]
    pub fn store_mut(&mut self) -> &mut ViewStore {
        &mut self.store
    }

    /// Returns the render root.
    #[must_use]
    pub fn root(&self) -> &RenderRoot<ViewId> {
        &self.root
    }

    /// Returns the number of commits performed so far.
    #[must_use]
    pub fn commit_index(&self) -> u64 {
        self.commit_index
    }

    /// Creates a view and registers it as a hit-test candidate.
    pub fn create_view(&mut self) -> ViewId {
        let id = self.store.create_view();
        self.root.add_view(id);
        id
    }

    /// Destroys a view and unregisters it.
    ///
    /// If the view is the root view, the scene is left without one.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view still has children.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.store.destroy_view(id);
        self.root.remove_view(id);
        if self.root.root_view() == Some(id) {
            self.root.set_root_view(None);
        }
    }

    /// Sets or clears the root view.
    pub fn set_root_view(&mut self, view: Option<ViewId>) {
        self.root.set_root_view(view);
    }

    /// Inserts `child` under `parent` at `index` and marks render order dirty.
    ///
    /// # Panics
    ///
    /// Same conditions as [`ViewStore::insert_child`].
    pub fn set_child_at_index(&mut self, parent: ViewId, index: usize, child: ViewId) {
        self.root
            .set_child_at_index(&mut self.store, parent, index, child);
    }

    /// Drains pending view changes and brings render order up to date.
    ///
    /// Returns the drained changes, valid until the next commit.
    pub fn commit(&mut self, tracer: &mut Tracer<'_>) -> &ViewChanges {
        self.sync_registry();
        self.store.take_changes_into(&mut self.changes);
        self.commit_index += 1;

        let invalidated = self.changes.affects_render_order();
        self.root.set_render_order_dirty(invalidated);

        tracer.commit(&CommitEvent {
            commit_index: self.commit_index,
            views: count(self.store.len()),
            topology_changes: count(self.changes.topology.len()),
            z_index_changes: count(self.changes.z_indices.len()),
            quad_changes: count(self.changes.quads.len()),
            added: count(self.changes.added.len()),
            removed: count(self.changes.removed.len()),
            order_invalidated: invalidated,
        });
        #[cfg(feature = "trace-rich")]
        if tracer.wants_view_changes() {
            let records = crate::trace::view_changes(&self.changes);
            tracer.view_changes(self.commit_index, &records);
        }

        let recomputed = self.root.update_render_order(&mut self.store);
        self.trace_order_update(tracer, recomputed);

        &self.changes
    }

    /// Returns the topmost registered view containing `point`.
    ///
    /// Undrained topology or z-index changes mark render order dirty first.
    /// Whether a dirty order is then recomputed is governed by
    /// [`RootConfig::recompute_on_query`].
    pub fn hit_test(&mut self, point: Point, tracer: &mut Tracer<'_>) -> Option<ViewId> {
        self.sync_registry();
        self.root
            .set_render_order_dirty(self.store.has_order_changes());

        let was_dirty = self.root.is_render_order_dirty();
        let hit = self.root.hit_test_point(&mut self.store, point);
        if was_dirty && !self.root.is_render_order_dirty() {
            self.trace_order_update(tracer, true);
        }

        tracer.hit_test(&HitTestEvent {
            commit_index: self.commit_index,
            x: point.x,
            y: point.y,
            candidates: count(self.root.views().len()),
            hit: hit.map(ViewId::index),
            hit_order: hit.map_or(0, |id| self.store.render_order(id)),
        });
        hit
    }

    /// Registers views the store created and drops views it destroyed since
    /// the last commit.
    fn sync_registry(&mut self) {
        let store = &self.store;
        if !store.pending_removed.is_empty() {
            self.root.retain_views(|id| store.is_alive(id));
            if self.root.root_view().is_some_and(|id| !store.is_alive(id)) {
                self.root.set_root_view(None);
            }
        }
        for &idx in &store.pending_added {
            let id = store.id_at(idx);
            if store.is_alive(id) {
                self.root.add_view(id);
            }
        }
    }

    fn trace_order_update(&self, tracer: &mut Tracer<'_>, recomputed: bool) {
        tracer.order_update(&OrderUpdateEvent {
            commit_index: self.commit_index,
            root: self.root.root_view().map(ViewId::index),
            recomputed,
            ordered: self.root.ordered_count(),
        });
    }
}

/// Saturating `usize` to `u32` for trace counters.
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::quad::Quad;

    /// Panel with two overlapping buttons, the second declared later.
    fn panel_scene() -> (Scene, ViewId, ViewId, ViewId) {
        let mut scene = Scene::new();
        let panel = scene.create_view();
        let a = scene.create_view();
        let b = scene.create_view();
        scene.set_root_view(Some(panel));
        scene.set_child_at_index(panel, 0, a);
        scene.set_child_at_index(panel, 1, b);
        let store = scene.store_mut();
        store.set_quad(panel, Some(Quad::new(0.0, 0.0, 100.0, 100.0)));
        store.set_quad(a, Some(Quad::new(20.0, 20.0, 40.0, 40.0)));
        store.set_quad(b, Some(Quad::new(50.0, 20.0, 40.0, 40.0)));
        (scene, panel, a, b)
    }

    #[test]
    fn commit_orders_and_reports() {
        let (mut scene, panel, a, b) = panel_scene();
        let changes = scene.commit(&mut Tracer::none());
        assert_eq!(changes.added.len(), 3);
        assert!(changes.affects_render_order());
        assert_eq!(scene.commit_index(), 1);
        assert!(!scene.root().is_render_order_dirty());
        let orders: Vec<u32> = [panel, a, b]
            .iter()
            .map(|&id| scene.store().render_order(id))
            .collect();
        assert_eq!(orders, [1, 2, 3]);
    }

    #[test]
    fn empty_commit_keeps_order_clean() {
        let (mut scene, ..) = panel_scene();
        scene.commit(&mut Tracer::none());
        let changes = scene.commit(&mut Tracer::none());
        assert!(changes.is_empty());
        assert!(!scene.root().is_render_order_dirty());
        assert_eq!(scene.commit_index(), 2);
    }

    #[test]
    fn z_index_change_is_seen_by_hit_test_without_commit() {
        let (mut scene, _, a, b) = panel_scene();
        scene.commit(&mut Tracer::none());
        let point = Point::new(55.0, 30.0);
        assert_eq!(scene.hit_test(point, &mut Tracer::none()), Some(b));

        scene.store_mut().set_z_index(a, 2);
        assert_eq!(scene.hit_test(point, &mut Tracer::none()), Some(a));
    }

    #[test]
    fn quad_change_does_not_invalidate_order() {
        let (mut scene, _, a, _) = panel_scene();
        scene.commit(&mut Tracer::none());
        scene
            .store_mut()
            .set_quad(a, Some(Quad::new(0.0, 0.0, 10.0, 10.0)));
        let changes = scene.commit(&mut Tracer::none());
        assert_eq!(changes.quads, &[a.index()]);
        assert!(!changes.affects_render_order());
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0), &mut Tracer::none()), Some(a));
    }

    #[test]
    fn destroy_unregisters_and_unsets_root() {
        let (mut scene, panel, a, b) = panel_scene();
        scene.commit(&mut Tracer::none());

        scene.destroy_view(b);
        assert!(!scene.root().contains_view(b));
        assert_eq!(
            scene.hit_test(Point::new(55.0, 30.0), &mut Tracer::none()),
            Some(a)
        );
        assert_eq!(scene.root().ordered_count(), 2);

        scene.store_mut().remove_from_parent(a);
        scene.destroy_view(a);
        scene.destroy_view(panel);
        assert_eq!(scene.root().root_view(), None);
        assert!(scene.root().views().is_empty());
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0), &mut Tracer::none()), None);
    }

    #[test]
    fn replaced_view_wins_over_detached_one() {
        let (mut scene, panel, a, b) = panel_scene();
        scene.commit(&mut Tracer::none());
        let point = Point::new(80.0, 30.0);
        assert_eq!(scene.hit_test(point, &mut Tracer::none()), Some(b));

        scene.store_mut().remove_from_parent(b);
        let c = scene.create_view();
        scene
            .store_mut()
            .set_quad(c, Some(Quad::new(50.0, 20.0, 40.0, 40.0)));
        scene.set_child_at_index(panel, 1, c);
        scene.commit(&mut Tracer::none());

        let store = scene.store();
        assert_eq!(store.render_order(a), 2);
        assert_eq!(store.render_order(c), 3);
        assert_eq!(store.render_order(b), 0, "detached view is unnumbered");
        assert!(scene.root().contains_view(b), "still registered");
        assert_eq!(scene.hit_test(point, &mut Tracer::none()), Some(c));
    }

    #[test]
    fn views_destroyed_on_store_are_unregistered() {
        let (mut scene, panel, a, b) = panel_scene();
        scene.commit(&mut Tracer::none());

        let store = scene.store_mut();
        store.remove_from_parent(b);
        store.destroy_view(b);
        assert_eq!(
            scene.hit_test(Point::new(80.0, 30.0), &mut Tracer::none()),
            Some(panel)
        );
        assert!(!scene.root().contains_view(b));

        let store = scene.store_mut();
        store.remove_from_parent(a);
        store.destroy_view(a);
        store.destroy_view(panel);
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0), &mut Tracer::none()), None);
        assert_eq!(scene.root().root_view(), None);
        assert!(scene.root().views().is_empty());
        scene.commit(&mut Tracer::none());
        assert_eq!(scene.root().ordered_count(), 0);
    }

    #[test]
    fn views_created_on_store_are_registered() {
        let (mut scene, panel, ..) = panel_scene();
        scene.commit(&mut Tracer::none());

        let d = scene.store_mut().create_view();
        scene.store_mut().add_child(panel, d);
        scene
            .store_mut()
            .set_quad(d, Some(Quad::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(scene.hit_test(Point::new(5.0, 5.0), &mut Tracer::none()), Some(d));
        assert!(scene.root().contains_view(d));

        scene.commit(&mut Tracer::none());
        assert_eq!(scene.root().views().len(), 4);
    }

    #[test]
    fn reused_slot_registers_the_new_view() {
        let (mut scene, _, _, b) = panel_scene();
        scene.commit(&mut Tracer::none());

        let store = scene.store_mut();
        store.remove_from_parent(b);
        store.destroy_view(b);
        let e = store.create_view();
        assert_eq!(e.index(), b.index());
        scene.commit(&mut Tracer::none());
        assert!(scene.root().contains_view(e));
        assert!(!scene.root().contains_view(b));
        assert_eq!(scene.root().views().len(), 3);
    }

    #[test]
    fn deferred_scene_answers_from_committed_order() {
        let mut scene = Scene::with_config(RootConfig::deferred());
        let panel = scene.create_view();
        let a = scene.create_view();
        let b = scene.create_view();
        scene.set_root_view(Some(panel));
        scene.set_child_at_index(panel, 0, a);
        scene.set_child_at_index(panel, 1, b);
        scene
            .store_mut()
            .set_quad(a, Some(Quad::new(0.0, 0.0, 10.0, 10.0)));
        scene
            .store_mut()
            .set_quad(b, Some(Quad::new(0.0, 0.0, 10.0, 10.0)));
        scene.commit(&mut Tracer::none());

        let point = Point::new(5.0, 5.0);
        assert_eq!(scene.hit_test(point, &mut Tracer::none()), Some(b));
        scene.store_mut().set_z_index(a, 1);
        assert_eq!(
            scene.hit_test(point, &mut Tracer::none()),
            Some(b),
            "stale until the next commit"
        );
        scene.commit(&mut Tracer::none());
        assert_eq!(scene.hit_test(point, &mut Tracer::none()), Some(a));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn commit_and_hit_test_are_traced() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Log {
            commits: Vec<CommitEvent>,
            updates: Vec<OrderUpdateEvent>,
            hits: Vec<HitTestEvent>,
        }
        impl TraceSink for Log {
            fn on_commit(&mut self, e: &CommitEvent) {
                self.commits.push(*e);
            }
            fn on_order_update(&mut self, e: &OrderUpdateEvent) {
                self.updates.push(*e);
            }
            fn on_hit_test(&mut self, e: &HitTestEvent) {
                self.hits.push(*e);
            }
        }

        let (mut scene, panel, _, b) = panel_scene();
        let mut log = Log::default();
        let mut tracer = Tracer::new(&mut log);
        scene.commit(&mut tracer);
        scene.hit_test(Point::new(80.0, 30.0), &mut tracer);
        drop(tracer);

        assert_eq!(log.commits.len(), 1);
        assert_eq!(log.commits[0].added, 3);
        assert!(log.commits[0].order_invalidated);
        assert_eq!(log.updates.len(), 1, "hit test after commit needs no pass");
        assert!(log.updates[0].recomputed);
        assert_eq!(log.updates[0].root, Some(panel.index()));
        assert_eq!(log.updates[0].ordered, 3);
        assert_eq!(log.hits[0].hit, Some(b.index()));
        assert_eq!(log.hits[0].hit_order, 3);
        assert_eq!(log.hits[0].candidates, 3);
    }
}
