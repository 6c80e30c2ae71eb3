// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render root: registry, invalidation state, and memoized render order.
//!
//! A [`RenderRoot`] owns three things for one active scene:
//!
//! - The root view of the tree whose render order it maintains.
//! - A flat registry of every view known to the scene. Hit tests scan this
//!   registry instead of walking the tree.
//! - An [`OrderState`] recording whether the stored render orders still match
//!   the tree.
//!
//! The tree itself is borrowed per call through [`ViewTree`], so the root can
//! sit next to any layout system's node storage.
//!
//! # State machine
//!
//! ```text
//!          mutation / set_render_order_dirty(true)
//!   Clean ─────────────────────────────────────────► Dirty
//!     ▲                                                │
//!     └────────── update_render_order (full pass) ─────┘
//! ```
//!
//! Registry membership changes alone do not invalidate order. Callers that
//! mutate the tree behind the root's back (z-index changes, removals,
//! reparenting) must call [`set_render_order_dirty`](RenderRoot::set_render_order_dirty).

use alloc::vec::Vec;

use kurbo::Point;

use crate::hit;
use crate::order::OrderPass;
use crate::tree::ViewTree;

/// Whether stored render orders reflect the current tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrderState {
    /// Render orders are consistent with the tree.
    Clean,
    /// Something changed since the last full recomputation.
    #[default]
    Dirty,
}

/// Tuning knobs for a [`RenderRoot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootConfig {
    /// Recompute a dirty render order before answering a hit test.
    ///
    /// When `false`, hit tests read whatever orders are stored and the caller
    /// is responsible for calling [`RenderRoot::update_render_order`] first.
    /// A hit test against a dirty order may return a view that is no longer
    /// on top, or no longer in the tree.
    pub recompute_on_query: bool,
    /// Initial registry capacity.
    pub registry_capacity: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            recompute_on_query: true,
            registry_capacity: 0,
        }
    }
}

impl RootConfig {
    /// Hit tests never recompute; orders are only refreshed by explicit
    /// [`update_render_order`](RenderRoot::update_render_order) calls.
    ///
    /// For hosts that batch mutations and recompute once per frame. Such a host
    /// must not query between a mutation and the next update.
    #[must_use]
    pub fn deferred() -> Self {
        Self {
            recompute_on_query: false,
            ..Self::default()
        }
    }
}

/// Coordinates render order and hit testing for one scene.
///
/// `V` is the view handle type of the [`ViewTree`] the root is used with.
#[derive(Clone, Debug)]
pub struct RenderRoot<V> {
    root_view: Option<V>,
    registry: Vec<V>,
    state: OrderState,
    config: RootConfig,
    pass: OrderPass<V>,
    ordered: u32,
}

impl<V: Copy + Eq> Default for RenderRoot<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + Eq> RenderRoot<V> {
    /// Creates an empty, dirty root with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RootConfig::default())
    }

    /// Creates an empty, dirty root.
    #[must_use]
    pub fn with_config(config: RootConfig) -> Self {
        Self {
            root_view: None,
            registry: Vec::with_capacity(config.registry_capacity),
            state: OrderState::Dirty,
            config,
            pass: OrderPass::new(),
            ordered: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> RootConfig {
        self.config
    }

    // -- Root view --

    /// Returns the root view, if one is set.
    #[must_use]
    pub fn root_view(&self) -> Option<V> {
        self.root_view
    }

    /// Sets or clears the root view.
    ///
    /// Marks render order dirty if the root actually changes.
    pub fn set_root_view(&mut self, view: Option<V>) {
        if self.root_view != view {
            self.root_view = view;
            self.state = OrderState::Dirty;
        }
    }

    // -- Registry --

    /// Registers `view` as a hit-test candidate.
    ///
    /// Returns `false` if it was already registered. Does not mark render
    /// order dirty.
    pub fn add_view(&mut self, view: V) -> bool {
        if self.registry.contains(&view) {
            return false;
        }
        self.registry.push(view);
        true
    }

    /// Unregisters `view`, preserving the order of the remaining views.
    ///
    /// Returns `false` if it was not registered. Does not mark render order
    /// dirty.
    pub fn remove_view(&mut self, view: V) -> bool {
        match self.registry.iter().position(|&v| v == view) {
            Some(pos) => {
                self.registry.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns whether `view` is registered.
    #[must_use]
    pub fn contains_view(&self, view: V) -> bool {
        self.registry.contains(&view)
    }

    /// Returns the registered views in registration order.
    #[must_use]
    pub fn views(&self) -> &[V] {
        &self.registry
    }

    /// Unregisters every view for which `keep` returns `false`, preserving the
    /// order of the rest.
    ///
    /// Returns the number of views removed. Does not mark render order dirty.
    pub fn retain_views(&mut self, mut keep: impl FnMut(V) -> bool) -> usize {
        let before = self.registry.len();
        self.registry.retain(|&view| keep(view));
        before - self.registry.len()
    }

    // -- Structure and invalidation --

    /// Inserts `child` into `parent`'s children at `index` and marks render
    /// order dirty.
    ///
    /// Later children shift towards the end. Registry membership is not
    /// changed.
    pub fn set_child_at_index<T>(&mut self, tree: &mut T, parent: V, index: usize, child: V)
    where
        T: ViewTree<View = V>,
    {
        tree.insert_child(parent, index, child);
        self.state = OrderState::Dirty;
    }

    /// Marks render order dirty.
    ///
    /// Passing `false` is accepted for batching symmetry but never clears the
    /// flag; only a full recomputation does.
    pub fn set_render_order_dirty(&mut self, dirty: bool) {
        if dirty {
            self.state = OrderState::Dirty;
        }
    }

    /// Returns whether render order needs recomputation.
    #[must_use]
    pub fn is_render_order_dirty(&self) -> bool {
        self.state == OrderState::Dirty
    }

    /// Returns the current invalidation state.
    #[must_use]
    pub fn order_state(&self) -> OrderState {
        self.state
    }

    /// Returns the number of views numbered by the last recomputation.
    #[must_use]
    pub fn ordered_count(&self) -> u32 {
        self.ordered
    }

    // -- Recomputation --

    /// Recomputes render order if it is dirty.
    ///
    /// Returns `true` if a pass ran. With no root view the state simply
    /// becomes clean, since nothing is reachable.
    pub fn update_render_order<T>(&mut self, tree: &mut T) -> bool
    where
        T: ViewTree<View = V>,
    {
        if self.state == OrderState::Clean {
            return false;
        }
        self.force_update_render_order(tree);
        true
    }

    /// Recomputes render order unconditionally.
    ///
    /// With a root view set, every registered view is first reset to order
    /// `0`, so a view detached from the tree no longer carries the order it
    /// had while it was painted.
    pub fn force_update_render_order<T>(&mut self, tree: &mut T)
    where
        T: ViewTree<View = V>,
    {
        self.ordered = match self.root_view {
            Some(root) => {
                for &view in &self.registry {
                    tree.set_render_order(view, 0);
                }
                self.pass.run(tree, root)
            }
            None => 0,
        };
        self.state = OrderState::Clean;
    }

    // -- Hit testing --

    /// Returns the topmost registered view containing `(x, y)`.
    ///
    /// See [`hit_test_point`](Self::hit_test_point).
    pub fn hit_test<T>(&mut self, tree: &mut T, x: f64, y: f64) -> Option<V>
    where
        T: ViewTree<View = V>,
    {
        self.hit_test_point(tree, Point::new(x, y))
    }

    /// Returns the topmost registered view containing `point`.
    ///
    /// With [`RootConfig::recompute_on_query`] set, a dirty render order is
    /// recomputed first. With it cleared the caller must have called
    /// [`update_render_order`](Self::update_render_order) since the last
    /// mutation; the answer is otherwise based on a stale order.
    ///
    /// With a root view set, only views numbered by the last pass are
    /// candidates: views outside the tree are never painted, so they are never
    /// hit. Without a root view every registered view is scanned with whatever
    /// order it carries. An empty registry yields `None`.
    pub fn hit_test_point<T>(&mut self, tree: &mut T, point: Point) -> Option<V>
    where
        T: ViewTree<View = V>,
    {
        if self.config.recompute_on_query {
            self.update_render_order(tree);
        }
        let tree: &T = tree;
        let in_tree_only = self.root_view.is_some();
        let candidates = self
            .registry
            .iter()
            .copied()
            .filter(|&view| !in_tree_only || tree.render_order(view) != 0);
        hit::hit_test(tree, candidates, point)
    }
}
