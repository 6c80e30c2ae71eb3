// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the reachable views of one scene in paint order.

use alloc::vec::Vec;

use strata_core::quad::Quad;
use strata_core::view::{ViewId, ViewStore};

/// A single entry in the render plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem {
    /// The view to paint.
    pub view: ViewId,
    /// The view's render order.
    pub render_order: u32,
    /// The view's quad, if it has one.
    pub quad: Option<Quad>,
}

/// The views reachable from a root view, sorted back to front.
///
/// Painting the items in sequence draws every view after everything it
/// should cover, so renderers can use the plan directly as a painter's
/// algorithm queue.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    items: Vec<RenderItem>,
    stack: Vec<ViewId>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan for the tree under `root`.
    ///
    /// Render orders in `store` must be current (for example, right after
    /// [`Scene::commit`](strata_core::scene::Scene::commit)). With no root the
    /// plan is empty.
    #[must_use]
    pub fn build(store: &ViewStore, root: Option<ViewId>) -> Self {
        let mut plan = Self::new();
        plan.build_into(store, root);
        plan
    }

    /// Like [`build`](Self::build), but reuses this plan's buffers.
    pub fn build_into(&mut self, store: &ViewStore, root: Option<ViewId>) {
        self.clear();
        let Some(root) = root else {
            return;
        };

        self.stack.push(root);
        while let Some(view) = self.stack.pop() {
            self.items.push(RenderItem {
                view,
                render_order: store.render_order(view),
                quad: store.quad(view),
            });
            self.stack.extend(store.children(view));
        }
        // Stable, so stale duplicate orders keep discovery order.
        self.items.sort_by_key(|item| item.render_order);
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.stack.clear();
    }

    /// Returns the items in back-to-front order.
    #[must_use]
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Returns the planned views in back-to-front order.
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.items.iter().map(|item| item.view)
    }
}
