// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal in-memory [`ViewTree`] for tests.

use alloc::vec::Vec;

use super::ViewTree;
use crate::quad::Quad;

#[derive(Clone, Debug, Default)]
struct MockView {
    children: Vec<usize>,
    z_index: i32,
    render_order: u32,
    quad: Option<Quad>,
}

/// Views are plain indices into a vector.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockTree {
    views: Vec<MockView>,
}

impl MockTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates one view per entry in `z_indices`, returning their handles.
    pub(crate) fn views(&mut self, z_indices: &[i32]) -> Vec<usize> {
        z_indices
            .iter()
            .map(|&z_index| {
                self.views.push(MockView {
                    z_index,
                    ..MockView::default()
                });
                self.views.len() - 1
            })
            .collect()
    }

    /// Appends `child` to `parent`.
    pub(crate) fn push_child(&mut self, parent: usize, child: usize) {
        let index = self.views[parent].children.len();
        self.insert_child(parent, index, child);
    }

    /// Detaches `child` from `parent`.
    pub(crate) fn remove_child(&mut self, parent: usize, child: usize) {
        self.views[parent].children.retain(|&c| c != child);
    }

    pub(crate) fn set_z_index(&mut self, view: usize, z_index: i32) {
        self.views[view].z_index = z_index;
    }

    pub(crate) fn set_quad(&mut self, view: usize, quad: Quad) {
        self.views[view].quad = Some(quad);
    }

    pub(crate) fn order(&self, view: usize) -> u32 {
        self.views[view].render_order
    }

    /// Render orders of every view, indexed by handle.
    pub(crate) fn orders(&self) -> Vec<u32> {
        self.views.iter().map(|v| v.render_order).collect()
    }
}

impl ViewTree for MockTree {
    type View = usize;

    fn child_count(&self, view: usize) -> usize {
        self.views[view].children.len()
    }

    fn child_at(&self, view: usize, index: usize) -> usize {
        self.views[view].children[index]
    }

    fn z_index(&self, view: usize) -> i32 {
        self.views[view].z_index
    }

    fn render_order(&self, view: usize) -> u32 {
        self.views[view].render_order
    }

    fn set_render_order(&mut self, view: usize, order: u32) {
        self.views[view].render_order = order;
    }

    fn quad(&self, view: usize) -> Option<Quad> {
        self.views[view].quad
    }

    fn insert_child(&mut self, parent: usize, index: usize, child: usize) {
        self.views[parent].children.insert(index, child);
    }
}
