// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays view storage with allocation, topology, and property management.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::quad::Quad;
use crate::tree::ViewTree;

use super::id::{INVALID, ViewId};
use super::traverse::Children;

/// Struct-of-arrays storage for all views.
///
/// Views are addressed by [`ViewId`] handles. Each view occupies a slot in
/// parallel arrays; destroyed views are recycled through a free list, and
/// generation counters reject stale handles.
///
/// Children are stored per view as an ordered list of slot indices, which is
/// the document order the render-order pass walks.
#[derive(Debug)]
pub struct ViewStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) children: Vec<Vec<u32>>,

    // -- Properties (set by callers) --
    pub(crate) z_index: Vec<i32>,
    pub(crate) quad: Vec<Option<Quad>>,

    // -- Computed (written by the render-order pass) --
    pub(crate) render_order: Vec<u32>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    /// Creates an empty view store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            children: Vec::new(),
            z_index: Vec::new(),
            quad: Vec::new(),
            render_order: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new view and returns its handle.
    ///
    /// The view starts detached, with z-index `0`, no quad, and render order
    /// `0` (not yet ordered).
    pub fn create_view(&mut self) -> ViewId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.children[i].clear();
            self.z_index[i] = 0;
            self.quad[i] = None;
            self.render_order[i] = 0;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.children.push(Vec::new());
            self.z_index.push(0);
            self.quad.push(None);
            self.render_order.push(0);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        self.id_at(idx)
    }

    /// Destroys a view, freeing its slot for reuse.
    ///
    /// If the view is attached it is first removed from its parent.
    ///
    /// # Panics
    ///
    /// Panics if the view has children (detach or destroy them first) or if
    /// the handle is stale.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.children[idx as usize].is_empty(),
            "cannot destroy view with children"
        );

        if self.parent[idx as usize] != INVALID {
            let p = self.unlink_from_parent(idx);
            self.dirty.mark(p, dirty::TOPOLOGY);
        }

        // Drop any pending marks for the slot before recording the removal.
        self.dirty.remove_key(idx);

        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live view.
    #[must_use]
    pub fn is_alive(&self, id: ViewId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns `true` if the store holds no live views.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology API --

    /// Inserts `child` into `parent`'s child list at `index`.
    ///
    /// Children at `index` and after shift one position towards the end;
    /// `index == child_count(parent)` appends.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, if
    /// `index` is past the end of the child list, or if `parent` is `child` or
    /// one of its descendants.
    pub fn insert_child(&mut self, parent: ViewId, index: usize, child: ViewId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        self.link(parent.idx, index, child.idx);
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`insert_child`](Self::insert_child).
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) {
        self.validate(parent);
        let index = self.children[parent.idx as usize].len();
        self.insert_child(parent, index, child);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view has no parent.
    pub fn remove_from_parent(&mut self, child: ViewId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "view has no parent"
        );
        let p = self.unlink_from_parent(child.idx);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Moves `child` to position `index` among `new_parent`'s children.
    ///
    /// If `child` already has a parent it is detached first, so when moving
    /// within the same parent `index` refers to the list without `child`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `index` is out of range, or if
    /// `new_parent` is `child` or one of its descendants.
    pub fn reparent(&mut self, child: ViewId, new_parent: ViewId, index: usize) {
        self.validate(child);
        self.validate(new_parent);
        // Check before detaching so a rejected move leaves the tree intact.
        assert!(
            !self.is_ancestor_or_self(child.idx, new_parent.idx),
            "cannot attach a view beneath itself"
        );

        if self.parent[child.idx as usize] != INVALID {
            let old_p = self.unlink_from_parent(child.idx);
            self.dirty.mark(old_p, dirty::TOPOLOGY);
        }
        self.link(new_parent.idx, index, child.idx);
    }

    /// Returns the parent of a view, if any.
    #[must_use]
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(self.id_at(p))
        }
    }

    /// Returns an iterator over the direct children of a view.
    #[must_use]
    pub fn children(&self, id: ViewId) -> Children<'_> {
        self.validate(id);
        Children::new(self, &self.children[id.idx as usize])
    }

    /// Returns the number of direct children of a view.
    #[must_use]
    pub fn child_count(&self, id: ViewId) -> usize {
        self.validate(id);
        self.children[id.idx as usize].len()
    }

    /// Returns the live views that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<ViewId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx))
            .map(|idx| self.id_at(idx))
            .collect()
    }

    // -- Properties --

    /// Returns the z-index of a view.
    #[must_use]
    pub fn z_index(&self, id: ViewId) -> i32 {
        self.validate(id);
        self.z_index[id.idx as usize]
    }

    /// Sets the z-index of a view.
    ///
    /// Marks the Z_INDEX channel if the value changed.
    pub fn set_z_index(&mut self, id: ViewId, z_index: i32) {
        self.validate(id);
        let slot = &mut self.z_index[id.idx as usize];
        if *slot != z_index {
            *slot = z_index;
            self.dirty.mark(id.idx, dirty::Z_INDEX);
        }
    }

    /// Returns the hit quad of a view.
    #[must_use]
    pub fn quad(&self, id: ViewId) -> Option<Quad> {
        self.validate(id);
        self.quad[id.idx as usize]
    }

    /// Sets or clears the hit quad of a view.
    ///
    /// Marks the QUAD channel if the value changed.
    pub fn set_quad(&mut self, id: ViewId, quad: Option<Quad>) {
        self.validate(id);
        let slot = &mut self.quad[id.idx as usize];
        if *slot != quad {
            *slot = quad;
            self.dirty.mark(id.idx, dirty::QUAD);
        }
    }

    /// Returns the render order last computed for a view.
    ///
    /// `0` means the view has never been reached by a render-order pass.
    #[must_use]
    pub fn render_order(&self, id: ViewId) -> u32 {
        self.validate(id);
        self.render_order[id.idx as usize]
    }

    /// Returns whether any pending change affects render order.
    ///
    /// This is `true` after topology or z-index mutations that have not yet
    /// been drained by [`take_changes`](Self::take_changes).
    #[must_use]
    pub fn has_order_changes(&self) -> bool {
        self.dirty.has_dirty(dirty::TOPOLOGY) || self.dirty.has_dirty(dirty::Z_INDEX)
    }

    // -- Raw-index accessors --
    //
    // These accept raw slot indices (as found in `ViewChanges` and trace
    // events) and skip generation validation.

    /// Returns the handle currently occupying raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn id_at(&self, idx: u32) -> ViewId {
        self.check_slot(idx);
        ViewId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns the z-index at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn z_index_at(&self, idx: u32) -> i32 {
        self.check_slot(idx);
        self.z_index[idx as usize]
    }

    /// Returns the hit quad at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn quad_at(&self, idx: u32) -> Option<Quad> {
        self.check_slot(idx);
        self.quad[idx as usize]
    }

    /// Returns the render order at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn render_order_at(&self, idx: u32) -> u32 {
        self.check_slot(idx);
        self.render_order[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: ViewId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ViewId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Returns whether `ancestor` is `idx` or lies on its parent chain.
    fn is_ancestor_or_self(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    /// Attaches detached slot `c` under `p` at `index` and marks `p`.
    fn link(&mut self, p: u32, index: usize, c: u32) {
        assert!(
            index <= self.children[p as usize].len(),
            "child index out of range: {index} (child count {})",
            self.children[p as usize].len()
        );
        assert!(
            !self.is_ancestor_or_self(c, p),
            "cannot attach a view beneath itself"
        );
        self.children[p as usize].insert(index, c);
        self.parent[c as usize] = p;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty
    /// state. Returns the former parent.
    fn unlink_from_parent(&mut self, idx: u32) -> u32 {
        let p = self.parent[idx as usize];
        let siblings = &mut self.children[p as usize];
        if let Some(pos) = siblings.iter().position(|&c| c == idx) {
            siblings.remove(pos);
        }
        self.parent[idx as usize] = INVALID;
        p
    }
}

impl ViewTree for ViewStore {
    type View = ViewId;

    fn child_count(&self, view: ViewId) -> usize {
        Self::child_count(self, view)
    }

    fn child_at(&self, view: ViewId, index: usize) -> ViewId {
        self.validate(view);
        self.id_at(self.children[view.idx as usize][index])
    }

    fn z_index(&self, view: ViewId) -> i32 {
        Self::z_index(self, view)
    }

    fn render_order(&self, view: ViewId) -> u32 {
        Self::render_order(self, view)
    }

    fn set_render_order(&mut self, view: ViewId, order: u32) {
        self.validate(view);
        self.render_order[view.idx as usize] = order;
    }

    fn quad(&self, view: ViewId) -> Option<Quad> {
        Self::quad(self, view)
    }

    fn insert_child(&mut self, parent: ViewId, index: usize, child: ViewId) {
        Self::insert_child(self, parent, index, child);
    }
}
