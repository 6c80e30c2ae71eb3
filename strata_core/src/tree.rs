// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability set the core needs from a view tree.
//!
//! Layout systems own their nodes however they like. The render-order
//! calculator and the hit tester only need to walk children in document order,
//! read z-indices and quads, and write the computed render order back. Anything
//! that can do that implements [`ViewTree`]; [`ViewStore`](crate::view::ViewStore)
//! is the arena-backed implementation shipped with this crate.
//!
//! # Preconditions
//!
//! The child relation must form a forest. Implementations are not required to
//! detect cycles; traversing a cyclic tree does not terminate.

use crate::quad::Quad;

/// Read/write access to a tree of views.
///
/// Views are addressed by a small copyable handle and compared by identity
/// (handle equality), never by value.
pub trait ViewTree {
    /// Handle type identifying a view.
    type View: Copy + Eq;

    /// Returns the number of children of `view`.
    fn child_count(&self, view: Self::View) -> usize;

    /// Returns the child of `view` at `index` in document (insertion) order.
    ///
    /// Callers only pass indices below [`child_count`](Self::child_count).
    fn child_at(&self, view: Self::View, index: usize) -> Self::View;

    /// Returns the sibling-local stacking priority of `view`.
    fn z_index(&self, view: Self::View) -> i32;

    /// Returns the last render order written to `view`.
    fn render_order(&self, view: Self::View) -> u32;

    /// Stores a computed render order on `view`.
    ///
    /// This is an output of the calculator and must not be treated as a
    /// structural change.
    fn set_render_order(&mut self, view: Self::View, order: u32);

    /// Returns the hit quad of `view`, if it has one.
    ///
    /// Views without a quad still take part in ordering but never match a hit
    /// test.
    fn quad(&self, view: Self::View) -> Option<Quad>;

    /// Inserts `child` into `parent`'s child list at `index`, shifting later
    /// children towards the end.
    fn insert_child(&mut self, parent: Self::View, index: usize, child: Self::View);
}

#[cfg(test)]
pub(crate) mod mock;
