// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child iteration.

use super::id::ViewId;
use super::store::ViewStore;

/// An iterator over the direct children of a view, in document order.
///
/// Created by [`ViewStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a ViewStore,
    slots: core::slice::Iter<'a, u32>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a ViewStore, slots: &'a [u32]) -> Self {
        Self {
            store,
            slots: slots.iter(),
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<ViewId> {
        let idx = *self.slots.next()?;
        Some(self.store.id_at(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<ViewId> {
        let idx = *self.slots.next_back()?;
        Some(self.store.id_at(idx))
    }
}

impl ExactSizeIterator for Children<'_> {}
