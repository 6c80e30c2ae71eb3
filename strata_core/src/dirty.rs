// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! [`ViewStore`](crate::view::ViewStore) records mutations per view on
//! independent channels (via [`understory_dirty`]). All channels are
//! local-only: render order is recomputed for the whole reachable tree in one
//! pass, so there is nothing to propagate to descendants.
//!
//! - [`TOPOLOGY`] and [`Z_INDEX`] change render order. Either one being dirty
//!   means the render root must recompute.
//! - [`QUAD`] only changes hit geometry. Hit tests read quads directly, so a
//!   quad change never invalidates order.
//!
//! # Consumption
//!
//! [`ViewStore::take_changes`](crate::view::ViewStore::take_changes) drains
//! every channel and reports the result as
//! [`ViewChanges`](crate::view::ViewChanges).
//! [`Scene::commit`](crate::scene::Scene::commit) does this once per batch of
//! mutations.

use understory_dirty::Channel;

/// Children were inserted or removed, or the view was created or destroyed.
///
/// Marked on the parent whose child list changed (and on the view itself for
/// lifecycle changes).
pub const TOPOLOGY: Channel = Channel::new(0);

/// Z-index changed. Reorders the view among its siblings.
pub const Z_INDEX: Channel = Channel::new(1);

/// Hit quad changed. Does not affect render order.
pub const QUAD: Channel = Channel::new(2);
