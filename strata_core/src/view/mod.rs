// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed view tree.
//!
//! A *view* is a node in the scene's view tree. Each view has:
//!
//! - An identity ([`ViewId`]), a generational handle that becomes stale when
//!   the view is destroyed.
//! - Topology: a parent link and an ordered child list. Child order is
//!   document order, which the render-order pass uses to break z-index ties.
//! - **Properties** set by the layout system:
//!   [`z_index`](ViewStore::set_z_index) and [`quad`](ViewStore::set_quad).
//! - **Render order**, written by the render-order pass through
//!   [`ViewTree`](crate::tree::ViewTree).
//!
//! Views are stored in struct-of-arrays layout and addressed by index, so no
//! view owns or references another directly.
//!
//! # Dirty tracking
//!
//! Mutations mark the matching channel (see [`dirty`](crate::dirty)):
//! insertions, removals, creation, and destruction mark **TOPOLOGY**; z-index
//! changes mark **Z_INDEX**; quad changes mark **QUAD**.
//! [`ViewStore::take_changes`] drains them into [`ViewChanges`].

mod changes;
mod id;
mod store;
mod traverse;

pub use changes::ViewChanges;
pub use id::{INVALID, ViewId};
pub use store::ViewStore;
pub use traverse::Children;
