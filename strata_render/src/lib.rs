// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Back-to-front render plans for strata scenes.
//!
//! This crate is the consumer side of [`strata_core`]'s render order: it
//! turns the numbered views of a scene into the sequence a painter's
//! algorithm draws.
//!
//! - [`RenderItem`]: one view to paint, with its order and quad.
//! - [`RenderPlan`]: the reachable views of a scene in ascending render order.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;

pub use plan::{RenderItem, RenderPlan};
