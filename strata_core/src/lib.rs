// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render order and hit testing for retained-mode view trees.
//!
//! `strata_core` numbers the views of a tree in a single back-to-front order
//! and uses that same order to resolve pointer queries. It is `no_std`
//! compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   layout system ──► ViewStore (or any ViewTree)
//!                          │ mutations mark dirty channels
//!                          ▼
//!   Scene::commit() ──► ViewChanges ──► RenderRoot: Dirty?
//!                                            │
//!                                            ▼
//!                               OrderPass ──► render_order 1..=N
//!                                            │
//!                   ┌────────────────────────┴──────────────┐
//!                   ▼                                       ▼
//!        render pass (ascending order)        hit_test(point) ──► HoverState
//! ```
//!
//! **[`quad`]**: axis-aligned hit rectangles.
//!
//! **[`tree`]**: the [`ViewTree`](tree::ViewTree) trait, the only thing the
//! ordering and hit-testing code needs from a tree.
//!
//! **[`order`]**: the depth-first, z-stratified render-order pass.
//!
//! **[`hit`]**: picks the highest-ordered view whose quad contains a point.
//!
//! **[`root`]**: [`RenderRoot`](root::RenderRoot) holds the candidate
//! registry and the Clean/Dirty state, and recomputes only when needed.
//!
//! **[`view`]**: struct-of-arrays view storage with generational handles,
//! implementing `ViewTree`.
//!
//! **[`dirty`]**: per-view change channels via `understory_dirty`.
//!
//! **[`scene`]**: a `ViewStore` and a `RenderRoot` kept in sync.
//!
//! **[`hover`]**: enter/exit transitions from successive hit results.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-view change
//!   events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod dirty;
pub mod hit;
pub mod hover;
pub mod order;
pub mod quad;
pub mod root;
pub mod scene;
pub mod trace;
pub mod tree;
pub mod view;
