// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing against computed render order.
//!
//! Render order is a back-to-front paint order, so among all views whose quad
//! contains a point, the one with the highest order was painted last and is
//! the one visually on top. The same number that drives painting therefore
//! resolves pointer targets.

use kurbo::Point;

use crate::tree::ViewTree;

/// Returns the topmost candidate whose quad contains `point`.
///
/// Candidates are scanned in iteration order; their order does not affect the
/// result except for ties. Views without a quad are skipped. A candidate only
/// replaces the current best if its render order is strictly greater, so among
/// equal orders the first candidate wins.
///
/// The render orders stored in `tree` must be current. This function never
/// recomputes them.
pub fn hit_test<T, I>(tree: &T, candidates: I, point: Point) -> Option<T::View>
where
    T: ViewTree,
    I: IntoIterator<Item = T::View>,
{
    let mut best: Option<(T::View, u32)> = None;
    for view in candidates {
        let Some(quad) = tree.quad(view) else {
            continue;
        };
        if !quad.contains_point(point) {
            continue;
        }
        let order = tree.render_order(view);
        if best.is_none_or(|(_, best_order)| order > best_order) {
            best = Some((view, order));
        }
    }
    best.map(|(view, _)| view)
}
