// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned hit quads.

use kurbo::{Point, Rect};

/// An axis-aligned rectangle in absolute (scene) coordinates.
///
/// Quads are the only geometry the hit tester understands. Layout code computes
/// them and hands them to the tree; nothing here transforms or clips them.
///
/// Float inputs are assumed to be finite (no NaNs).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    rect: Rect,
}

impl Quad {
    /// Creates a quad from its top-left corner and size.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_rect(Rect::new(x, y, x + width, y + height))
    }

    /// Creates a quad covering `rect`.
    ///
    /// The rectangle is normalized so that `x0 <= x1` and `y0 <= y1`.
    #[inline]
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect: rect.abs() }
    }

    /// Returns the covered rectangle.
    #[inline]
    #[must_use]
    pub fn rect(self) -> Rect {
        self.rect
    }

    /// Returns `true` if `point` lies inside the quad or on its boundary.
    ///
    /// All four edges are inclusive, so two quads that share an edge both
    /// contain the points on it.
    #[inline]
    #[must_use]
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.rect.x0
            && point.x <= self.rect.x1
            && point.y >= self.rect.y0
            && point.y <= self.rect.y1
    }
}

impl From<Rect> for Quad {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}
