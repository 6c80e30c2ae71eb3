// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/exit tracking for pointer targets.
//!
//! Input dispatch wants transitions, not raw hit results: a button needs to
//! hear once that the pointer entered it and once that it left. [`HoverState`]
//! remembers the last hit-test result and turns each new one into a
//! [`HoverChange`].
//!
//! ```
//! use strata_core::hover::HoverState;
//!
//! let mut hover = HoverState::new();
//! let change = hover.update(Some(1));
//! assert_eq!((change.exited, change.entered), (None, Some(1)));
//!
//! let change = hover.update(Some(2));
//! assert_eq!((change.exited, change.entered), (Some(1), Some(2)));
//!
//! assert!(hover.update(Some(2)).is_empty());
//! ```

/// The transition produced by one [`HoverState::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverChange<V> {
    /// The previous target, if the pointer left it.
    pub exited: Option<V>,
    /// The new target, if the pointer entered it.
    pub entered: Option<V>,
}

impl<V> HoverChange<V> {
    /// Returns `true` if the target did not change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exited.is_none() && self.entered.is_none()
    }
}

/// The view currently under the pointer.
#[derive(Clone, Copy, Debug)]
pub struct HoverState<V> {
    current: Option<V>,
}

impl<V: Copy + Eq> Default for HoverState<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy + Eq> HoverState<V> {
    /// Creates a state with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Records the latest hit-test result and returns the transition.
    pub fn update(&mut self, hit: Option<V>) -> HoverChange<V> {
        if hit == self.current {
            return HoverChange {
                exited: None,
                entered: None,
            };
        }
        let exited = core::mem::replace(&mut self.current, hit);
        HoverChange {
            exited,
            entered: hit,
        }
    }

    /// Returns the hovered view, if any.
    #[must_use]
    pub fn current(&self) -> Option<V> {
        self.current
    }

    /// Forgets the hovered view, returning it.
    ///
    /// Use this when the pointer leaves the scene or the hovered view is
    /// destroyed.
    pub fn clear(&mut self) -> Option<V> {
        self.current.take()
    }
}
