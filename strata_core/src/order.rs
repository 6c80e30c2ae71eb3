// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-order calculation.
//!
//! Render order is a depth-first, z-stratified numbering of every view
//! reachable from a root. For a view with children `C1..Ck`:
//!
//! 1. The children are sorted by z-index with a stable sort, so equal z-indices
//!    keep document order.
//! 2. Children with a negative z-index (and their whole subtrees) are numbered
//!    first.
//! 3. The view itself is numbered next.
//! 4. The remaining children (z-index `>= 0`) and their subtrees follow.
//!
//! A single counter starting at `1` is bumped once per view, so after a pass the
//! orders cover exactly `1..=N` for `N` reachable views. Each subtree occupies a
//! contiguous range, which is what makes sibling z-index compose correctly
//! across nesting levels: ascending order is a back-to-front paint order, and
//! the highest order among overlapping views is the one on top.
//!
//! The root's own z-index is never consulted since it has no siblings.

use alloc::vec::Vec;

use crate::tree::ViewTree;

/// Reusable state for render-order passes.
///
/// Holding on to an `OrderPass` between frames keeps the per-level sort buffer
/// allocated, so steady-state recomputation does not allocate.
#[derive(Clone, Debug)]
pub struct OrderPass<V> {
    scratch: Vec<(i32, V)>,
}

impl<V> Default for OrderPass<V> {
    fn default() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }
}

impl<V: Copy + Eq> OrderPass<V> {
    /// Creates a pass with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns render orders to every view reachable from `root`.
    ///
    /// Returns the number of views that were numbered, which is also the
    /// highest order assigned. Views that are not reachable are left untouched.
    pub fn run<T>(&mut self, tree: &mut T, root: V) -> u32
    where
        T: ViewTree<View = V>,
    {
        self.scratch.clear();
        let mut counter = 0;
        visit(tree, root, &mut counter, &mut self.scratch);
        counter
    }
}

/// Assigns render orders to every view reachable from `root` using a fresh
/// [`OrderPass`].
///
/// Returns the number of views numbered.
pub fn assign_render_order<T: ViewTree>(tree: &mut T, root: T::View) -> u32 {
    OrderPass::new().run(tree, root)
}

/// Numbers `view` and its subtree.
///
/// Each level pushes its sorted children onto `scratch` and truncates back on
/// exit, so deeper levels only ever append beyond `end`.
fn visit<T: ViewTree>(
    tree: &mut T,
    view: T::View,
    counter: &mut u32,
    scratch: &mut Vec<(i32, T::View)>,
) {
    let start = scratch.len();
    for index in 0..tree.child_count(view) {
        let child = tree.child_at(view, index);
        scratch.push((tree.z_index(child), child));
    }
    let end = scratch.len();

    // `sort_by_key` is stable: equal z-indices keep document order.
    scratch[start..end].sort_by_key(|&(z_index, _)| z_index);
    let split = start + scratch[start..end].partition_point(|&(z_index, _)| z_index < 0);

    for i in start..split {
        let child = scratch[i].1;
        visit(tree, child, counter, scratch);
    }

    *counter += 1;
    tree.set_render_order(view, *counter);

    for i in split..end {
        let child = scratch[i].1;
        visit(tree, child, counter, scratch);
    }

    scratch.truncate(start);
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::tree::mock::MockTree;

    /// Builds
    ///
    /// ```text
    ///       0
    ///    1     2
    ///   3 4
    /// ```
    ///
    /// with the given z-indices.
    fn five_view_tree(z_indices: [i32; 5]) -> (MockTree, Vec<usize>) {
        let mut tree = MockTree::new();
        let v = tree.views(&z_indices);
        tree.push_child(v[0], v[1]);
        tree.push_child(v[0], v[2]);
        tree.push_child(v[1], v[3]);
        tree.push_child(v[1], v[4]);
        (tree, v)
    }

    #[test]
    fn basic_depth_first_order() {
        let (mut tree, v) = five_view_tree([0; 5]);
        assert_eq!(assign_render_order(&mut tree, v[0]), 5);
        assert_eq!(tree.orders(), vec![1, 2, 5, 3, 4]);

        let extra = tree.views(&[0])[0];
        tree.insert_child(v[3], 0, extra);
        assert_eq!(assign_render_order(&mut tree, v[0]), 6);
        assert_eq!(tree.orders(), vec![1, 2, 6, 3, 5, 4]);
    }

    #[test]
    fn positive_z_index_moves_subtree_after_siblings() {
        let (mut tree, v) = five_view_tree([0, 0, 0, 1, 0]);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), vec![1, 2, 5, 4, 3]);

        // The subtree stays contiguous: v[2] still follows all of v[1].
        tree.set_z_index(v[4], 10);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.order(v[3]), 3);
        assert_eq!(tree.order(v[4]), 4);
        assert_eq!(tree.order(v[2]), 5);

        tree.set_z_index(v[1], 1);
        tree.set_z_index(v[3], 0);
        tree.set_z_index(v[4], 0);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn nested_z_index_is_sibling_local() {
        let (mut tree, v) = five_view_tree([0, 10, 0, 1, 0]);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), vec![1, 3, 2, 5, 4]);
    }

    #[test]
    fn negative_z_index_orders_subtree_before_parent() {
        let (mut tree, v) = five_view_tree([0, -1, 0, 0, 0]);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), vec![4, 1, 5, 2, 3]);
    }

    #[test]
    fn many_z_index_values() {
        let mut tree = MockTree::new();
        let v = tree.views(&[10, 5, -2, 1, 1000, 7]);
        for &child in &v[1..] {
            tree.push_child(v[0], child);
        }
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), vec![2, 4, 1, 3, 6, 5]);
    }

    #[test]
    fn equal_z_index_keeps_document_order() {
        let (mut tree, v) = five_view_tree([0, 5, 5, 0, 0]);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), vec![1, 2, 5, 3, 4]);
    }

    #[test]
    fn root_z_index_is_ignored() {
        let (mut tree, v) = five_view_tree([-7, 0, 0, 0, 0]);
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.order(v[0]), 1, "root has no siblings to compare with");
    }

    #[test]
    fn leaf_root_gets_order_one() {
        let mut tree = MockTree::new();
        let v = tree.views(&[3]);
        assert_eq!(assign_render_order(&mut tree, v[0]), 1);
        assert_eq!(tree.order(v[0]), 1);
    }

    #[test]
    fn reused_pass_matches_fresh_pass() {
        let (mut tree, v) = five_view_tree([0, -1, 3, 2, -4]);
        let mut pass = OrderPass::new();
        pass.run(&mut tree, v[0]);
        let first = tree.orders();
        pass.run(&mut tree, v[0]);
        assert_eq!(tree.orders(), first, "second run must be identical");
        assign_render_order(&mut tree, v[0]);
        assert_eq!(tree.orders(), first);
    }

    // -- Generated trees --------------------------------------------------

    struct XorShift(u32);

    impl XorShift {
        fn next(&mut self) -> u32 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            self.0 = x;
            x
        }

        fn below(&mut self, n: usize) -> usize {
            self.next() as usize % n
        }
    }

    /// Random tree of `n` views rooted at view 0, with parents and z-indices
    /// in `-3..=3`.
    fn random_tree(seed: u32, n: usize) -> (MockTree, Vec<Option<usize>>) {
        let mut rng = XorShift(seed);
        let mut tree = MockTree::new();
        let mut parents = vec![None];
        let mut child_counts = vec![0_usize];
        tree.views(&[0]);
        for i in 1..n {
            let z = i32::try_from(rng.below(7)).unwrap() - 3;
            tree.views(&[z]);
            let parent = rng.below(i);
            let index = rng.below(child_counts[parent] + 1);
            tree.insert_child(parent, index, i);
            child_counts[parent] += 1;
            child_counts.push(0);
            parents.push(Some(parent));
        }
        (tree, parents)
    }

    fn subtree_of(parents: &[Option<usize>], root: usize) -> Vec<usize> {
        (0..parents.len())
            .filter(|&v| {
                let mut cur = Some(v);
                while let Some(c) = cur {
                    if c == root {
                        return true;
                    }
                    cur = parents[c];
                }
                false
            })
            .collect()
    }

    #[test]
    fn orders_are_a_permutation() {
        for seed in 1..40 {
            let n = 1 + (seed as usize * 7) % 60;
            let (mut tree, _) = random_tree(seed, n);
            let count = assign_render_order(&mut tree, 0);
            assert_eq!(count as usize, n);
            let mut orders = tree.orders();
            orders.sort_unstable();
            let expected: Vec<u32> = (1..=u32::try_from(n).unwrap()).collect();
            assert_eq!(orders, expected, "seed {seed}: orders must be exactly 1..=N");
        }
    }

    #[test]
    fn subtrees_are_contiguous_and_stratified() {
        for seed in 1..40 {
            let (mut tree, parents) = random_tree(seed, 48);
            assign_render_order(&mut tree, 0);
            for view in 0..parents.len() {
                let members = subtree_of(&parents, view);
                let orders: Vec<u32> = members.iter().map(|&m| tree.order(m)).collect();
                let lo = *orders.iter().min().unwrap();
                let hi = *orders.iter().max().unwrap();
                assert_eq!(
                    (hi - lo) as usize + 1,
                    members.len(),
                    "seed {seed}: subtree of {view} must be contiguous"
                );

                for child in (0..parents.len()).filter(|&c| parents[c] == Some(view)) {
                    for m in subtree_of(&parents, child) {
                        if tree.z_index_of(child) < 0 {
                            assert!(
                                tree.order(m) < tree.order(view),
                                "seed {seed}: negative subtree precedes parent"
                            );
                        } else {
                            assert!(
                                tree.order(m) > tree.order(view),
                                "seed {seed}: non-negative subtree follows parent"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn higher_z_sibling_paints_later() {
        for seed in 1..40 {
            let (mut tree, parents) = random_tree(seed, 40);
            assign_render_order(&mut tree, 0);
            for a in 1..parents.len() {
                for b in 1..parents.len() {
                    if a == b || parents[a] != parents[b] {
                        continue;
                    }
                    let (za, zb) = (tree.z_index_of(a), tree.z_index_of(b));
                    if za < zb {
                        assert!(tree.order(a) < tree.order(b), "seed {seed}");
                    }
                }
            }
        }
    }

    #[test]
    fn recompute_is_idempotent() {
        let (mut tree, _) = random_tree(99, 50);
        assign_render_order(&mut tree, 0);
        let first = tree.orders();
        assign_render_order(&mut tree, 0);
        assert_eq!(tree.orders(), first);
    }

    impl MockTree {
        fn z_index_of(&self, view: usize) -> i32 {
            ViewTree::z_index(self, view)
        }
    }
}
