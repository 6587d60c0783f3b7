// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout walk: a lazy pre-order traversal assigning rectangles.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use espalier_tree::Node;
use kurbo::{Point, Rect};

/// Errors rejected at the layout call boundary.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The starting size would produce degenerate or negative-area squares.
    #[error("starting size must be finite and positive, got {0}")]
    InvalidSize(f64),
}

/// A node paired with its computed world-space square.
#[derive(Clone, Copy, Debug)]
pub struct Placed<'a> {
    /// The laid-out node.
    pub node: &'a Node,
    /// Its square: `size` wide and tall, at the computed position.
    pub rect: Rect,
}

impl Placed<'_> {
    /// Fill color hint for this node. See [`crate::style::fill_color`].
    #[must_use]
    pub fn fill(&self) -> &'static str {
        crate::style::fill_color(&self.node.category)
    }

    /// Opacity hint for this node. See [`crate::style::opacity`].
    #[must_use]
    pub fn opacity(&self) -> f64 {
        crate::style::opacity(self.node.included)
    }
}

/// Lay out `root` with its top-left corner at `origin` and the given side
/// length, yielding every node in the subtree with its rectangle.
///
/// Nodes come out in pre-order, children left to right in stored order. The
/// iterator is finite (one item per node) and borrows the tree immutably;
/// call [`layout`] again to restart.
///
/// A non-positive or non-finite `size` is rejected up front with
/// [`LayoutError::InvalidSize`] rather than propagating degenerate squares
/// down the tree.
pub fn layout(root: &Node, origin: Point, size: f64) -> Result<Layout<'_>, LayoutError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(LayoutError::InvalidSize(size));
    }
    Ok(Layout {
        stack: alloc::vec![(root, origin, size)],
    })
}

/// Lazy sequence of [`Placed`] pairs. See [`layout`].
#[derive(Clone, Debug)]
pub struct Layout<'a> {
    /// Pending nodes with the origin and side of their square.
    stack: Vec<(&'a Node, Point, f64)>,
}

impl<'a> Iterator for Layout<'a> {
    type Item = Placed<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, origin, size) = self.stack.pop()?;
        let rect = Rect::new(origin.x, origin.y, origin.x + size, origin.y + size);

        let children = node.children();
        if !children.is_empty() {
            let side = size / 2.0;
            let spacing = size / 3.0;
            let step = side + spacing;
            let row_y = origin.y + size + spacing;
            // Children are centered as a row under the parent's midline.
            let first_x = origin.x + size / 2.0 - (children.len() as f64 * step) / 2.0;
            // The `.rev()` means children pop off the stack left to right.
            for (i, child) in children.iter().enumerate().rev() {
                let x = first_x + i as f64 * step;
                self.stack.push((child, Point::new(x, row_y), side));
            }
        }

        Some(Placed { node, rect })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl FusedIterator for Layout<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use espalier_tree::{Category, NodeId};

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    fn two_children() -> Node {
        Node::new(NodeId(1), "root", Category::Root)
            .with_child(Node::new(NodeId(2), "left", Category::Branch))
            .with_child(Node::new(NodeId(3), "right", Category::Branch))
    }

    #[test]
    fn root_gets_starting_rect() {
        let tree = Node::new(NodeId(1), "solo", Category::Root);
        let placed: Vec<_> = layout(&tree, Point::new(300.0, 50.0), 100.0)
            .unwrap()
            .collect();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].rect, Rect::new(300.0, 50.0, 400.0, 150.0));
    }

    #[test]
    fn two_children_row() {
        let tree = two_children();
        let placed: Vec<_> = layout(&tree, Point::new(300.0, 50.0), 100.0)
            .unwrap()
            .collect();

        // Pre-order: root, then children left to right.
        let ids: Vec<i64> = placed.iter().map(|p| p.node.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Child side 100/2, spacing 100/3, row at y + size + spacing.
        let left = placed[1].rect;
        let right = placed[2].rect;
        approx(left.width(), 50.0);
        approx(right.width(), 50.0);
        approx(left.y0, 50.0 + 100.0 + 100.0 / 3.0);
        approx(right.y0, left.y0);

        // Row of two is centered under x + size/2 = 350.
        let step = 50.0 + 100.0 / 3.0;
        approx(left.x0, 350.0 - step);
        approx(right.x0, 350.0);
    }

    #[test]
    fn grandchildren_scale_from_child_side() {
        let tree = Node::new(NodeId(1), "root", Category::Root).with_child(
            Node::new(NodeId(2), "mid", Category::Branch)
                .with_child(Node::new(NodeId(3), "tip", Category::Leaf)),
        );
        let placed: Vec<_> = layout(&tree, Point::new(0.0, 0.0), 100.0)
            .unwrap()
            .collect();

        let mid = placed[1].rect;
        let tip = placed[2].rect;
        approx(mid.width(), 50.0);
        approx(tip.width(), 25.0);
        // The grandchild row hangs off the child's rect, not the root's.
        approx(tip.y0, mid.y0 + 50.0 + 50.0 / 3.0);
    }

    #[test]
    fn deterministic() {
        let tree = two_children();
        let a: Vec<Rect> = layout(&tree, Point::new(300.0, 50.0), 100.0)
            .unwrap()
            .map(|p| p.rect)
            .collect();
        let b: Vec<Rect> = layout(&tree, Point::new(300.0, 50.0), 100.0)
            .unwrap()
            .map(|p| p.rect)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        let tree = two_children();
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let err = layout(&tree, Point::ZERO, bad).err();
            assert!(
                matches!(err, Some(LayoutError::InvalidSize(_))),
                "size {bad} should be rejected"
            );
        }
    }

    #[test]
    fn single_row_centering_is_symmetric() {
        // With 3 children the middle one is centered exactly under the parent.
        let tree = Node::new(NodeId(1), "root", Category::Root)
            .with_child(Node::new(NodeId(2), "a", Category::Branch))
            .with_child(Node::new(NodeId(3), "b", Category::Branch))
            .with_child(Node::new(NodeId(4), "c", Category::Branch));
        let placed: Vec<_> = layout(&tree, Point::new(100.0, 0.0), 60.0)
            .unwrap()
            .collect();
        let mid = placed[2].rect;
        let parent_center = 100.0 + 30.0;
        // Middle child's left edge sits half a step left of siblings' span center.
        let step = 30.0 + 20.0;
        approx(mid.x0, parent_center - 1.5 * step + step);
    }
}
