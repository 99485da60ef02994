//! Height and balance of a subtree, computed in a single post-order pass.

use crate::node::Node;
use crate::traversal::PostOrder;

/// Height of an absent subtree.
pub(crate) const EMPTY_HEIGHT: isize = -1;

/// What a post-order pass learns about a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Shape {
    /// Edges on the longest downward path from the subtree root.
    pub(crate) height: isize,
    /// Whether every node has child heights differing by at most one.
    pub(crate) balanced: bool,
}

/// Measures the subtree rooted at `root` without recursion.
///
/// Post-order emits a node's left subtree, then its right subtree, then the node itself, so by
/// the time a node is visited its children's heights are the top one or two entries of
/// `heights` (right on top).
pub(crate) fn measure<K>(root: &Node<K>) -> Shape {
    let mut heights: Vec<isize> = Vec::new();
    let mut balanced = true;

    let mut nodes = PostOrder::new(Some(root));
    while let Some(node) = nodes.next_node() {
        let right = if node.right.is_some() {
            heights.pop().unwrap_or(EMPTY_HEIGHT)
        } else {
            EMPTY_HEIGHT
        };
        let left = if node.left.is_some() {
            heights.pop().unwrap_or(EMPTY_HEIGHT)
        } else {
            EMPTY_HEIGHT
        };

        balanced &= left.abs_diff(right) <= 1;
        heights.push(left.max(right) + 1);
    }

    debug_assert_eq!(heights.len(), 1);
    Shape {
        height: heights.pop().unwrap_or(EMPTY_HEIGHT),
        balanced,
    }
}
