//! The building block of a [`Tree`][crate::Tree].

use std::fmt;

/// A child slot of a [`Node`]. `None` marks the empty pointer at the bottom of a subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A `Node` holds one key and owns up to two child subtrees. It knows nothing about its
/// parent - ancestry is only known by walking down from the root.
///
/// Nodes are only ever handed out by reference from a [`Tree`][crate::Tree] (see
/// [`Tree::find`][crate::Tree::find] and [`Tree::root`][crate::Tree::root]).
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    // Children are shown by key only so formatting never walks the subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> Node<K> {
    /// Construct a new leaf `Node` with the given `key`.
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if there is one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if there is one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of edges on the longest downward path from this node to a leaf. A leaf has a
    /// height of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let tree = Tree::from_keys([1, 2, 3, 4, 5, 6, 7]);
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(root.height(), 2);
    /// assert_eq!(tree.find(&7).unwrap().height(), 0);
    /// ```
    pub fn height(&self) -> isize {
        crate::shape::measure(self).height
    }

    /// Whether every node in the subtree rooted here has left and right subtrees whose heights
    /// differ by at most one.
    pub fn is_balanced(&self) -> bool {
        crate::shape::measure(self).balanced
    }
}
