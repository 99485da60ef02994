//! A Binary Search Tree that is balanced when it's built and whenever the caller asks for it,
//! but not in between. `insert` and `delete` only keep the ordering invariant - the shape is
//! free to drift (e.g. inserting ascending keys grows a chain) until [`Tree::rebalance`]
//! rebuilds it.
//!
//! # Examples
//!
//! ```
//! use rebalancing_bst::Tree;
//!
//! let mut tree = Tree::from_keys([5, 3, 8, 3, 1]);
//!
//! // Duplicates are dropped and the keys come back sorted.
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
//! assert!(tree.is_balanced());
//!
//! // Growing the tree on one side skews it...
//! for key in 9..15 {
//!     tree.insert(key);
//! }
//! assert!(!tree.is_balanced());
//!
//! // ...until we ask for it to be rebuilt.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.len(), 10);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::error::InvariantError;
use crate::node::{Link, Node};
use crate::shape::EMPTY_HEIGHT;
use crate::traversal::{InOrder, LevelOrder, Order, PostOrder, PreOrder, Traverse};

/// A Binary Search Tree over unique keys.
///
/// The tree is perfectly balanced right after [`Tree::from_keys`] and [`Tree::rebalance`].
/// In between, [`Tree::insert`] and [`Tree::delete`] never restructure it, so operations that
/// walk down the tree cost `O(height)` which can degrade to `O(len)`.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // The default drop would recurse once per level which overflows on long chains.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    // Built bottom up from a post-order walk: by the time a node is visited, its cloned
    // children are the top one or two entries of `built` (right on top).
    fn clone(&self) -> Self {
        let mut built: Vec<Box<Node<K>>> = Vec::with_capacity(self.len);
        let mut nodes = PostOrder::new(self.root());
        while let Some(node) = nodes.next_node() {
            let right = if node.right.is_some() {
                built.pop()
            } else {
                None
            };
            let left = if node.left.is_some() {
                built.pop()
            } else {
                None
            };
            built.push(Box::new(Node {
                key: node.key.clone(),
                left,
                right,
            }));
        }

        debug_assert!(built.len() <= 1);
        Self {
            root: built.pop(),
            len: self.len,
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a balanced tree from the given keys. The keys are sorted and duplicates are
    /// dropped first. The middle key (the lower of the two middle keys for an even count) becomes
    /// the root, and each half is built the same way.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let tree = Tree::from_keys([5, 3, 8, 3, 1]);
    /// let root = tree.root().unwrap();
    ///
    /// // Sorted and deduplicated that's [1, 3, 5, 8] so the root is 3.
    /// assert_eq!(root.key(), &3);
    /// assert_eq!(root.left().map(|n| *n.key()), Some(1));
    /// assert_eq!(root.right().map(|n| *n.key()), Some(5));
    /// ```
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        let tree = Self::from_sorted(keys);
        debug!(len = tree.len, height = tree.height(), "built tree");
        tree
    }

    /// Builds a balanced tree from keys that are already strictly ascending.
    fn from_sorted(keys: Vec<K>) -> Self {
        let len = keys.len();
        let root = build(&mut keys.into_iter(), len);
        Self { root, len }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Adds `key` as a new leaf. Returns `false` (and leaves the tree untouched) if the key was
    /// already present. No rebalancing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(1));
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let mut parent = match self.root.as_deref_mut() {
            Some(root) => root,
            None => {
                self.root = Some(Box::new(Node::new(key)));
                self.len += 1;
                return true;
            }
        };

        // `ref mut` only borrows when there is a child to move into, so `parent` is free to use
        // again once the loop breaks.
        let ordering = loop {
            let ordering = key.cmp(&parent.key);
            parent = match ordering {
                Ordering::Less => match parent.left {
                    Some(ref mut next) => &mut **next,
                    None => break ordering,
                },
                Ordering::Greater => match parent.right {
                    Some(ref mut next) => &mut **next,
                    None => break ordering,
                },
                Ordering::Equal => {
                    trace!("insert: key already present");
                    return false;
                }
            };
        };

        let leaf = Some(Box::new(Node::new(key)));
        match ordering {
            Ordering::Less => parent.left = leaf,
            _ => parent.right = leaf,
        }

        if cfg!(debug_assertions) {
            if let Some(left) = parent.left() {
                assert!(left.key < parent.key);
            }
            if let Some(right) = parent.right() {
                assert!(right.key > parent.key);
            }
        }
        self.len += 1;
        true
    }

    /// Removes the node holding `key`. Returns `false` (and leaves the tree untouched) if there
    /// is no such node.
    ///
    /// A node with at most one child is replaced by that child. A node with two children takes
    /// the key of its in-order successor (the smallest key in its right subtree) and the
    /// successor's node is removed from the right subtree instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let mut tree = Tree::from_keys([3, 5, 8]);
    ///
    /// assert!(tree.delete(&5));
    /// assert!(!tree.delete(&5));
    ///
    /// // 8 was the smallest key to the right of 5, so it took its place.
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(8));
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [3, 8]);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let slot = locate(&mut self.root, key);
        let Some(mut node) = slot.take() else {
            trace!("delete: key not found");
            return false;
        };

        *slot = match (node.left.take(), node.right.take()) {
            (None, right) => right,
            (left, None) => left,
            (left, mut right) => {
                // Both children are present here, so the right subtree has a minimum.
                if let Some(successor) = take_min(&mut right) {
                    node.key = successor;
                }
                node.left = left;
                node.right = right;
                Some(node)
            }
        };
        self.len -= 1;
        true
    }

    /// Finds the node holding `key`, walking down from the root. If no node has the key, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let tree = Tree::from_keys([1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&2).map(|n| *n.key()), Some(2));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => {
                    trace!("find: hit");
                    return Some(node);
                }
            };
        }
        trace!("find: miss");
        None
    }

    /// Whether a node holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Number of edges between the root and `node`.
    ///
    /// Nodes don't know their parents, so this walks down from the root comparing against
    /// `node`'s key. It returns `None` if that walk doesn't end at a node with an equal key -
    /// for instance when `node` belongs to a different tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let tree = Tree::from_keys(1..=7);
    /// let leaf = tree.find(&5).unwrap();
    ///
    /// assert_eq!(tree.depth(tree.root().unwrap()), Some(0));
    /// assert_eq!(tree.depth(leaf), Some(2));
    ///
    /// let other = Tree::from_keys([42]);
    /// assert_eq!(tree.depth(other.root().unwrap()), None);
    /// ```
    pub fn depth(&self, node: &Node<K>) -> Option<usize>
    where
        K: Ord,
    {
        let mut current = self.root();
        let mut depth = 0;
        while let Some(n) = current {
            current = match node.key.cmp(&n.key) {
                Ordering::Less => n.left(),
                Ordering::Greater => n.right(),
                Ordering::Equal => return Some(depth),
            };
            depth += 1;
        }
        None
    }

    /// Number of edges on the longest path from the root down to a leaf. A single node has a
    /// height of 0 and the empty tree has a height of -1.
    pub fn height(&self) -> isize {
        self.root().map_or(EMPTY_HEIGHT, Node::height)
    }

    /// Whether every node's left and right subtrees differ in height by at most one. The empty
    /// tree is balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let mut tree = Tree::from_keys(1..=7);
    /// assert!(tree.is_balanced());
    ///
    /// tree.insert(8);
    /// assert!(tree.is_balanced());
    ///
    /// tree.insert(9);
    /// assert!(!tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.root().map_or(true, Node::is_balanced)
    }

    /// Rebuilds the tree into the same minimal-height shape [`Tree::from_keys`] would give for
    /// its current keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..100 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.height(), 99);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 6);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = self.height();
        let keys: Vec<K> = std::mem::take(self).into_iter().collect();
        *self = Self::from_sorted(keys);
        debug!(
            len = self.len,
            height_before,
            height_after = self.height(),
            "rebalanced tree"
        );
    }

    /// Checks the ordering invariant and the cached length by walking every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::Tree;
    ///
    /// let mut tree = Tree::from_keys([4, 2, 6]);
    /// tree.insert(5);
    /// tree.delete(&4);
    ///
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), InvariantError>
    where
        K: Ord,
    {
        let mut found = 0;
        let mut previous: Option<&K> = None;
        for key in self.in_order() {
            if previous.map_or(false, |previous| previous >= key) {
                return Err(InvariantError::OutOfOrder { position: found });
            }
            previous = Some(key);
            found += 1;
        }

        if found != self.len {
            return Err(InvariantError::LengthMismatch {
                expected: self.len,
                found,
            });
        }
        Ok(())
    }

    /// Iterates over the keys breadth first.
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder::new(self.root())
    }

    /// Iterates over the keys in pre-order (node, left, right).
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::new(self.root())
    }

    /// Iterates over the keys in ascending order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(self.root())
    }

    /// Iterates over the keys in post-order (left, right, node).
    pub fn post_order(&self) -> PostOrder<'_, K> {
        PostOrder::new(self.root())
    }

    /// Iterates over the keys in the given `order`.
    pub fn traverse(&self, order: Order) -> Traverse<'_, K> {
        Traverse::new(self.root(), order)
    }

    /// Calls `visitor` with every key in the given `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebalancing_bst::{Order, Tree};
    ///
    /// let tree = Tree::from_keys([3, 5, 8]);
    /// let mut seen = Vec::new();
    /// tree.visit(Order::Level, |key| seen.push(*key));
    ///
    /// assert_eq!(seen, [5, 3, 8]);
    /// ```
    pub fn visit<F>(&self, order: Order, visitor: F)
    where
        F: FnMut(&K),
    {
        self.traverse(order).for_each(visitor);
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<K> IntoIterator for Tree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), self.len)
    }
}

/// Owning iterator over the keys of a [`Tree`] in ascending order. Created by
/// [`Tree::into_iter`].
#[derive(Debug)]
pub struct IntoIter<K> {
    /// Nodes whose left subtree has been detached and walked, waiting to be yielded.
    stack: Vec<Box<Node<K>>>,
    remaining: usize,
}

impl<K> IntoIter<K> {
    fn new(root: Link<K>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<K>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { key, right, .. } = *node;
        self.push_left_spine(right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}

impl<K> Drop for IntoIter<K> {
    // Walking the rest detaches every node one at a time instead of recursing into right chains.
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

/// Builds a balanced subtree out of the next `len` keys of an ascending iterator.
///
/// The left subtree takes `(len - 1) / 2` keys, which is the same as picking
/// `mid = (start + end) / 2` over an index range `[start, end]`. Recursion depth is `O(lg len)`.
fn build<K, I>(keys: &mut I, len: usize) -> Link<K>
where
    I: Iterator<Item = K>,
{
    if len == 0 {
        return None;
    }
    let left_len = (len - 1) / 2;
    let left = build(keys, left_len);
    let key = keys.next()?;
    let right = build(keys, len - 1 - left_len);

    Some(Box::new(Node { key, left, right }))
}

/// Walks down from `link` to the slot that holds `key`, or the empty slot where it would be
/// inserted.
fn locate<'a, K: Ord>(mut link: &'a mut Link<K>, key: &K) -> &'a mut Link<K> {
    while let Some(ordering) = link.as_deref().map(|node| key.cmp(&node.key)) {
        if ordering == Ordering::Equal {
            break;
        }
        // Only borrow mutably on the paths that move `link` forward.
        if let Some(node) = link {
            link = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }
    }
    link
}

/// Detaches the node with the smallest key under `link`, splicing its right subtree into its
/// place, and returns that key. `None` if `link` is empty.
fn take_min<K>(mut link: &mut Link<K>) -> Option<K> {
    while link.as_deref().map_or(false, |node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }

    let min = link.take()?;
    let Node { key, right, .. } = *min;
    *link = right;
    Some(key)
}
