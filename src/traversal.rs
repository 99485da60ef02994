//! Borrowing iterators over the keys of a [`Tree`][crate::Tree].
//!
//! Each traversal is lazy. Collect it to get the visited sequence, or hand each key to a closure
//! (see [`Tree::visit`][crate::Tree::visit]) to use it as a visitor. None of them recurse: they
//! keep their own queue or stack so that skewed trees are walked in constant call-stack space.
//!
//! # Examples
//!
//! ```
//! use rebalancing_bst::{Order, Tree};
//!
//! let tree = Tree::from_keys([3, 5, 8]);
//!
//! assert_eq!(tree.level_order().copied().collect::<Vec<_>>(), [5, 3, 8]);
//! assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [5, 3, 8]);
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [3, 5, 8]);
//! assert_eq!(tree.post_order().copied().collect::<Vec<_>>(), [3, 8, 5]);
//!
//! let mut sum = 0;
//! tree.visit(Order::Post, |key| sum += key);
//! assert_eq!(sum, 16);
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::Node;

/// The order in which a traversal visits nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Breadth first, top level to bottom level, left to right within a level.
    Level,
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree. Yields keys in ascending order.
    In,
    /// Left subtree, then right subtree, then node.
    Post,
}

/// Breadth-first iterator created by [`Tree::level_order`][crate::Tree::level_order].
#[derive(Clone, Debug)]
pub struct LevelOrder<'a, K> {
    queue: VecDeque<&'a Node<K>>,
}

impl<'a, K> LevelOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(&node.key)
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

/// Pre-order iterator created by [`Tree::pre_order`][crate::Tree::pre_order].
#[derive(Clone, Debug)]
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes in first so that the left subtree comes out first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(&node.key)
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// In-order iterator created by [`Tree::in_order`][crate::Tree::in_order]. Keys come out in
/// strictly ascending order.
#[derive(Clone, Debug)]
pub struct InOrder<'a, K> {
    /// Nodes whose left subtree is being (or has been) walked but which haven't been yielded yet.
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.key)
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Post-order iterator created by [`Tree::post_order`][crate::Tree::post_order].
#[derive(Clone, Debug)]
pub struct PostOrder<'a, K> {
    /// Each node is pushed twice: once unexpanded (`false`) and, when popped the first time,
    /// again as expanded (`true`) underneath its children.
    stack: Vec<(&'a Node<K>, bool)>,
}

impl<'a, K> PostOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.map(|n| (n, false)).into_iter().collect(),
        }
    }

    /// Like [`Iterator::next`] but yields the whole node. Used when measuring subtrees.
    pub(crate) fn next_node(&mut self) -> Option<&'a Node<K>> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack.extend(node.right().map(|n| (n, false)));
            self.stack.extend(node.left().map(|n| (n, false)));
        }
        None
    }
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(Node::key)
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}

/// A traversal in an [`Order`] chosen at runtime. Created by
/// [`Tree::traverse`][crate::Tree::traverse].
#[derive(Clone, Debug)]
pub enum Traverse<'a, K> {
    /// See [`LevelOrder`].
    Level(LevelOrder<'a, K>),
    /// See [`PreOrder`].
    Pre(PreOrder<'a, K>),
    /// See [`InOrder`].
    In(InOrder<'a, K>),
    /// See [`PostOrder`].
    Post(PostOrder<'a, K>),
}

impl<'a, K> Traverse<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, order: Order) -> Self {
        match order {
            Order::Level => Self::Level(LevelOrder::new(root)),
            Order::Pre => Self::Pre(PreOrder::new(root)),
            Order::In => Self::In(InOrder::new(root)),
            Order::Post => Self::Post(PostOrder::new(root)),
        }
    }
}

impl<'a, K> Iterator for Traverse<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Level(iter) => iter.next(),
            Self::Pre(iter) => iter.next(),
            Self::In(iter) => iter.next(),
            Self::Post(iter) => iter.next(),
        }
    }
}

impl<K> FusedIterator for Traverse<'_, K> {}
