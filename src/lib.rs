//! This crate exposes a Binary Search Tree (BST) that is rebalanced on demand rather than on
//! every mutation.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is the number of edges on
//! the longest path from the root `Node` down to a leaf `Node`). Self-balancing trees keep the
//! height at `O(lg N)` after every operation. This one doesn't: [`Tree::insert`] and
//! [`Tree::delete`] only preserve the ordering, and the shape is restored to minimal height
//! when the tree is built ([`Tree::from_keys`]) or when the caller asks for it
//! ([`Tree::rebalance`]). [`Tree::is_balanced`] tells you when that might be worth doing.
//!
//! # Examples
//!
//! ```
//! use rebalancing_bst::Tree;
//!
//! let mut tree: Tree<_> = (1..=7).collect();
//! assert_eq!(tree.height(), 2);
//!
//! for key in 8..12 {
//!     tree.insert(key);
//! }
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.height(), 3);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
mod node;
mod shape;
pub mod traversal;
mod tree;

#[cfg(test)]
mod test;

pub use error::InvariantError;
pub use node::Node;
pub use traversal::Order;
pub use tree::{IntoIter, Tree};
