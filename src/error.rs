//! Errors reported by [`Tree::validate`][crate::Tree::validate].

use thiserror::Error;

/// A broken structural invariant found while walking a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// The in-order walk was not strictly ascending. `position` is the index (in in-order
    /// sequence) of the first key that was not greater than its predecessor.
    #[error("key at in-order position {position} is not greater than the key before it")]
    OutOfOrder {
        /// In-order index of the offending key.
        position: usize,
    },

    /// The tree's cached node count disagrees with the number of reachable nodes.
    #[error("tree reports {expected} nodes but {found} are reachable")]
    LengthMismatch {
        /// The cached count.
        expected: usize,
        /// The number of nodes actually visited.
        found: usize,
    },
}
