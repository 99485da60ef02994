use rebalancing_bst::{Order, Tree};

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts,
/// deletes, and rebalances we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Delete(k) => {
                bst.delete(k);
                set.remove(k);
            }
            Op::Rebalance => bst.rebalance(),
        }
    }
}

fn sorted_unique(xs: &[i8]) -> Vec<i8> {
    let set: BTreeSet<_> = xs.iter().copied().collect();
    set.into_iter().collect()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.validate().is_ok() && tree.in_order().eq(set.iter())
}

#[quickcheck]
fn built_tree_is_sorted_and_unique(xs: Vec<i8>) -> bool {
    let tree = Tree::from_keys(xs.iter().copied());

    tree.in_order().copied().eq(sorted_unique(&xs)) && tree.len() == sorted_unique(&xs).len()
}

#[quickcheck]
fn built_tree_is_balanced(xs: Vec<i32>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    tree.is_balanced()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| tree.find(x).map(|n| n.key()) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        && tree.validate().is_ok()
}

#[quickcheck]
fn insert_present_key_is_idempotent(xs: Vec<i8>, pick: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree = Tree::from_keys(xs.iter().copied());
    let before: Vec<i8> = tree.pre_order().copied().collect();

    !tree.insert(xs[pick % xs.len()]) && tree.pre_order().copied().eq(before)
}

#[quickcheck]
fn delete_missing_key_changes_nothing(xs: Vec<i8>, missing: i8) -> bool {
    let mut tree = Tree::new();
    for x in xs.iter().filter(|x| **x != missing) {
        tree.insert(*x);
    }
    let before: Vec<i8> = tree.level_order().copied().collect();

    !tree.delete(&missing) && tree.level_order().copied().eq(before)
}

#[quickcheck]
fn rebalance_keeps_keys_and_balances(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let before: Vec<i8> = tree.in_order().copied().collect();

    tree.rebalance();
    let once: Vec<i8> = tree.level_order().copied().collect();
    tree.rebalance();

    tree.is_balanced()
        && tree.in_order().copied().eq(before)
        && tree.level_order().copied().eq(once)
}

#[quickcheck]
fn every_order_visits_every_key(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let expected = sorted_unique(&xs);

    [Order::Level, Order::Pre, Order::In, Order::Post]
        .into_iter()
        .all(|order| {
            let mut seen = Vec::new();
            tree.visit(order, |key| seen.push(*key));
            seen.sort_unstable();
            seen == expected
        })
}

#[quickcheck]
fn height_bounds_depth(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    xs.iter().all(|x| {
        let node = tree.find(x).unwrap();
        let depth = tree.depth(node).unwrap() as isize;
        depth + node.height() <= tree.height()
    })
}
