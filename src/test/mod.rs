
mod quicktests {
    use std::collections::BTreeSet;

    use super::quick::Op;
    use crate::Tree;

    /// Applies a set of operations to a tree and a `BTreeSet`, checking after every single
    /// operation that the tree is still a valid BST holding the same keys as the set.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut Tree<K>, set: &mut BTreeSet<K>) -> bool
    where
        K: Ord + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    if bst.insert(k.clone()) != set.insert(k.clone()) {
                        return false;
                    }
                }
                Op::Delete(k) => {
                    if bst.delete(k) != set.remove(k) {
                        return false;
                    }
                }
                Op::Rebalance => {
                    bst.rebalance();
                    if !bst.is_balanced() {
                        return false;
                    }
                }
            }

            if bst.validate().is_err() || !bst.in_order().eq(set.iter()) {
                return false;
            }
        }

        true
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set)
                && set.iter().all(|key| tree.contains(key))
                && tree.len() == set.len()
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_from_built_tree(xs: Vec<i16>, ops: Vec<Op<i16>>) -> bool {
            let mut tree = Tree::from_keys(xs.iter().copied());
            let mut set: BTreeSet<_> = xs.into_iter().collect();

            tree.is_balanced() && do_ops(&ops, &mut tree, &mut set)
        }
    }

    quickcheck::quickcheck! {
        fn depth_is_path_length(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            // A node's depth is its parent's depth plus one.
            let mut stack: Vec<_> = tree.root().map(|n| (n, 0)).into_iter().collect();
            while let Some((node, depth)) = stack.pop() {
                if tree.depth(node) != Some(depth) {
                    return false;
                }
                stack.extend(node.left().map(|n| (n, depth + 1)));
                stack.extend(node.right().map(|n| (n, depth + 1)));
            }
            true
        }
    }
}
