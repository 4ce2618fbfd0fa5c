// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat sequence → tree.

use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};

use crate::types::{FlatNode, TreeKey, TreeNode};

/// Rebuild a forest from flat rows using their parent references.
///
/// Rows are grouped by parent id in one pass; each group becomes the children
/// of its parent, in the order the rows were encountered. Rows without a
/// parent form the returned top level. Only `id` and `parent` are consulted,
/// so rows edited by hand (for example after a flat-level move) are accepted
/// as long as their parent references are consistent.
///
/// `build(&flatten(forest, &ExpandAll))` reproduces `forest`. With a partial
/// expansion it reproduces the forest pruned below collapsed nodes.
///
/// # Panics
///
/// Panics if the rows violate the flat-sequence contract: a duplicate id, a
/// parent reference to an id that is not in `flat`, or parent references that
/// form a cycle. These cannot arise from [`flatten`](crate::flatten) output.
pub fn build<K: TreeKey>(flat: &[FlatNode<K>]) -> Vec<TreeNode<K>> {
    let mut known: HashSet<K> = HashSet::with_capacity(flat.len());
    let mut groups: HashMap<K, Vec<K>> = HashMap::new();
    let mut roots: Vec<K> = Vec::new();

    for row in flat {
        assert!(known.insert(row.id), "duplicate id {:?} in flat sequence", row.id);
        match row.parent {
            Some(parent) => groups.entry(parent.id).or_default().push(row.id),
            None => roots.push(row.id),
        }
    }
    for parent in groups.keys() {
        assert!(
            known.contains(parent),
            "parent reference to {parent:?}, which is not in the flat sequence"
        );
    }

    // Children must exist before their parent can own them, so assemble in
    // post-order using an explicit work stack.
    let mut assembled: HashMap<K, TreeNode<K>> = HashMap::with_capacity(flat.len());
    let mut stack: Vec<(K, bool)> = roots.iter().rev().map(|&id| (id, false)).collect();
    while let Some((id, children_ready)) = stack.pop() {
        if children_ready {
            let children = groups
                .remove(&id)
                .unwrap_or_default()
                .into_iter()
                .map(|child| {
                    assembled
                        .remove(&child)
                        .expect("children are assembled before their parent")
                })
                .collect();
            assembled.insert(id, TreeNode::new(id, children));
        } else {
            stack.push((id, true));
            if let Some(children) = groups.get(&id) {
                stack.extend(children.iter().rev().map(|&child| (child, false)));
            }
        }
    }
    assert!(
        groups.is_empty(),
        "parent references form a cycle unreachable from the top level"
    );

    roots
        .into_iter()
        .map(|id| {
            assembled
                .remove(&id)
                .expect("every top-level row is assembled")
        })
        .collect()
}
