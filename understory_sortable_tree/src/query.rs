// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only lookups over a forest, plus detaching a node.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::error::Rejected;
use crate::types::{TreeKey, TreeNode};
use crate::util::{edit_list, find_path, node_at};

/// Find the node with the given id anywhere in the forest.
pub fn find<'a, K: TreeKey>(forest: &'a [TreeNode<K>], id: K) -> Option<&'a TreeNode<K>> {
    let path = find_path(forest, &id)?;
    node_at(forest, &path)
}

/// Identifiers of the ancestors of `id`, from the top level down to its parent.
///
/// Returns `None` if `id` is not in the forest and an empty list for top-level
/// nodes.
pub fn ancestors<K: TreeKey>(forest: &[TreeNode<K>], id: K) -> Option<Vec<K>> {
    let path = find_path(forest, &id)?;
    let mut out = Vec::with_capacity(path.len() - 1);
    let mut level = forest;
    for &i in &path[..path.len() - 1] {
        let node = &level[i];
        out.push(node.id);
        level = &node.children[..];
    }
    Some(out)
}

/// Identifiers of every descendant of `node`, in pre-order.
pub fn descendants<K: TreeKey>(node: &TreeNode<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut stack: SmallVec<[&TreeNode<K>; 16]> = node.children.iter().rev().collect();
    while let Some(current) = stack.pop() {
        out.push(current.id);
        stack.extend(current.children.iter().rev());
    }
    out
}

/// Number of nodes below `id` at any depth, or `0` if `id` is absent.
pub fn descendant_count<K: TreeKey>(forest: &[TreeNode<K>], id: K) -> usize {
    let Some(node) = find(forest, id) else {
        return 0;
    };
    let mut count = 0;
    let mut stack: SmallVec<[&TreeNode<K>; 16]> = SmallVec::new();
    stack.push(node);
    while let Some(current) = stack.pop() {
        count += current.children.len();
        stack.extend(current.children.iter());
    }
    count
}

/// Returns `true` if `candidate` lies strictly inside the subtree of `ancestor`.
///
/// The walk uses an explicit work stack over the ancestor's subtree. Returns
/// `false` if `ancestor` is absent.
pub fn is_descendant<K: TreeKey>(forest: &[TreeNode<K>], ancestor: K, candidate: K) -> bool {
    find(forest, ancestor).is_some_and(|node| subtree_contains(node, candidate))
}

pub(crate) fn subtree_contains<K: TreeKey>(node: &TreeNode<K>, candidate: K) -> bool {
    let mut stack: SmallVec<[&TreeNode<K>; 16]> = node.children.iter().collect();
    while let Some(current) = stack.pop() {
        if current.id == candidate {
            return true;
        }
        stack.extend(current.children.iter());
    }
    false
}

/// Detach `id` (with its subtree) from the forest.
///
/// Returns the new forest and the detached node. The input is not modified;
/// subtrees off the path to `id` are shared with it.
pub fn remove<K: TreeKey>(
    forest: &[TreeNode<K>],
    id: K,
) -> Result<(Vec<TreeNode<K>>, TreeNode<K>), Rejected<K>> {
    let path = find_path(forest, &id).ok_or(Rejected::NotFound(id))?;
    let (&index, list_path) = path
        .split_last()
        .expect("paths of found nodes are never empty");
    Ok(edit_list(forest, list_path, |list| list.remove(index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec;

    fn forest() -> Vec<TreeNode<&'static str>> {
        vec![
            TreeNode::new(
                "food",
                vec![
                    TreeNode::new("fruit", vec![TreeNode::leaf("apple"), TreeNode::leaf("pear")]),
                    TreeNode::leaf("bread"),
                ],
            ),
            TreeNode::new("tools", vec![TreeNode::leaf("saw")]),
        ]
    }

    #[test]
    fn lookups() {
        let f = forest();
        assert_eq!(find(&f, "pear").map(|n| n.id), Some("pear"));
        assert!(find(&f, "plum").is_none());
        assert_eq!(ancestors(&f, "apple"), Some(vec!["food", "fruit"]));
        assert_eq!(ancestors(&f, "tools"), Some(vec![]));
        assert_eq!(ancestors(&f, "plum"), None);
        assert_eq!(descendants(&f[0]), ["fruit", "apple", "pear", "bread"]);
        assert_eq!(descendant_count(&f, "food"), 4);
        assert_eq!(descendant_count(&f, "saw"), 0);
        assert_eq!(descendant_count(&f, "plum"), 0);
    }

    #[test]
    fn descendant_checks() {
        let f = forest();
        assert!(is_descendant(&f, "food", "pear"));
        assert!(!is_descendant(&f, "food", "food"));
        assert!(!is_descendant(&f, "fruit", "bread"));
        assert!(!is_descendant(&f, "plum", "pear"));
    }

    #[test]
    fn remove_detaches_subtree() {
        let f = forest();
        let (rest, fruit) = remove(&f, "fruit").expect("fruit exists");
        assert_eq!(fruit.id, "fruit");
        assert_eq!(fruit.children.len(), 2);
        assert_eq!(descendants(&rest[0]), ["bread"]);
        assert!(Arc::ptr_eq(&rest[1].children, &f[1].children));
        assert_eq!(remove(&f, "plum"), Err(Rejected::NotFound("plum")));
    }
}
