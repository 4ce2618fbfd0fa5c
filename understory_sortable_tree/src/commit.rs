// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move engine: apply a [`DropIntent`] to a forest.

use alloc::vec::Vec;

use crate::error::Rejected;
use crate::query::subtree_contains;
use crate::types::{DropIntent, TreeKey, TreeNode};
use crate::util::{edit_list, find_path, node_at};

/// Move `active` (with its subtree) to the place named by `intent`.
///
/// The input forest is never modified. The returned forest shares every
/// subtree that is not on the path to the old or the new position with
/// `tree`; only those ancestor chains are rebuilt.
///
/// [`DropIntent::NestUnder`] appends the node after the target's existing
/// children.
///
/// Rejections leave nothing half-done:
/// - [`Rejected::NotFound`] if `active` or the target is absent,
/// - [`Rejected::SameNode`] if the target is `active` itself,
/// - [`Rejected::Cycle`] if the target lies inside `active`'s subtree. This
///   applies to all three intent kinds.
///
/// ```rust
/// use understory_sortable_tree::{DropIntent, TreeNode, commit};
///
/// let tree = vec![TreeNode::leaf('a'), TreeNode::leaf('b')];
///
/// let nested = commit(&tree, 'b', DropIntent::NestUnder('a')).unwrap();
/// assert_eq!(nested, vec![TreeNode::new('a', vec![TreeNode::leaf('b')])]);
///
/// let swapped = commit(&tree, 'b', DropIntent::InsertBefore('a')).unwrap();
/// assert_eq!(swapped, vec![TreeNode::leaf('b'), TreeNode::leaf('a')]);
/// ```
pub fn commit<K: TreeKey>(
    tree: &[TreeNode<K>],
    active: K,
    intent: DropIntent<K>,
) -> Result<Vec<TreeNode<K>>, Rejected<K>> {
    let result = try_commit(tree, active, intent);
    #[cfg(feature = "tracing")]
    match &result {
        Ok(_) => tracing::debug!(
            active = ?active,
            target = ?intent.target(),
            intent = ?intent,
            "committed move"
        ),
        Err(rejected) => tracing::debug!(
            active = ?active,
            target = ?intent.target(),
            reason = rejected.reason(),
            "rejected move"
        ),
    }
    result
}

fn try_commit<K: TreeKey>(
    tree: &[TreeNode<K>],
    active: K,
    intent: DropIntent<K>,
) -> Result<Vec<TreeNode<K>>, Rejected<K>> {
    let target = intent.target();
    let active_path = find_path(tree, &active).ok_or(Rejected::NotFound(active))?;
    if target == active {
        return Err(Rejected::SameNode(active));
    }
    if find_path(tree, &target).is_none() {
        return Err(Rejected::NotFound(target));
    }
    let active_node = node_at(tree, &active_path).expect("path was just resolved");
    if subtree_contains(active_node, target) {
        return Err(Rejected::Cycle { active, target });
    }

    let (&from, from_list) = active_path
        .split_last()
        .expect("paths of found nodes are never empty");
    let (detached, moved) = edit_list(tree, from_list, |list| list.remove(from));

    // Indices shift once the node is gone, so locate the target again.
    let target_path = find_path(&detached, &target).expect("target is outside the moved subtree");
    let (list_path, at) = match intent {
        DropIntent::NestUnder(_) => (&target_path[..], None),
        DropIntent::InsertBefore(_) | DropIntent::InsertAfter(_) => {
            let (&index, parent) = target_path
                .split_last()
                .expect("paths of found nodes are never empty");
            let at = if matches!(intent, DropIntent::InsertAfter(_)) {
                index + 1
            } else {
                index
            };
            (parent, Some(at))
        }
    };
    let (forest, ()) = edit_list(&detached, list_path, |list| match at {
        Some(at) => list.insert(at, moved),
        None => list.push(moved),
    });
    Ok(forest)
}
