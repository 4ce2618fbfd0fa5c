// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree → flat sequence.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::expansion::Expansion;
use crate::types::{FlatNode, ParentRef, TreeKey, TreeNode};

struct Frame<'a, K> {
    level: &'a [TreeNode<K>],
    next: usize,
    parent: Option<ParentRef<K>>,
}

/// Flatten a forest into pre-order rows.
///
/// Each node is emitted with its depth, sibling index, and a snapshot of its
/// parent row. A node's children are traversed only when it has children and
/// `expanded` reports it as expanded; otherwise its whole subtree is absent
/// from the output.
///
/// The output is a fresh sequence on every call and depends only on the
/// inputs.
///
/// ```rust
/// use understory_sortable_tree::{ExpandAll, TreeNode, flatten};
///
/// let forest = vec![
///     TreeNode::new("fruit", vec![TreeNode::leaf("apple"), TreeNode::leaf("pear")]),
///     TreeNode::leaf("bread"),
/// ];
/// let rows = flatten(&forest, &ExpandAll);
/// let ids: Vec<_> = rows.iter().map(|r| (r.id, r.depth)).collect();
/// assert_eq!(ids, [("fruit", 0), ("apple", 1), ("pear", 1), ("bread", 0)]);
///
/// // Nothing expanded: only the top level is visible.
/// let rows = flatten(&forest, &[][..]);
/// assert_eq!(rows.len(), 2);
/// assert!(rows[0].collapsed && rows[0].has_children);
/// ```
pub fn flatten<K, E>(roots: &[TreeNode<K>], expanded: &E) -> Vec<FlatNode<K>>
where
    K: TreeKey,
    E: Expansion<K> + ?Sized,
{
    let mut out = Vec::new();
    let mut stack: SmallVec<[Frame<'_, K>; 8]> = SmallVec::new();
    stack.push(Frame {
        level: roots,
        next: 0,
        parent: None,
    });

    while let Some(top) = stack.last_mut() {
        if top.next >= top.level.len() {
            stack.pop();
            continue;
        }
        let sibling_index = top.next;
        top.next += 1;
        let level = top.level;
        let node = &level[sibling_index];
        let parent = top.parent;
        let depth = stack.len() - 1;

        let is_expanded = expanded.is_expanded(&node.id);
        let row = FlatNode {
            id: node.id,
            index: out.len(),
            depth,
            parent,
            sibling_index,
            child_count: node.children.len(),
            has_children: node.has_children(),
            collapsed: !is_expanded,
        };
        out.push(row);

        if row.has_children && is_expanded {
            stack.push(Frame {
                level: &node.children[..],
                next: 0,
                parent: Some(ParentRef {
                    id: row.id,
                    index: row.index,
                    depth: row.depth,
                    child_count: row.child_count,
                }),
            });
        }
    }
    out
}

/// Remove every visible descendant of the listed nodes.
///
/// Used while dragging so that a node's subtree travels with it instead of
/// being offered as a drop position. The listed nodes themselves stay. The
/// result is re-indexed so `index` (and parent-reference indices) stay dense.
pub fn remove_descendants_of<K: TreeKey>(flat: &[FlatNode<K>], ids: &[K]) -> Vec<FlatNode<K>> {
    let mut out: Vec<FlatNode<K>> = Vec::with_capacity(flat.len());
    // Old index → new index, for rewriting parent references.
    let mut remap: Vec<Option<usize>> = Vec::with_capacity(flat.len());
    // Depth of the subtree currently being skipped.
    let mut skip_below: Option<usize> = None;

    for row in flat {
        if let Some(depth) = skip_below {
            if row.depth > depth {
                remap.push(None);
                continue;
            }
            skip_below = None;
        }
        if ids.contains(&row.id) {
            skip_below = Some(row.depth);
        }
        let mut kept = *row;
        kept.index = out.len();
        if let Some(parent) = kept.parent.as_mut() {
            parent.index = remap
                .get(parent.index)
                .copied()
                .flatten()
                .unwrap_or(parent.index);
        }
        remap.push(Some(kept.index));
        out.push(kept);
    }
    out
}
