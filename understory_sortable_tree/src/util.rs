// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::types::TreeNode;

/// Sibling indices from the forest root down to a node.
pub(crate) type NodePath = SmallVec<[usize; 8]>;

/// Locate `id` with a pre-order walk, returning its index path.
///
/// The walk keeps one cursor per level on an explicit stack, so nesting depth
/// is bounded by memory rather than call frames.
pub(crate) fn find_path<K: PartialEq>(forest: &[TreeNode<K>], id: &K) -> Option<NodePath> {
    let mut stack: SmallVec<[(&[TreeNode<K>], usize); 8]> = SmallVec::new();
    stack.push((forest, 0));
    while let Some(top) = stack.last_mut() {
        let (level, next) = *top;
        if next >= level.len() {
            stack.pop();
            continue;
        }
        top.1 += 1;
        let node = &level[next];
        if node.id == *id {
            return Some(stack.iter().map(|&(_, n)| n - 1).collect());
        }
        if node.has_children() {
            stack.push((&node.children[..], 0));
        }
    }
    None
}

/// Resolve a path to a node reference.
pub(crate) fn node_at<'a, K>(forest: &'a [TreeNode<K>], path: &[usize]) -> Option<&'a TreeNode<K>> {
    let (&last, parents) = path.split_last()?;
    let mut level = forest;
    for &i in parents {
        level = &level.get(i)?.children[..];
    }
    level.get(last)
}

/// Apply `edit` to one sibling list and rebuild only the ancestors above it.
///
/// `list_path` names the list: empty for the top level, otherwise the path of
/// the node whose children are edited. Siblings along the way are cloned
/// shallowly, so every subtree off the edited path keeps its original `Arc`.
///
/// # Panics
///
/// Panics if `list_path` does not resolve; callers obtain it from [`find_path`].
pub(crate) fn edit_list<K: Copy, R>(
    forest: &[TreeNode<K>],
    list_path: &[usize],
    edit: impl FnOnce(&mut Vec<TreeNode<K>>) -> R,
) -> (Vec<TreeNode<K>>, R) {
    let mut levels: SmallVec<[&[TreeNode<K>]; 8]> = SmallVec::with_capacity(list_path.len() + 1);
    levels.push(forest);
    for &i in list_path {
        let level = levels[levels.len() - 1];
        levels.push(&level[i].children[..]);
    }

    let mut current = levels[levels.len() - 1].to_vec();
    let result = edit(&mut current);

    for (depth, &i) in list_path.iter().enumerate().rev() {
        let mut level = levels[depth].to_vec();
        level[i] = TreeNode {
            id: level[i].id,
            children: Arc::from(current),
        };
        current = level;
    }
    (current, result)
}

/// `Math.round`-style rounding (half toward positive infinity) without `std`.
///
/// Non-finite input rounds to `0`.
pub(crate) fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let shifted = value + 0.5;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Depth deltas are tiny; saturation on absurd offsets is acceptable."
    )]
    let truncated = shifted as i64;
    #[allow(
        clippy::cast_precision_loss,
        reason = "Only compared against the value it was derived from."
    )]
    let back = truncated as f64;
    if back > shifted {
        truncated.saturating_sub(1)
    } else {
        truncated
    }
}
