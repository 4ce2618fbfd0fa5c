// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed moves and their before/after diff.

use alloc::vec::Vec;

use crate::commit::commit;
use crate::error::Rejected;
use crate::expansion::{ExpandAlso, Expansion};
use crate::flatten::flatten;
use crate::types::{DropIntent, DropPlan, FlatNode, TreeKey, TreeNode};
use crate::util::find_path;

/// A value before and after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Change<T> {
    /// Value in the input forest.
    pub before: T,
    /// Value in the output forest.
    pub after: T,
}

impl<T: PartialEq> Change<T> {
    /// Returns `true` if the value differs.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.before != self.after
    }
}

/// Where the moved node sat before and after the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveChange<K> {
    /// Nesting depth.
    pub depth: Change<usize>,
    /// Position among siblings.
    pub sibling_index: Change<usize>,
    /// Parent identifier; `None` at the top level.
    pub parent: Change<Option<K>>,
}

/// Result of committing a drop.
///
/// Enough for an optimistic local apply: the new forest, its re-derived flat
/// sequence, and a structured diff for reconciling with a remote copy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome<K> {
    /// The new forest.
    pub tree: Vec<TreeNode<K>>,
    /// `tree` flattened with the caller's expansion plus [`Self::expand`].
    pub flat: Vec<FlatNode<K>>,
    /// The intent that was applied.
    pub intent: DropIntent<K>,
    /// Location diff of the moved node.
    pub change: MoveChange<K>,
    /// Node the caller should add to its expanded set, carried over from the plan.
    pub expand: Option<K>,
}

/// Commit `plan` and re-derive everything a renderer needs.
///
/// On top of [`commit`](crate::commit), this re-flattens the result with
/// `expanded` plus the plan's expand instruction, so the moved node is visible
/// in [`MoveOutcome::flat`] even before the caller updates its own expansion
/// state.
pub fn apply<K, E>(
    tree: &[TreeNode<K>],
    expanded: &E,
    active: K,
    plan: &DropPlan<K>,
) -> Result<MoveOutcome<K>, Rejected<K>>
where
    K: TreeKey,
    E: Expansion<K> + ?Sized,
{
    let before = location(tree, active).ok_or(Rejected::NotFound(active))?;
    let new_tree = commit(tree, active, plan.intent)?;
    let after = location(&new_tree, active).expect("a committed node stays in the forest");
    let flat = flatten(&new_tree, &ExpandAlso::new(expanded, plan.expand));

    Ok(MoveOutcome {
        tree: new_tree,
        flat,
        intent: plan.intent,
        change: MoveChange {
            depth: Change {
                before: before.depth,
                after: after.depth,
            },
            sibling_index: Change {
                before: before.sibling_index,
                after: after.sibling_index,
            },
            parent: Change {
                before: before.parent,
                after: after.parent,
            },
        },
        expand: plan.expand,
    })
}

struct Location<K> {
    depth: usize,
    sibling_index: usize,
    parent: Option<K>,
}

fn location<K: TreeKey>(forest: &[TreeNode<K>], id: K) -> Option<Location<K>> {
    let path = find_path(forest, &id)?;
    let (&sibling_index, parents) = path.split_last()?;
    let mut parent = None;
    let mut level = forest;
    for &i in parents {
        parent = Some(level[i].id);
        level = &level[i].children[..];
    }
    Some(Location {
        depth: parents.len(),
        sibling_index,
        parent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::ExpandAll;
    use alloc::collections::BTreeSet;
    use alloc::vec;

    #[test]
    fn diff_reports_reparenting() {
        let tree = vec![TreeNode::leaf('a'), TreeNode::leaf('b')];
        let plan = DropPlan {
            intent: DropIntent::NestUnder('a'),
            expand: Some('a'),
        };
        let out = apply(&tree, &BTreeSet::<char>::new(), 'b', &plan).unwrap();

        assert_eq!(out.tree, vec![TreeNode::new('a', vec![TreeNode::leaf('b')])]);
        assert_eq!(out.intent, DropIntent::NestUnder('a'));
        assert_eq!(out.change.depth, Change { before: 0, after: 1 });
        assert_eq!(out.change.sibling_index, Change { before: 1, after: 0 });
        assert_eq!(
            out.change.parent,
            Change {
                before: None,
                after: Some('a'),
            }
        );
        assert!(out.change.parent.is_changed());
        assert_eq!(out.expand, Some('a'));
        // The expand instruction is honoured in the re-flattened rows.
        let ids: Vec<char> = out.flat.iter().map(|r| r.id).collect();
        assert_eq!(ids, ['a', 'b']);
        assert_eq!(out.flat[1].depth, 1);
    }

    #[test]
    fn reorder_among_siblings_keeps_parent() {
        let tree = vec![TreeNode::new(
            'p',
            vec![TreeNode::leaf('a'), TreeNode::leaf('b'), TreeNode::leaf('c')],
        )];
        let plan = DropPlan {
            intent: DropIntent::InsertBefore('a'),
            expand: None,
        };
        let out = apply(&tree, &ExpandAll, 'c', &plan).unwrap();
        assert!(!out.change.depth.is_changed());
        assert!(!out.change.parent.is_changed());
        assert_eq!(out.change.sibling_index, Change { before: 2, after: 0 });
        let ids: Vec<char> = out.flat.iter().map(|r| r.id).collect();
        assert_eq!(ids, ['p', 'c', 'a', 'b']);
    }

    #[test]
    fn rejections_pass_through() {
        let tree = vec![TreeNode::new('a', vec![TreeNode::leaf('b')])];
        let plan = DropPlan {
            intent: DropIntent::NestUnder('b'),
            expand: None,
        };
        assert_eq!(
            apply(&tree, &ExpandAll, 'a', &plan),
            Err(Rejected::Cycle {
                active: 'a',
                target: 'b',
            })
        );
        assert_eq!(
            apply(&tree, &ExpandAll, 'z', &plan),
            Err(Rejected::NotFound('z'))
        );
    }
}
