// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for flatten, build, projection, and moves.
//!
//! 1. `build(flatten(t, all))` reproduces `t`
//! 2. Depths never jump by more than one level and match parent depths
//! 3. Indices are dense and parent references point backwards
//! 4. Projected depth stays within its bounds
//! 5. Moves into a node's own subtree are rejected and leave the input alone
//! 6. A projected, classified, and applied drop lands at the previewed depth and parent

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::sample::Index;
use understory_sortable_tree::{
    DropIntent, ExpandAll, FlatNode, Rejected, TreeNode, apply, build, classify, commit,
    descendants, find, flatten, project, remove_descendants_of,
};

// ── Strategies ──────────────────────────────────────────────────────────

/// A forest of up to `max` nodes with ids `0..n`.
///
/// Node `i` picks a parent among the nodes before it, or the top level, so
/// the shape covers flat lists, deep chains, and everything between.
fn forest_strategy(max: usize) -> impl Strategy<Value = Vec<TreeNode<u32>>> {
    prop::collection::vec(any::<Index>(), 0..max).prop_map(|choices| {
        // `None` = top level.
        let parents: Vec<Option<usize>> = choices
            .iter()
            .enumerate()
            .map(|(i, choice)| choice.index(i + 1).checked_sub(1))
            .collect();
        let roots: Vec<usize> = (0..parents.len()).filter(|&i| parents[i].is_none()).collect();
        roots.into_iter().map(|i| assemble(i, &parents)).collect()
    })
}

fn assemble(id: usize, parents: &[Option<usize>]) -> TreeNode<u32> {
    let children = (0..parents.len())
        .filter(|&i| parents[i] == Some(id))
        .map(|i| assemble(i, parents))
        .collect();
    TreeNode::new(id as u32, children)
}

fn ids(rows: &[FlatNode<u32>]) -> Vec<u32> {
    rows.iter().map(|r| r.id).collect()
}

fn node_count(forest: &[TreeNode<u32>]) -> usize {
    forest.iter().map(|n| 1 + descendants(n).len()).sum()
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn build_inverts_flatten(forest in forest_strategy(40)) {
        let rows = flatten(&forest, &ExpandAll);
        prop_assert_eq!(rows.len(), node_count(&forest));
        prop_assert_eq!(build(&rows), forest);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2–3. Depth and index invariants, under any expansion
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flat_rows_are_well_formed(
        forest in forest_strategy(40),
        open in prop::collection::btree_set(0u32..40, 0..40),
    ) {
        let rows = flatten(&forest, &open);
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.index, i, "indices are dense");
            match row.parent {
                None => prop_assert_eq!(row.depth, 0),
                Some(parent) => {
                    prop_assert!(parent.index < i, "parents precede children");
                    prop_assert_eq!(rows[parent.index].id, parent.id);
                    prop_assert_eq!(parent.depth + 1, row.depth);
                    prop_assert!(open.contains(&parent.id), "only expanded nodes show children");
                }
            }
            if i == 0 {
                prop_assert_eq!(row.depth, 0);
            } else {
                prop_assert!(row.depth <= rows[i - 1].depth + 1, "depth steps by at most one");
            }
        }
    }

    #[test]
    fn pruned_rows_stay_dense(forest in forest_strategy(40), pick in any::<Index>()) {
        let rows = flatten(&forest, &ExpandAll);
        prop_assume!(!rows.is_empty());
        let active = rows[pick.index(rows.len())].id;
        let pruned = remove_descendants_of(&rows, &[active]);

        let hidden = descendants(find(&forest, active).unwrap());
        prop_assert_eq!(pruned.len(), rows.len() - hidden.len());
        for (i, row) in pruned.iter().enumerate() {
            prop_assert_eq!(row.index, i);
            prop_assert!(!hidden.contains(&row.id));
            if let Some(parent) = row.parent {
                prop_assert_eq!(pruned[parent.index].id, parent.id);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Projection clamp
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn projection_is_clamped(
        forest in forest_strategy(30),
        a in any::<Index>(),
        b in any::<Index>(),
        offset in -500.0f64..500.0,
    ) {
        let rows = flatten(&forest, &ExpandAll);
        prop_assume!(!rows.is_empty());
        let active = rows[a.index(rows.len())].id;
        let rows = remove_descendants_of(&rows, &[active]);
        let over = rows[b.index(rows.len())].id;

        let p = project(&rows, active, over, offset, 50.0).unwrap();
        prop_assert!(p.min_depth <= p.max_depth);
        prop_assert!(p.min_depth <= p.depth && p.depth <= p.max_depth);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Cycle guard
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moves_into_own_subtree_are_rejected(
        forest in forest_strategy(30),
        a in any::<Index>(),
        b in any::<Index>(),
        kind in 0u8..3,
    ) {
        let rows = flatten(&forest, &ExpandAll);
        prop_assume!(!rows.is_empty());
        let active = rows[a.index(rows.len())].id;
        let inside = descendants(find(&forest, active).unwrap());
        prop_assume!(!inside.is_empty());
        let target = inside[b.index(inside.len())];
        let intent = match kind {
            0 => DropIntent::InsertBefore(target),
            1 => DropIntent::InsertAfter(target),
            _ => DropIntent::NestUnder(target),
        };

        let before = forest.clone();
        prop_assert_eq!(
            commit(&forest, active, intent),
            Err(Rejected::Cycle { active, target })
        );
        prop_assert_eq!(forest, before);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Drops land where they were previewed
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn applied_drop_matches_preview(
        forest in forest_strategy(30),
        a in any::<Index>(),
        b in any::<Index>(),
        offset in -300.0f64..300.0,
    ) {
        let full = flatten(&forest, &ExpandAll);
        prop_assume!(!full.is_empty());
        let active = full[a.index(full.len())].id;
        let rows = remove_descendants_of(&full, &[active]);
        prop_assume!(rows.len() >= 2);
        let to = b.index(rows.len());
        let over = rows[to].id;

        let p = project(&rows, active, over, offset, 50.0).unwrap();
        let plan = classify(&rows, active, over, p.depth).unwrap();
        let outcome = apply(&forest, &ExpandAll, active, &plan).unwrap();

        prop_assert_eq!(outcome.change.depth.after, p.depth);
        prop_assert_eq!(outcome.change.parent.after, p.parent);
        prop_assert_eq!(node_count(&outcome.tree), node_count(&forest));

        if let DropIntent::NestUnder(parent) = plan.intent {
            // Nesting appends after any existing children.
            let parent = find(&outcome.tree, parent).unwrap();
            prop_assert_eq!(parent.children.last().map(|n| n.id), Some(active));
        } else {
            // The new order, with the moved subtree folded away, is the simulated one.
            let mut expected = ids(&rows);
            let from = expected.iter().position(|&id| id == active).unwrap();
            let moved = expected.remove(from);
            expected.insert(to, moved);
            let after = remove_descendants_of(&outcome.flat, &[active]);
            prop_assert_eq!(ids(&after), expected);
        }

        let unique: BTreeSet<u32> = ids(&outcome.flat).into_iter().collect();
        prop_assert_eq!(unique.len(), outcome.flat.len());
    }
}
