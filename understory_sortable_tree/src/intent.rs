// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classify a projected drop into a [`DropIntent`].

use crate::error::Rejected;
use crate::projection::{SimulatedMove, subtree_rows};
use crate::types::{DropIntent, DropPlan, FlatNode, TreeKey};

/// Turn a projected depth into a structural edit.
///
/// Evaluated against the simulated sequence (active moved to over's position)
/// and the rows directly above (`previous`) and below (`next`) the drop
/// position:
///
/// 1. `depth > previous.depth`: [`DropIntent::NestUnder`] `previous`. The node
///    is appended after any existing children. If `previous` is collapsed the
///    plan also asks for it to be expanded.
/// 2. No `previous`, or `depth < next.depth`: [`DropIntent::InsertBefore`] `next`.
/// 3. `depth < previous.depth`: [`DropIntent::InsertAfter`] the nearest row
///    above at exactly `depth`; [`Rejected::UnreachableDepth`] if there is none.
/// 4. Otherwise: [`DropIntent::InsertAfter`] `previous`.
///
/// Anchoring on the simulated neighbours rather than on `over` keeps the
/// result right for both drag directions: dragging up, `over` ends up below
/// the drop position; dragging down, above it.
///
/// `depth` is expected to come from [`project`](crate::project), which keeps it
/// within `[next.depth, previous.depth + 1]`. An unclamped depth below
/// `next.depth` still yields [`DropIntent::InsertBefore`] `next`, so the row
/// lands at `next`'s depth rather than the one requested.
///
/// `active == over` is allowed and is the usual way to indent or outdent a row
/// in place. A sequence holding only the active row yields
/// [`Rejected::SameNode`]. An anchor inside the active row's visible subtree
/// yields [`Rejected::Cycle`].
///
/// ```rust
/// use understory_sortable_tree::{DropIntent, ExpandAll, TreeNode, classify, flatten};
///
/// let forest = vec![TreeNode::leaf('a'), TreeNode::leaf('b')];
/// // Nothing expanded yet.
/// let flat = flatten(&forest, &[][..]);
///
/// // `b` dragged one level right in place nests under `a`, which must open.
/// let plan = classify(&flat, 'b', 'b', 1).unwrap();
/// assert_eq!(plan.intent, DropIntent::NestUnder('a'));
/// assert_eq!(plan.expand, Some('a'));
///
/// let plan = classify(&flat, 'b', 'a', 0).unwrap();
/// assert_eq!(plan.intent, DropIntent::InsertBefore('a'));
///
/// // With everything open there is nothing to expand.
/// let flat = flatten(&forest, &ExpandAll);
/// assert_eq!(classify(&flat, 'b', 'b', 1).unwrap().expand, None);
/// ```
pub fn classify<K: TreeKey>(
    flat: &[FlatNode<K>],
    active: K,
    over: K,
    depth: usize,
) -> Result<DropPlan<K>, Rejected<K>> {
    let sim = SimulatedMove::new(flat, active, over).ok_or_else(|| missing(flat, active, over))?;
    classify_simulated(&sim, depth)
}

pub(crate) fn classify_simulated<K: TreeKey>(
    sim: &SimulatedMove<'_, K>,
    depth: usize,
) -> Result<DropPlan<K>, Rejected<K>> {
    let active = sim.active();
    let previous = sim.previous();
    let next = sim.next();

    let plan = match previous {
        Some(prev) if depth > prev.depth => DropPlan {
            intent: DropIntent::NestUnder(prev.id),
            expand: prev.collapsed.then_some(prev.id),
        },
        None => match next {
            Some(next) => DropPlan {
                intent: DropIntent::InsertBefore(next.id),
                expand: None,
            },
            None => return Err(Rejected::SameNode(active.id)),
        },
        Some(prev) => {
            let intent = match next {
                Some(next) if depth < next.depth => DropIntent::InsertBefore(next.id),
                _ if depth < prev.depth => {
                    let anchor = sim
                        .preceding_at_depth(depth)
                        .ok_or(Rejected::UnreachableDepth { depth })?;
                    DropIntent::InsertAfter(anchor.id)
                }
                _ => DropIntent::InsertAfter(prev.id),
            };
            DropPlan {
                intent,
                expand: None,
            }
        }
    };

    let target = plan.intent.target();
    if sim.active_subtree().iter().any(|r| r.id == target) {
        return Err(Rejected::Cycle {
            active: active.id,
            target,
        });
    }
    Ok(plan)
}

/// Whether `active` may be dropped onto `over`.
///
/// A cheap pre-check for styling drop targets: both rows must be present,
/// distinct, and `over` must not be one of `active`'s visible descendants.
pub fn can_drop<K: TreeKey>(flat: &[FlatNode<K>], active: K, over: K) -> bool {
    if active == over {
        return false;
    }
    let Some(from) = flat.iter().position(|r| r.id == active) else {
        return false;
    };
    flat.iter().any(|r| r.id == over) && !subtree_rows(flat, from).iter().any(|r| r.id == over)
}

pub(crate) fn missing<K: TreeKey>(flat: &[FlatNode<K>], active: K, over: K) -> Rejected<K> {
    if flat.iter().any(|r| r.id == active) {
        Rejected::NotFound(over)
    } else {
        Rejected::NotFound(active)
    }
}
