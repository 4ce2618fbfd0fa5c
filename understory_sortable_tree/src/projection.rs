// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tentative drop depth from horizontal pointer motion.

use crate::types::{FlatNode, TreeKey};
use crate::util::round_half_up;

/// The sequence as it would look with the active row moved to the over row's
/// position, without copying it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SimulatedMove<'a, K> {
    flat: &'a [FlatNode<K>],
    from: usize,
    to: usize,
}

impl<'a, K: TreeKey> SimulatedMove<'a, K> {
    /// Locate `active` and `over`; `None` if either is absent.
    pub(crate) fn new(flat: &'a [FlatNode<K>], active: K, over: K) -> Option<Self> {
        let from = flat.iter().position(|r| r.id == active)?;
        let to = flat.iter().position(|r| r.id == over)?;
        Some(Self { flat, from, to })
    }

    /// Row at `index` of the simulated sequence.
    pub(crate) fn get(&self, index: usize) -> Option<&'a FlatNode<K>> {
        if index >= self.flat.len() {
            return None;
        }
        let source = if index == self.to {
            self.from
        } else if self.from < self.to && (self.from..self.to).contains(&index) {
            index + 1
        } else if self.from > self.to && (self.to + 1..=self.from).contains(&index) {
            index - 1
        } else {
            index
        };
        self.flat.get(source)
    }

    /// The active row.
    pub(crate) fn active(&self) -> &'a FlatNode<K> {
        &self.flat[self.from]
    }

    /// Drop position of the active row in the simulated sequence.
    pub(crate) fn position(&self) -> usize {
        self.to
    }

    /// Row directly above the drop position.
    pub(crate) fn previous(&self) -> Option<&'a FlatNode<K>> {
        self.to.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Row directly below the drop position.
    pub(crate) fn next(&self) -> Option<&'a FlatNode<K>> {
        self.get(self.to + 1)
    }

    /// Visible descendants of the active row, which in pre-order directly
    /// follow it in the unmoved sequence.
    pub(crate) fn active_subtree(&self) -> &'a [FlatNode<K>] {
        subtree_rows(self.flat, self.from)
    }

    /// Nearest row above the drop position at exactly `depth`.
    pub(crate) fn preceding_at_depth(&self, depth: usize) -> Option<&'a FlatNode<K>> {
        (0..self.to)
            .rev()
            .filter_map(|i| self.get(i))
            .find(|r| r.depth == depth)
    }
}

/// Rows of the subtree below `flat[at]`.
pub(crate) fn subtree_rows<K>(flat: &[FlatNode<K>], at: usize) -> &[FlatNode<K>] {
    let depth = flat[at].depth;
    let rest = &flat[at + 1..];
    let len = rest.iter().take_while(|r| r.depth > depth).count();
    &rest[..len]
}

/// Where a dragged row would land if dropped now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projection<K> {
    /// Clamped depth.
    pub depth: usize,
    /// Smallest allowed depth: that of the row below, or `0`.
    pub min_depth: usize,
    /// Largest allowed depth: one deeper than the row above, or `0`.
    pub max_depth: usize,
    /// Parent the dropped row would have at `depth`.
    pub parent: Option<K>,
    /// Row directly above the drop position.
    pub previous: Option<K>,
    /// Row directly below the drop position.
    pub next: Option<K>,
}

/// Number of indentation levels covered by a horizontal offset.
///
/// Rounds half toward positive infinity. A non-positive or non-finite
/// `indent_width` yields `0`.
#[must_use]
pub fn depth_delta(offset: f64, indent_width: f64) -> i64 {
    if indent_width.is_nan() || indent_width <= 0.0 {
        return 0;
    }
    round_half_up(offset / indent_width)
}

/// Project the drop depth for `active` hovering over `over`.
///
/// The active row is moved to the over row's position in a simulated copy of
/// `flat`. The candidate depth is the active row's current depth plus
/// [`depth_delta`], clamped so the row is at most one level deeper than the
/// row above and no shallower than the row below. A missing neighbour relaxes
/// its bound to `0`. When the bounds conflict, the upper bound wins.
///
/// `flat` is usually the drag-time sequence, with the active row's own
/// descendants removed (see
/// [`remove_descendants_of`](crate::remove_descendants_of)).
///
/// Returns `None` if either id is absent. Runs in `O(n)` with no allocation.
///
/// ```rust
/// use understory_sortable_tree::{ExpandAll, TreeNode, flatten, project};
///
/// let forest = vec![TreeNode::leaf('a'), TreeNode::leaf('b')];
/// let flat = flatten(&forest, &ExpandAll);
///
/// // Dragging `b` 60px to the right in place, with a 50px indent.
/// let p = project(&flat, 'b', 'b', 60.0, 50.0).unwrap();
/// assert_eq!(p.depth, 1);
/// assert_eq!(p.parent, Some('a'));
///
/// // Dragging much further does not nest more than one level below `a`.
/// let p = project(&flat, 'b', 'b', 500.0, 50.0).unwrap();
/// assert_eq!(p.depth, 1);
/// ```
pub fn project<K: TreeKey>(
    flat: &[FlatNode<K>],
    active: K,
    over: K,
    offset: f64,
    indent_width: f64,
) -> Option<Projection<K>> {
    let sim = SimulatedMove::new(flat, active, over)?;
    Some(project_simulated(&sim, offset, indent_width))
}

/// Depth-only form of [`project`].
pub fn project_depth<K: TreeKey>(
    flat: &[FlatNode<K>],
    active: K,
    over: K,
    offset: f64,
    indent_width: f64,
) -> Option<usize> {
    project(flat, active, over, offset, indent_width).map(|p| p.depth)
}

pub(crate) fn project_simulated<K: TreeKey>(
    sim: &SimulatedMove<'_, K>,
    offset: f64,
    indent_width: f64,
) -> Projection<K> {
    let previous = sim.previous();
    let next = sim.next();

    let max_depth = previous.map_or(0, |p| p.depth + 1);
    let min_depth = next.map_or(0, |n| n.depth);

    #[allow(
        clippy::cast_possible_wrap,
        reason = "Tree depths are far below i64::MAX."
    )]
    let candidate =
        (sim.active().depth as i64).saturating_add(depth_delta(offset, indent_width));
    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        reason = "Clamped into [min_depth, max_depth] before the cast back."
    )]
    let depth = if candidate >= max_depth as i64 {
        max_depth
    } else if candidate < min_depth as i64 {
        min_depth
    } else {
        candidate as usize
    };

    Projection {
        depth,
        min_depth,
        max_depth,
        parent: projected_parent(sim, depth),
        previous: previous.map(|r| r.id),
        next: next.map(|r| r.id),
    }
}

fn projected_parent<K: TreeKey>(sim: &SimulatedMove<'_, K>, depth: usize) -> Option<K> {
    let previous = sim.previous()?;
    if depth == 0 {
        return None;
    }
    if depth > previous.depth {
        return Some(previous.id);
    }
    if depth == previous.depth {
        return previous.parent_id();
    }
    sim.preceding_at_depth(depth).and_then(|r| r.parent_id())
}
