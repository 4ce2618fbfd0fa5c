// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state for reordering a flattened tree.
//!
//! [`DragState`] tracks the one drag that may be in progress: which row is
//! being dragged, which row it is currently over, and how far the pointer has
//! travelled horizontally since the drag began. Nothing here touches the tree
//! until [`DragState::on_drop`]; every other transition only updates the
//! session, and [`DragState::preview`] recomputes the projection and intent on
//! demand.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Vec2;
//! use understory_sortable_tree::{
//!     DragState, DropIntent, ExpandAll, TreeNode, flatten, remove_descendants_of,
//! };
//!
//! let tree = vec![TreeNode::leaf('a'), TreeNode::leaf('b')];
//! let mut drag: DragState<char> = DragState::new();
//!
//! drag.on_start('b');
//! // Rows under the dragged node travel with it, so hide them while dragging.
//! let flat = remove_descendants_of(&flatten(&tree, &ExpandAll), &['b']);
//!
//! // 60px right with the default 50px indent: one level deeper.
//! drag.on_move(Vec2::new(60.0, 4.0));
//! let preview = drag.preview(&flat).unwrap();
//! assert_eq!(preview.projection.depth, 1);
//! assert_eq!(preview.plan.map(|p| p.intent), Ok(DropIntent::NestUnder('a')));
//!
//! let outcome = drag.on_drop(&tree, &flat, &ExpandAll).unwrap();
//! assert_eq!(outcome.tree, vec![TreeNode::new('a', vec![TreeNode::leaf('b')])]);
//! assert!(!drag.is_dragging());
//! ```
//!
//! ## Keyboard
//!
//! [`DragState::nudge`] changes the projected depth by exactly one level, for
//! keyboard-driven drags where there is no pointer offset. Combined with
//! [`DragState::on_over`] for the vertical direction this covers the arrow
//! keys.
//!
//! ## Cancellation
//!
//! [`DragState::on_cancel`] discards the session. Since nothing was written,
//! there is nothing to roll back.

use kurbo::Vec2;

use crate::error::Rejected;
use crate::expansion::Expansion;
use crate::intent::{classify_simulated, missing};
use crate::outcome::{MoveOutcome, apply};
use crate::projection::{Projection, SimulatedMove, project_simulated};
use crate::types::{DropPlan, FlatNode, TreeKey, TreeNode};

/// Tunables for a drag session.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragConfig {
    /// Horizontal distance, in logical pixels, of one nesting level.
    pub indent_width: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { indent_width: 50.0 }
    }
}

/// Direction of a keyboard depth change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    /// One level deeper (indent).
    Deeper,
    /// One level shallower (outdent).
    Shallower,
}

/// What would happen if the drag were dropped now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preview<K> {
    /// Projected depth and neighbours.
    pub projection: Projection<K>,
    /// The classified drop, or why it would be refused.
    pub plan: Result<DropPlan<K>, Rejected<K>>,
}

/// The drag in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveDrag<K> {
    /// Row being dragged.
    pub active: K,
    /// Row currently under the pointer. Starts out as `active`.
    pub over: K,
    /// Pointer travel since the drag started.
    pub offset: Vec2,
}

/// Single-writer drag session.
///
/// At most one drag is tracked; starting a new one replaces the old one.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    drag: Option<ActiveDrag<K>>,
    /// Session configuration.
    pub config: DragConfig,
}

impl<K: TreeKey> Default for DragState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TreeKey> DragState<K> {
    /// Create an idle session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    /// Create an idle session with the given configuration.
    pub fn with_config(config: DragConfig) -> Self {
        Self { drag: None, config }
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The drag in progress, if any.
    pub fn current(&self) -> Option<&ActiveDrag<K>> {
        self.drag.as_ref()
    }

    /// Row being dragged.
    pub fn active(&self) -> Option<K> {
        self.drag.map(|d| d.active)
    }

    /// Row under the pointer.
    pub fn over(&self) -> Option<K> {
        self.drag.map(|d| d.over)
    }

    /// Begin dragging `active`.
    pub fn on_start(&mut self, active: K) {
        #[cfg(feature = "tracing")]
        tracing::trace!(active = ?active, "drag started");
        self.drag = Some(ActiveDrag {
            active,
            over: active,
            offset: Vec2::ZERO,
        });
    }

    /// The pointer moved over another row. Ignored when idle.
    pub fn on_over(&mut self, over: K) {
        if let Some(drag) = self.drag.as_mut() {
            #[cfg(feature = "tracing")]
            tracing::trace!(active = ?drag.active, over = ?over, "drag over");
            drag.over = over;
        }
    }

    /// Record the pointer's total travel since the drag started. Ignored when
    /// idle.
    pub fn on_move(&mut self, offset: Vec2) {
        if let Some(drag) = self.drag.as_mut() {
            drag.offset = offset;
        }
    }

    /// Move the projected depth one level in `direction`.
    ///
    /// The horizontal offset is set so that it projects to exactly the new
    /// depth. Returns `false`, leaving the session unchanged, when idle, when
    /// the rows are not in `flat`, or when the depth is already at the bound
    /// in that direction.
    pub fn nudge(&mut self, flat: &[FlatNode<K>], direction: Nudge) -> bool {
        let indent_width = self.config.indent_width;
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let Some(sim) = SimulatedMove::new(flat, drag.active, drag.over) else {
            return false;
        };
        let projection = project_simulated(&sim, drag.offset.x, indent_width);
        let depth = match direction {
            Nudge::Deeper if projection.depth < projection.max_depth => projection.depth + 1,
            Nudge::Shallower if projection.depth > projection.min_depth => projection.depth - 1,
            _ => return false,
        };
        #[allow(
            clippy::cast_precision_loss,
            reason = "Tree depths are far below 2^52."
        )]
        let levels = depth as f64 - sim.active().depth as f64;
        drag.offset.x = levels * indent_width;
        #[cfg(feature = "tracing")]
        tracing::trace!(active = ?drag.active, depth, "drag nudged");
        true
    }

    /// Projection and classification for the current pointer state.
    ///
    /// `flat` is the drag-time sequence, normally with the active row's
    /// descendants removed. Returns `None` when idle or when the active or
    /// over row is not in `flat`.
    pub fn preview(&self, flat: &[FlatNode<K>]) -> Option<Preview<K>> {
        let drag = self.drag?;
        let sim = SimulatedMove::new(flat, drag.active, drag.over)?;
        let projection = project_simulated(&sim, drag.offset.x, self.config.indent_width);
        let plan = classify_simulated(&sim, projection.depth);
        Some(Preview { projection, plan })
    }

    /// Abandon the drag without touching the tree.
    pub fn on_cancel(&mut self) {
        if let Some(_drag) = self.drag.take() {
            #[cfg(feature = "tracing")]
            tracing::debug!(active = ?_drag.active, "drag cancelled");
        }
    }

    /// End the drag and commit it against `tree`.
    ///
    /// `flat` must be the sequence the drag was projected against. The
    /// session ends whether or not the move is accepted; on rejection the
    /// caller keeps its current tree.
    pub fn on_drop<E>(
        &mut self,
        tree: &[TreeNode<K>],
        flat: &[FlatNode<K>],
        expanded: &E,
    ) -> Result<MoveOutcome<K>, Rejected<K>>
    where
        E: Expansion<K> + ?Sized,
    {
        let drag = self.drag.take().ok_or(Rejected::NoActiveDrag)?;
        let result = drop_drag(&drag, self.config.indent_width, tree, flat, expanded);
        #[cfg(feature = "tracing")]
        if let Err(rejected) = &result {
            tracing::debug!(
                active = ?drag.active,
                over = ?drag.over,
                reason = rejected.reason(),
                "drop rejected"
            );
        }
        result
    }
}

fn drop_drag<K, E>(
    drag: &ActiveDrag<K>,
    indent_width: f64,
    tree: &[TreeNode<K>],
    flat: &[FlatNode<K>],
    expanded: &E,
) -> Result<MoveOutcome<K>, Rejected<K>>
where
    K: TreeKey,
    E: Expansion<K> + ?Sized,
{
    let sim = SimulatedMove::new(flat, drag.active, drag.over)
        .ok_or_else(|| missing(flat, drag.active, drag.over))?;
    let projection = project_simulated(&sim, drag.offset.x, indent_width);
    let plan = classify_simulated(&sim, projection.depth)?;
    apply(tree, expanded, drag.active, &plan)
}
