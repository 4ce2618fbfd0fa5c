// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: tree nodes, flattened rows, and drop intents.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

/// Bounds required of a node identifier.
///
/// Identifiers are small, copyable handles (integers, interned symbols, UUIDs).
/// This trait is implemented for every type meeting the bounds.
pub trait TreeKey: Copy + Eq + Hash + Debug {}

impl<K: Copy + Eq + Hash + Debug> TreeKey for K {}

/// A node of the durable forest.
///
/// Children are stored behind an [`Arc`] so that moves can share every subtree
/// they do not touch with their input. Equality is structural.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<K> {
    /// Stable identifier.
    pub id: K,
    /// Ordered children; the order is sibling order.
    pub children: Arc<[TreeNode<K>]>,
}

impl<K> TreeNode<K> {
    /// Create a node with no children.
    pub fn leaf(id: K) -> Self {
        Self {
            id,
            children: Arc::from(Vec::new()),
        }
    }

    /// Create a node with the given children.
    pub fn new(id: K, children: Vec<Self>) -> Self {
        Self {
            id,
            children: Arc::from(children),
        }
    }

    /// Returns `true` if this node has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Snapshot of a row's parent, taken when the row was flattened.
///
/// This is a lookup aid only. It goes stale as soon as the tree changes, so
/// callers re-flatten instead of patching it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParentRef<K> {
    /// Parent identifier.
    pub id: K,
    /// Parent's position in the flat sequence.
    pub index: usize,
    /// Parent's depth.
    pub depth: usize,
    /// Number of direct children the parent had.
    pub child_count: usize,
}

/// One row of a flattened forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatNode<K> {
    /// Identifier of the source [`TreeNode`].
    pub id: K,
    /// Position in the flat sequence. Dense: `0..len`.
    pub index: usize,
    /// Nesting depth; `0` for top-level nodes.
    pub depth: usize,
    /// The parent row, or `None` at depth 0.
    pub parent: Option<ParentRef<K>>,
    /// Position among the node's siblings.
    pub sibling_index: usize,
    /// Number of direct children of the source node (visible or not).
    pub child_count: usize,
    /// Cached `child_count > 0`.
    pub has_children: bool,
    /// `true` when the node is not in the expanded set.
    ///
    /// Leaves are reported as collapsed unless they are explicitly expanded.
    pub collapsed: bool,
}

impl<K: Copy> FlatNode<K> {
    /// Identifier of the parent row, if any.
    #[must_use]
    pub fn parent_id(&self) -> Option<K> {
        self.parent.map(|p| p.id)
    }
}

/// Discrete structural edit requested by a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropIntent<K> {
    /// Become the sibling immediately before the target.
    InsertBefore(K),
    /// Become the sibling immediately after the target.
    InsertAfter(K),
    /// Become the last child of the target.
    NestUnder(K),
}

impl<K: Copy> DropIntent<K> {
    /// The node the intent is anchored on (sibling or new parent).
    #[must_use]
    pub fn target(&self) -> K {
        match *self {
            Self::InsertBefore(k) | Self::InsertAfter(k) | Self::NestUnder(k) => k,
        }
    }
}

/// A classified drop together with its side output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropPlan<K> {
    /// The edit to commit.
    pub intent: DropIntent<K>,
    /// A collapsed node that should be expanded so the moved node stays visible.
    ///
    /// This is an instruction for whoever owns expand/collapse state; nothing in
    /// this crate applies it to that state.
    pub expand: Option<K>,
}
