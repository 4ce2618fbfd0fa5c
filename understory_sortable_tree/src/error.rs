// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rejection reasons.

/// Why a projection, classification, or move was refused.
///
/// These are routine outcomes of user input, not faults. Callers keep their
/// previous state when they receive one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejected<K> {
    /// The identifier is not present in the tree or sequence.
    #[error("node {0:?} is not present")]
    NotFound(K),
    /// The node would be placed relative to itself.
    #[error("node {0:?} cannot be dropped relative to itself")]
    SameNode(K),
    /// The target lies inside the subtree of the node being moved.
    #[error("node {target:?} is inside the subtree of {active:?}")]
    Cycle {
        /// The node being moved.
        active: K,
        /// The offending target.
        target: K,
    },
    /// No node above the drop position sits at the requested depth.
    #[error("no preceding node at depth {depth}")]
    UnreachableDepth {
        /// The requested depth.
        depth: usize,
    },
    /// A drop was requested while no drag was in progress.
    #[error("no drag in progress")]
    NoActiveDrag,
}

impl<K> Rejected<K> {
    /// Short machine-readable name, used as a structured log field.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::SameNode(_) => "same_node",
            Self::Cycle { .. } => "cycle",
            Self::UnreachableDepth { .. } => "unreachable_depth",
            Self::NoActiveDrag => "no_active_drag",
        }
    }
}
