// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Sortable Tree: drag-and-drop reordering of hierarchical lists.
//!
//! A hierarchical list is rendered and dragged as a single flat sequence of
//! rows, each annotated with its depth, parent, and position among siblings.
//! This crate holds the algebra between the two representations:
//!
//! - [`flatten`] turns a forest of [`TreeNode`]s into pre-order [`FlatNode`]
//!   rows, honouring an [`Expansion`] source, and [`build`] turns rows back
//!   into a forest.
//! - [`project`] computes the depth a dragged row would land at from its
//!   horizontal pointer offset, clamped to what the neighbouring rows allow.
//! - [`classify`] turns that depth into a [`DropIntent`]: insert before,
//!   insert after, or nest under another node.
//! - [`commit`] applies an intent to the forest, refusing moves that would put
//!   a node inside its own subtree, and [`apply`] wraps it with re-flattening
//!   and a before/after diff ([`MoveOutcome`]).
//! - [`DragState`] tracks one drag session from start to drop or cancel.
//!
//! Every operation is a pure function of its inputs. Forests share untouched
//! subtrees between input and output, so a move rebuilds only the ancestor
//! chains it changes. Refusals are [`Rejected`] values, never partial trees.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_sortable_tree::{
//!     DropIntent, ExpandAll, TreeNode, apply, classify, flatten, project,
//! };
//!
//! let tree = vec![TreeNode::leaf("a"), TreeNode::leaf("b")];
//! let flat = flatten(&tree, &ExpandAll);
//!
//! // `b` dragged 55px right, in place, with 50px per level.
//! let projection = project(&flat, "b", "b", 55.0, 50.0).unwrap();
//! assert_eq!(projection.depth, 1);
//!
//! let plan = classify(&flat, "b", "b", projection.depth).unwrap();
//! assert_eq!(plan.intent, DropIntent::NestUnder("a"));
//!
//! let outcome = apply(&tree, &ExpandAll, "b", &plan).unwrap();
//! assert_eq!(outcome.tree, vec![TreeNode::new("a", vec![TreeNode::leaf("b")])]);
//! assert_eq!(outcome.change.parent.after, Some("a"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): an [`Expansion`] impl for `std::collections::HashSet`.
//! - `libm`: `no_std` float support for dependencies.
//! - `tracing`: `debug`/`trace` events for commits and drag transitions.
//! - `serde`: `Serialize`/`Deserialize` for the data model.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod build;
mod commit;
mod error;
mod expansion;
mod flatten;
mod intent;
mod outcome;
mod projection;
mod query;
mod session;
mod types;
mod util;

pub use build::build;
pub use commit::commit;
pub use error::Rejected;
pub use expansion::{ExpandAll, ExpandAlso, Expansion};
pub use flatten::{flatten, remove_descendants_of};
pub use intent::{can_drop, classify};
pub use outcome::{Change, MoveChange, MoveOutcome, apply};
pub use projection::{Projection, depth_delta, project, project_depth};
pub use query::{ancestors, descendant_count, descendants, find, is_descendant, remove};
pub use session::{ActiveDrag, DragConfig, DragState, Nudge, Preview};
pub use types::{DropIntent, DropPlan, FlatNode, ParentRef, TreeKey, TreeNode};
