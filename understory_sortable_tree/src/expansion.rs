// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sources of expand/collapse state.
//!
//! The set of expanded nodes is owned by the host's UI state. Flattening only
//! needs to ask whether a given node is expanded, so any set-like container
//! can be passed in.

use alloc::collections::BTreeSet;
use core::hash::{BuildHasher, Hash};

/// Answers whether a node's children are shown.
pub trait Expansion<K> {
    /// Returns `true` if the children of `id` should be traversed.
    fn is_expanded(&self, id: &K) -> bool;
}

/// Every node is expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpandAll;

impl<K> Expansion<K> for ExpandAll {
    fn is_expanded(&self, _id: &K) -> bool {
        true
    }
}

impl<K: Hash + Eq, S: BuildHasher> Expansion<K> for hashbrown::HashSet<K, S> {
    fn is_expanded(&self, id: &K) -> bool {
        self.contains(id)
    }
}

#[cfg(feature = "std")]
impl<K: Hash + Eq, S: BuildHasher> Expansion<K> for std::collections::HashSet<K, S> {
    fn is_expanded(&self, id: &K) -> bool {
        self.contains(id)
    }
}

impl<K: Ord> Expansion<K> for BTreeSet<K> {
    fn is_expanded(&self, id: &K) -> bool {
        self.contains(id)
    }
}

impl<K: PartialEq> Expansion<K> for [K] {
    fn is_expanded(&self, id: &K) -> bool {
        self.contains(id)
    }
}

impl<K, E: Expansion<K> + ?Sized> Expansion<K> for &E {
    fn is_expanded(&self, id: &K) -> bool {
        (**self).is_expanded(id)
    }
}

/// An expansion source with one extra node forced open.
///
/// Used to re-flatten after a drop whose [`DropPlan::expand`](crate::DropPlan::expand)
/// instruction has not yet reached the host's state.
#[derive(Clone, Copy, Debug)]
pub struct ExpandAlso<'a, K, E: ?Sized> {
    base: &'a E,
    extra: Option<K>,
}

impl<'a, K, E: ?Sized> ExpandAlso<'a, K, E> {
    /// Wrap `base`, additionally treating `extra` as expanded.
    pub fn new(base: &'a E, extra: Option<K>) -> Self {
        Self { base, extra }
    }
}

impl<K: PartialEq, E: Expansion<K> + ?Sized> Expansion<K> for ExpandAlso<'_, K, E> {
    fn is_expanded(&self, id: &K) -> bool {
        self.extra.as_ref() == Some(id) || self.base.is_expanded(id)
    }
}
