// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native call-handle comparison.
//!
//! Two call handles may differ bit-for-bit and still invoke the same code, for example when one
//! of them points at a generic-instantiation trampoline that forwards to the other. Deciding that
//! is the calling-convention backend's business, so delegate types carry an injected
//! [`HandleComparator`] instead of comparing raw handles.

use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::target::CallHandle;

/// Semantic comparison of native call handles.
///
/// Implementations map every handle to a canonical handle. Two handles are equivalent iff their
/// canonical handles are equal, which makes equivalence reflexive, symmetric and transitive, and
/// lets hashing use the canonical handle.
///
/// `equivalent` may be overridden for speed, but it must agree with `canonicalize`.
pub trait HandleComparator: fmt::Debug + Send + Sync {
    /// Returns the canonical handle for `handle`.
    fn canonicalize(&self, handle: CallHandle) -> CallHandle;

    /// Returns `true` if `a` and `b` invoke the same underlying code.
    fn equivalent(&self, a: CallHandle, b: CallHandle) -> bool {
        a == b || self.canonicalize(a) == self.canonicalize(b)
    }
}

/// Comparator for backends without dispatch stubs: handles are equal iff their bits are equal.
#[derive(Copy, Clone, Debug, Default)]
pub struct BitwiseComparator;

impl HandleComparator for BitwiseComparator {
    #[inline]
    fn canonicalize(&self, handle: CallHandle) -> CallHandle {
        handle
    }

    #[inline]
    fn equivalent(&self, a: CallHandle, b: CallHandle) -> bool {
        a == b
    }
}

/// Comparator that resolves dispatch stubs to the handle they forward to.
///
/// Stubs may forward to other stubs; chains are followed until they reach a handle that is not a
/// registered stub. A forwarding cycle has no real target, so every handle on it (or leading into
/// it) canonicalizes to the smallest handle on the cycle.
#[derive(Clone, Debug, Default)]
pub struct StubTable {
    forwards: HashMap<CallHandle, CallHandle>,
}

impl StubTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `stub` as forwarding to `target`.
    ///
    /// Returns the previous forward for `stub`, if any.
    pub fn insert_stub(&mut self, stub: CallHandle, target: CallHandle) -> Option<CallHandle> {
        self.forwards.insert(stub, target)
    }

    /// Returns the number of registered stubs.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.forwards.len()
    }

    /// Returns `true` if no stubs are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forwards.is_empty()
    }

    /// Smallest handle on the forwarding cycle through `start`.
    fn cycle_min(&self, start: CallHandle) -> CallHandle {
        let mut min = start;
        let mut current = start;
        while let Some(&next) = self.forwards.get(&current) {
            if next == start {
                break;
            }
            min = min.min(next);
            current = next;
        }
        min
    }
}

impl HandleComparator for StubTable {
    fn canonicalize(&self, handle: CallHandle) -> CallHandle {
        let mut current = handle;
        let mut visited: HashSet<CallHandle> = HashSet::new();
        while let Some(&next) = self.forwards.get(&current) {
            if !visited.insert(current) {
                return self.cycle_min(current);
            }
            current = next;
        }
        current
    }
}
