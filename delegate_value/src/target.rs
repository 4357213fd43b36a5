// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callable targets: one bound call site each.
//!
//! A [`CallableTarget`] is produced by an external binder. It borrows the identity of a receiver
//! (never its lifetime) and carries an opaque native call handle plus one auxiliary data word.
//! Targets are `Copy` so a single-target delegate never needs a heap allocation.

use crate::comparator::HandleComparator;

/// An opaque handle to a host-owned receiver object.
///
/// Handles are identities: two handles name the same receiver iff their raw values are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ObjHandle(pub u64);

/// An opaque native call handle (code address or stub identity).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct CallHandle(pub u64);

/// Opaque auxiliary word carried next to the call handle (closure payload, count, ...).
///
/// Compared bitwise, never semantically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExtraData(pub u64);

/// The receiver a call is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// No receiver: the call is bound to a static or free function.
    Static,
    /// A host object, compared by identity.
    Object(ObjHandle),
    /// The delegate itself.
    ///
    /// Used when a callable is bound to its own dispatch wrapper. It only ever equals another
    /// `SelfReferential` receiver, regardless of which delegate instance carries it.
    SelfReferential,
}

const OBJECT_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

impl Receiver {
    // Injective over object handles: the offset skips the tag words and the multiplier is odd.
    #[inline]
    fn hash_word(self) -> u64 {
        match self {
            Self::Static => 0,
            Self::SelfReferential => 1,
            Self::Object(ObjHandle(raw)) => raw.wrapping_add(2).wrapping_mul(OBJECT_MIX),
        }
    }
}

/// One bound call site: a receiver plus a call handle.
///
/// There are no mutators; a target is fixed once the binder hands it out. Equality is not
/// bitwise because call handles are compared through a [`HandleComparator`], see
/// [`CallableTarget::equivalent`].
#[derive(Copy, Clone, Debug)]
pub struct CallableTarget {
    receiver: Receiver,
    handle: CallHandle,
    extra: ExtraData,
}

impl CallableTarget {
    /// Binds `handle` to `receiver` with no extra data.
    #[must_use]
    #[inline]
    pub const fn bind(receiver: Receiver, handle: CallHandle) -> Self {
        Self::with_extra(receiver, handle, ExtraData(0))
    }

    /// Binds `handle` to `receiver`, carrying an auxiliary data word.
    #[must_use]
    #[inline]
    pub const fn with_extra(receiver: Receiver, handle: CallHandle, extra: ExtraData) -> Self {
        Self {
            receiver,
            handle,
            extra,
        }
    }

    /// Binds a static (receiver-less) function.
    #[must_use]
    #[inline]
    pub const fn bind_static(handle: CallHandle) -> Self {
        Self::bind(Receiver::Static, handle)
    }

    /// Binds `handle` to the host object `obj`.
    #[must_use]
    #[inline]
    pub const fn bind_object(obj: ObjHandle, handle: CallHandle) -> Self {
        Self::bind(Receiver::Object(obj), handle)
    }

    /// Returns the receiver.
    #[must_use]
    #[inline]
    pub const fn receiver(&self) -> Receiver {
        self.receiver
    }

    /// Returns the native call handle.
    #[must_use]
    #[inline]
    pub const fn handle(&self) -> CallHandle {
        self.handle
    }

    /// Returns the auxiliary data word.
    #[must_use]
    #[inline]
    pub const fn extra(&self) -> ExtraData {
        self.extra
    }

    /// Returns `true` if `self` and `other` denote the same callable.
    ///
    /// Receivers must be the same identity, extra data must match exactly, and call handles must
    /// be equivalent under `comparator`.
    #[must_use]
    pub fn equivalent(&self, other: &Self, comparator: &dyn HandleComparator) -> bool {
        self.receiver == other.receiver
            && self.extra == other.extra
            && comparator.equivalent(self.handle, other.handle)
    }

    /// Structural hash contribution of this target.
    ///
    /// Combines the receiver identity with the canonical call handle, so targets that are
    /// [`equivalent`](Self::equivalent) under `comparator` always hash equal.
    #[must_use]
    pub fn structural_hash(&self, comparator: &dyn HandleComparator) -> u64 {
        let handle = comparator.canonicalize(self.handle).0;
        self.receiver.hash_word().rotate_left(29) ^ handle.wrapping_mul(0xC2B2_AE3D_27D4_EB4F)
    }
}
