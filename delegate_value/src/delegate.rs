// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegate values.
//!
//! A [`DelegateValue`] is either a single bound callable or an ordered multicast list of them.
//! Values are immutable and structural:
//! - two values are equal iff they have the same [`DelegateType`] and the same targets in the
//!   same order (duplicates counted);
//! - hashing folds target hashes in order, so it agrees with equality;
//! - combine/remove (see [`crate::ops`]) always build new values.
//!
//! A multicast list is never empty and never has length 1; operations that would produce a
//! one-element list produce [`DelegateKind::Single`] instead.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::comparator::{BitwiseComparator, HandleComparator};
use crate::target::{CallHandle, CallableTarget, Receiver};

/// A delegate error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelegateError {
    /// Two delegates of different types were combined or removed from each other.
    ShapeMismatch {
        /// Name of the left-hand delegate type.
        expected: Box<str>,
        /// Name of the right-hand delegate type.
        found: Box<str>,
    },
    /// Delegates cannot be serialized or deserialized.
    NotSupported,
}

impl fmt::Display for DelegateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, found } => {
                write!(f, "delegate type mismatch: expected {expected}, found {found}")
            }
            Self::NotSupported => write!(f, "serialization of delegates is not supported"),
        }
    }
}

impl core::error::Error for DelegateError {}

/// Identifier for a delegate type (call signature class).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct DelegateTypeId(pub u32);

static BITWISE: BitwiseComparator = BitwiseComparator;

struct TypeInner {
    id: DelegateTypeId,
    name: Box<str>,
    // `None` compares handles bitwise.
    comparator: Option<Arc<dyn HandleComparator>>,
}

/// The runtime type of a delegate: its shape plus the handle comparator of its backend.
///
/// Two `DelegateType` values are the same type iff they have the same [`DelegateTypeId`] and the
/// same comparator: either both compare bitwise, or both share one comparator instance. Construct
/// each type once and share it (cloning is cheap).
#[derive(Clone)]
pub struct DelegateType(Arc<TypeInner>);

impl DelegateType {
    /// Creates a delegate type that compares call handles bitwise.
    #[must_use]
    pub fn new(id: DelegateTypeId, name: impl Into<Box<str>>) -> Self {
        Self(Arc::new(TypeInner {
            id,
            name: name.into(),
            comparator: None,
        }))
    }

    /// Returns a type with the same id and name that uses `comparator` for call handles.
    ///
    /// The result is a distinct type: its values never equal, combine with or remove from values
    /// of `self`.
    #[must_use]
    pub fn with_comparator(self, comparator: impl HandleComparator + 'static) -> Self {
        self.with_shared_comparator(Arc::new(comparator))
    }

    /// Like [`with_comparator`](Self::with_comparator), sharing an existing comparator.
    ///
    /// Types built from clones of the same `Arc` with the same id are the same type.
    #[must_use]
    pub fn with_shared_comparator(self, comparator: Arc<dyn HandleComparator>) -> Self {
        Self(Arc::new(TypeInner {
            id: self.0.id,
            name: self.0.name.clone(),
            comparator: Some(comparator),
        }))
    }

    /// Returns the type id.
    #[must_use]
    #[inline]
    pub fn id(&self) -> DelegateTypeId {
        self.0.id
    }

    /// Returns the type name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Returns the handle comparator.
    #[must_use]
    #[inline]
    pub fn comparator(&self) -> &dyn HandleComparator {
        match &self.0.comparator {
            Some(comparator) => &**comparator,
            None => &BITWISE,
        }
    }

    /// Returns `true` if `self` and `other` denote the same delegate type.
    #[must_use]
    #[inline]
    pub fn same_type(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        self.0.id == other.0.id
            && match (&self.0.comparator, &other.0.comparator) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }

    /// Wraps `target` in a single-target delegate of this type.
    #[must_use]
    #[inline]
    pub fn bind(&self, target: CallableTarget) -> DelegateValue {
        DelegateValue::single(self.clone(), target)
    }

    pub(crate) fn check_same(&self, other: &Self) -> Result<(), DelegateError> {
        if self.same_type(other) {
            return Ok(());
        }
        Err(DelegateError::ShapeMismatch {
            expected: self.0.name.clone(),
            found: other.0.name.clone(),
        })
    }
}

impl fmt::Debug for DelegateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateType")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .finish_non_exhaustive()
    }
}

/// Shape of a delegate value.
#[derive(Clone, Debug)]
pub enum DelegateKind {
    /// Exactly one target, stored inline.
    Single(CallableTarget),
    /// Two or more targets in call order.
    Multi(Arc<[CallableTarget]>),
}

/// An immutable single or multicast delegate.
#[derive(Clone, Debug)]
pub struct DelegateValue {
    ty: DelegateType,
    kind: DelegateKind,
}

impl DelegateValue {
    /// Creates a single-target delegate.
    #[must_use]
    #[inline]
    pub fn single(ty: DelegateType, target: CallableTarget) -> Self {
        Self {
            ty,
            kind: DelegateKind::Single(target),
        }
    }

    /// Builds the minimal-shape delegate for `targets`.
    ///
    /// Returns `None` for an empty list and a [`DelegateKind::Single`] for one target.
    pub(crate) fn from_targets(ty: DelegateType, targets: Vec<CallableTarget>) -> Option<Self> {
        let kind = match targets.len() {
            0 => return None,
            1 => DelegateKind::Single(targets[0]),
            _ => DelegateKind::Multi(targets.into()),
        };
        Some(Self { ty, kind })
    }

    /// Returns the delegate type.
    #[must_use]
    #[inline]
    pub fn delegate_type(&self) -> &DelegateType {
        &self.ty
    }

    /// Returns the shape of this value.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> &DelegateKind {
        &self.kind
    }

    /// Returns the targets in call order.
    #[must_use]
    #[inline]
    pub fn targets(&self) -> &[CallableTarget] {
        match &self.kind {
            DelegateKind::Single(target) => core::slice::from_ref(target),
            DelegateKind::Multi(targets) => &targets[..],
        }
    }

    /// Returns an iterator over the targets in call order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, CallableTarget> {
        self.targets().iter()
    }

    /// Returns the number of targets (always at least 1).
    #[must_use]
    #[inline]
    pub fn target_count(&self) -> usize {
        self.targets().len()
    }

    /// Returns `true` for a multicast value.
    #[must_use]
    #[inline]
    pub fn is_multicast(&self) -> bool {
        matches!(self.kind, DelegateKind::Multi(_))
    }

    /// Returns the call handle of the last target, which is what a multicast delegate reports as
    /// its method.
    #[must_use]
    #[inline]
    pub fn method(&self) -> CallHandle {
        self.last_target().handle()
    }

    /// Returns the receiver of the last target.
    #[must_use]
    #[inline]
    pub fn receiver(&self) -> Receiver {
        self.last_target().receiver()
    }

    /// Returns `true` if `self` and `other` share the same multicast storage.
    ///
    /// Single-target values are stored inline and have no instance identity.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (DelegateKind::Multi(a), DelegateKind::Multi(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Structural hash: the target hash for a single delegate, and `h = h * 33 + hash(t)` folded
    /// over the targets in order for a multicast delegate.
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        let comparator = self.ty.comparator();
        match &self.kind {
            DelegateKind::Single(target) => target.structural_hash(comparator),
            DelegateKind::Multi(targets) => targets.iter().fold(0_u64, |h, t| {
                h.wrapping_mul(33)
                    .wrapping_add(t.structural_hash(comparator))
            }),
        }
    }

    /// Returns the preceding targets and the last target.
    pub(crate) fn split_last(&self) -> (&[CallableTarget], &CallableTarget) {
        match &self.kind {
            DelegateKind::Single(target) => (&[], target),
            DelegateKind::Multi(targets) => match targets.split_last() {
                Some((last, init)) => (init, last),
                None => unreachable!("multicast delegates hold at least two targets"),
            },
        }
    }

    #[inline]
    fn last_target(&self) -> &CallableTarget {
        self.split_last().1
    }
}

impl<'a> IntoIterator for &'a DelegateValue {
    type Item = &'a CallableTarget;
    type IntoIter = core::slice::Iter<'a, CallableTarget>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for DelegateValue {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if !self.ty.same_type(&other.ty) {
            return false;
        }

        let comparator = self.ty.comparator();
        match (&self.kind, &other.kind) {
            (DelegateKind::Single(a), DelegateKind::Single(b)) => a.equivalent(b, comparator),
            (DelegateKind::Multi(a), DelegateKind::Multi(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.equivalent(y, comparator))
            }
            _ => false,
        }
    }
}

impl Eq for DelegateValue {}

impl Hash for DelegateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}
