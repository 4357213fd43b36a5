// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch tracing hooks.
//!
//! A [`DispatchSink`] observes [`DelegateValue::invoke_traced`](crate::DelegateValue::invoke_traced)
//! calls. The sink chooses which events it wants through [`DispatchMask`]; events outside the mask
//! are never reported, so an empty mask costs one branch per target.

use core::ops::BitOr;

use crate::delegate::DelegateValue;
use crate::target::CallableTarget;

/// Bitmask selecting which dispatch events a sink receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchMask(u8);

impl DispatchMask {
    /// No events.
    pub const NONE: Self = Self(0);
    /// Whole-invocation enter/exit events.
    pub const INVOKE: Self = Self(1 << 0);
    /// Per-target enter/exit events.
    pub const TARGET: Self = Self(1 << 1);
    /// All events.
    pub const ALL: Self = Self(Self::INVOKE.0 | Self::TARGET.0);

    /// Returns `true` if this mask contains every bit in `other`.
    #[must_use]
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for DispatchMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// How a traced call finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The call returned normally.
    Returned,
    /// The invoker reported a fault; dispatch stops here.
    Faulted,
}

/// Receiver of dispatch events.
///
/// Enter and exit events are always balanced for a given call, including when a target faults.
pub trait DispatchSink {
    /// Events this sink wants to receive.
    fn mask(&self) -> DispatchMask;

    /// A delegate invocation is starting.
    fn invoke_enter(&mut self, _delegate: &DelegateValue) {}

    /// A delegate invocation finished.
    fn invoke_exit(&mut self, _delegate: &DelegateValue, _outcome: Outcome) {}

    /// Target `index` (in call order) is about to be invoked.
    fn target_enter(&mut self, _delegate: &DelegateValue, _index: usize, _target: &CallableTarget) {
    }

    /// Target `index` finished.
    fn target_exit(
        &mut self,
        _delegate: &DelegateValue,
        _index: usize,
        _target: &CallableTarget,
        _outcome: Outcome,
    ) {
    }
}
