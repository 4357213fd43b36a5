// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared strategies and helpers for property tests.
//!
//! Targets are drawn from a deliberately small alphabet so that equal targets, duplicates and
//! repeated sub-sequences show up often.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use delegate_value::ops::combine_all;
use delegate_value::{
    CallHandle, CallableTarget, DelegateType, DelegateTypeId, DelegateValue, ExtraData, ObjHandle,
    Receiver, StubTable,
};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

/// Offset added to a handle to get the handle of its forwarding stub.
pub const STUB_OFFSET: u64 = 0x100;

/// Number of distinct direct handles in the alphabet.
pub const HANDLES: u64 = 4;

static HANDLER: LazyLock<DelegateType> = LazyLock::new(|| {
    let mut stubs = StubTable::new();
    for h in 0..HANDLES {
        stubs.insert_stub(CallHandle(STUB_OFFSET + h), CallHandle(h));
    }
    DelegateType::new(DelegateTypeId(7), "Handler").with_comparator(stubs)
});

/// The delegate type used by every generated value.
///
/// Handles `STUB_OFFSET + h` are stubs forwarding to `h`, so the same callable can be spelled two
/// ways. Every call returns the same type, since the comparator is part of type identity.
pub fn handler_type() -> DelegateType {
    HANDLER.clone()
}

pub fn receiver() -> impl Strategy<Value = Receiver> {
    prop_oneof![
        Just(Receiver::Static),
        Just(Receiver::SelfReferential),
        (0_u64..3).prop_map(|raw| Receiver::Object(ObjHandle(raw))),
    ]
}

/// A target using a direct (non-stub) handle.
pub fn target() -> impl Strategy<Value = CallableTarget> {
    (receiver(), 0..HANDLES, 0_u64..2).prop_map(|(receiver, handle, extra)| {
        CallableTarget::with_extra(receiver, CallHandle(handle), ExtraData(extra))
    })
}

pub fn targets(max_len: usize) -> impl Strategy<Value = Vec<CallableTarget>> {
    prop::collection::vec(target(), 1..=max_len)
}

/// Builds the delegate whose invocation list is `targets` (must be non-empty).
pub fn build(ty: &DelegateType, targets: &[CallableTarget]) -> DelegateValue {
    let singles: Vec<DelegateValue> = targets.iter().map(|t| ty.bind(*t)).collect();
    combine_all(singles.iter().map(Some))
        .expect("single delegate type")
        .expect("non-empty target list")
}

pub fn delegate(max_len: usize) -> impl Strategy<Value = DelegateValue> {
    targets(max_len).prop_map(|ts| build(&handler_type(), &ts))
}

/// Rewrites every handle to its stub spelling.
pub fn via_stubs(targets: &[CallableTarget]) -> Vec<CallableTarget> {
    targets
        .iter()
        .map(|t| {
            CallableTarget::with_extra(
                t.receiver(),
                CallHandle(t.handle().0 + STUB_OFFSET),
                t.extra(),
            )
        })
        .collect()
}

pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Reference implementation: is `needle` a contiguous run inside `haystack`?
pub fn contains_run(haystack: &[DelegateValue], needle: &[DelegateValue]) -> bool {
    needle.len() <= haystack.len() && haystack.windows(needle.len()).any(|w| w == needle)
}
