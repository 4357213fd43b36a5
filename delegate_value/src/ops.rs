// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combining and removing delegates.
//!
//! Delegates behave like ordered sequences of targets:
//! - `combine(a, b)` is the concatenation `a ++ b` (order and duplicates preserved);
//! - `remove(a, b)` deletes the *last* contiguous occurrence of `b` inside `a`, so repeated
//!   combination is undone in last-in-first-out order.
//!
//! The free functions take optional operands and treat `None` as the empty delegate. Results are
//! always minimal-shape: an empty result is `None` and a one-target result is single.

use alloc::vec::Vec;

use crate::comparator::HandleComparator;
use crate::delegate::{DelegateError, DelegateValue};
use crate::target::CallableTarget;

/// Combines two optional delegates; `None` is the identity element.
pub fn combine(
    a: Option<&DelegateValue>,
    b: Option<&DelegateValue>,
) -> Result<Option<DelegateValue>, DelegateError> {
    match (a, b) {
        (None, None) => Ok(None),
        (Some(a), None) => Ok(Some(a.clone())),
        (None, Some(b)) => Ok(Some(b.clone())),
        (Some(a), Some(b)) => a.combine(b).map(Some),
    }
}

/// Combines every present delegate in `values`, left to right.
///
/// Absent entries are skipped. Returns `None` if no delegate is present.
pub fn combine_all<'a, I>(values: I) -> Result<Option<DelegateValue>, DelegateError>
where
    I: IntoIterator<Item = Option<&'a DelegateValue>>,
{
    let mut values = values.into_iter().flatten();
    let Some(first) = values.next() else {
        return Ok(None);
    };

    let ty = first.delegate_type();
    let mut targets: Vec<CallableTarget> = first.targets().to_vec();
    for value in values {
        ty.check_same(value.delegate_type())?;
        targets.extend_from_slice(value.targets());
    }
    Ok(DelegateValue::from_targets(ty.clone(), targets))
}

/// Removes the last occurrence of `value` from `source`.
///
/// `None` as `source` yields `None`; `None` as `value` yields `source` unchanged.
pub fn remove(
    source: Option<&DelegateValue>,
    value: Option<&DelegateValue>,
) -> Result<Option<DelegateValue>, DelegateError> {
    match (source, value) {
        (None, _) => Ok(None),
        (Some(source), None) => Ok(Some(source.clone())),
        (Some(source), Some(value)) => source.remove(value),
    }
}

/// Removes every occurrence of `value` from `source`.
pub fn remove_all(
    source: Option<&DelegateValue>,
    value: Option<&DelegateValue>,
) -> Result<Option<DelegateValue>, DelegateError> {
    match (source, value) {
        (None, _) => Ok(None),
        (Some(source), None) => Ok(Some(source.clone())),
        (Some(source), Some(value)) => source.remove_all(value),
    }
}

impl DelegateValue {
    /// Returns `self` followed by `follow`.
    ///
    /// Fails with [`DelegateError::ShapeMismatch`] if the delegate types differ.
    pub fn combine(&self, follow: &Self) -> Result<Self, DelegateError> {
        let ty = self.delegate_type();
        ty.check_same(follow.delegate_type())?;

        let mut targets = Vec::with_capacity(self.target_count() + follow.target_count());
        targets.extend_from_slice(self.targets());
        targets.extend_from_slice(follow.targets());
        match Self::from_targets(ty.clone(), targets) {
            Some(combined) => Ok(combined),
            None => unreachable!("combining two delegates yields at least two targets"),
        }
    }

    /// Removes the last contiguous occurrence of `value`'s targets.
    ///
    /// If there is no occurrence, returns `self` unchanged (sharing its storage). If the
    /// occurrence covers every target, returns `None`.
    pub fn remove(&self, value: &Self) -> Result<Option<Self>, DelegateError> {
        let ty = self.delegate_type();
        ty.check_same(value.delegate_type())?;

        let source = self.targets();
        let needle = value.targets();
        let Some(start) = last_occurrence(source, needle, ty.comparator()) else {
            return Ok(Some(self.clone()));
        };

        let end = start + needle.len();
        let mut rest = Vec::with_capacity(source.len() - needle.len());
        rest.extend_from_slice(&source[..start]);
        rest.extend_from_slice(&source[end..]);
        Ok(Self::from_targets(ty.clone(), rest))
    }

    /// Removes every contiguous occurrence of `value`'s targets, last first.
    pub fn remove_all(&self, value: &Self) -> Result<Option<Self>, DelegateError> {
        let mut current = self.clone();
        loop {
            let before = current.target_count();
            match current.remove(value)? {
                None => return Ok(None),
                Some(next) if next.target_count() == before => return Ok(Some(next)),
                Some(next) => current = next,
            }
        }
    }
}

/// Returns the start index of the last window of `haystack` equivalent to `needle`.
fn last_occurrence(
    haystack: &[CallableTarget],
    needle: &[CallableTarget],
    comparator: &dyn HandleComparator,
) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|window| {
        window
            .iter()
            .zip(needle)
            .all(|(a, b)| a.equivalent(b, comparator))
    })
}
