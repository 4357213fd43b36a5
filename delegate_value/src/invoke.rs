// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invocation and invocation-list export.
//!
//! The core never calls code itself. An [`Invoker`] supplied by the calling-convention layer
//! performs each call; the delegate only fixes the order (call order is list order) and the
//! result (the last target's result).
//!
//! Faults are propagated fail-fast: the first `Err` returned by the invoker stops dispatch and is
//! returned unchanged. An invoker that wants to keep going after a fault handles it itself and
//! returns `Ok`.

use alloc::vec::Vec;

use crate::delegate::DelegateValue;
use crate::target::CallableTarget;
use crate::trace::{DispatchMask, DispatchSink, Outcome};

/// Calls a single bound target.
///
/// Implemented for any `FnMut(&CallableTarget, &A) -> Result<R, E>`.
pub trait Invoker<A: ?Sized> {
    /// Value produced by one call.
    type Output;
    /// Fault reported by one call.
    type Error;

    /// Calls `target` with `args`.
    fn invoke(&mut self, target: &CallableTarget, args: &A) -> Result<Self::Output, Self::Error>;
}

impl<A, F, R, E> Invoker<A> for F
where
    A: ?Sized,
    F: FnMut(&CallableTarget, &A) -> Result<R, E>,
{
    type Output = R;
    type Error = E;

    #[inline]
    fn invoke(&mut self, target: &CallableTarget, args: &A) -> Result<R, E> {
        self(target, args)
    }
}

impl DelegateValue {
    /// Calls every target in order with the same `args` and returns the last result.
    ///
    /// Results of earlier targets are dropped.
    pub fn invoke<A, I>(&self, invoker: &mut I, args: &A) -> Result<I::Output, I::Error>
    where
        A: ?Sized,
        I: Invoker<A> + ?Sized,
    {
        let (init, last) = self.split_last();
        for target in init {
            invoker.invoke(target, args)?;
        }
        invoker.invoke(last, args)
    }

    /// Like [`invoke`](Self::invoke), reporting dispatch events to `sink`.
    pub fn invoke_traced<A, I>(
        &self,
        invoker: &mut I,
        args: &A,
        sink: Option<&mut dyn DispatchSink>,
    ) -> Result<I::Output, I::Error>
    where
        A: ?Sized,
        I: Invoker<A> + ?Sized,
    {
        let Some(sink) = sink else {
            return self.invoke(invoker, args);
        };

        let mask = sink.mask();
        let trace_invoke = mask.contains(DispatchMask::INVOKE);
        let trace_targets = mask.contains(DispatchMask::TARGET);

        if trace_invoke {
            sink.invoke_enter(self);
        }
        let result = self.dispatch_traced(invoker, args, sink, trace_targets);
        if trace_invoke {
            sink.invoke_exit(self, outcome_of(&result));
        }
        result
    }

    /// Exports each target as an independent single delegate, in call order.
    ///
    /// The returned list is an owned snapshot.
    #[must_use]
    pub fn invocation_list(&self) -> Vec<Self> {
        let ty = self.delegate_type();
        self.iter().map(|target| ty.bind(*target)).collect()
    }

    fn dispatch_traced<A, I>(
        &self,
        invoker: &mut I,
        args: &A,
        sink: &mut dyn DispatchSink,
        trace_targets: bool,
    ) -> Result<I::Output, I::Error>
    where
        A: ?Sized,
        I: Invoker<A> + ?Sized,
    {
        let (init, last) = self.split_last();
        for (index, target) in init.iter().enumerate() {
            self.call_traced(invoker, args, sink, trace_targets, index, target)?;
        }
        self.call_traced(invoker, args, sink, trace_targets, init.len(), last)
    }

    fn call_traced<A, I>(
        &self,
        invoker: &mut I,
        args: &A,
        sink: &mut dyn DispatchSink,
        trace_targets: bool,
        index: usize,
        target: &CallableTarget,
    ) -> Result<I::Output, I::Error>
    where
        A: ?Sized,
        I: Invoker<A> + ?Sized,
    {
        if !trace_targets {
            return invoker.invoke(target, args);
        }
        sink.target_enter(self, index, target);
        let result = invoker.invoke(target, args);
        sink.target_exit(self, index, target, outcome_of(&result));
        result
    }
}

#[inline]
fn outcome_of<T, E>(result: &Result<T, E>) -> Outcome {
    match result {
        Ok(_) => Outcome::Returned,
        Err(_) => Outcome::Faulted,
    }
}
