// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::resolver::{
    DefaultLabelResolver, LabelResolver, default_invoke_label, default_target_label,
};
use delegate_value::{CallableTarget, DelegateValue, DispatchMask, DispatchSink, Outcome};
use std::string::String;
use std::vec::Vec;

type BackendGuard = tracy_client::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScopeKind {
    Invoke,
    Target { index: usize },
}

struct ScopeEntry {
    kind: ScopeKind,
    // Keep the label alive for backends that may borrow it.
    label: String,
    guard: Option<BackendGuard>,
}

/// A `DispatchSink` that emits Tracy scopes via `tracy-client`.
///
/// Each delegate invocation opens one scope, and each target call opens a nested scope inside
/// it. Nested invocations (a target that itself invokes a delegate) nest accordingly.
pub struct ProfilingDispatchSink<R = DefaultLabelResolver> {
    resolver: R,
    stack: Vec<ScopeEntry>,
}

impl ProfilingDispatchSink<DefaultLabelResolver> {
    /// Create a new sink with handle-based labels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: LabelResolver> ProfilingDispatchSink<R> {
    /// Create a new sink with a custom label resolver.
    #[must_use]
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            stack: Vec::new(),
        }
    }

    /// Returns the number of open scopes.
    #[must_use]
    pub fn open_scopes(&self) -> usize {
        self.stack.len()
    }

    fn on_scope_enter(&mut self, kind: ScopeKind, label: String) {
        let depth = self.stack.len();
        let guard = start_scope(kind, &label, depth);
        self.stack.push(ScopeEntry {
            kind,
            label,
            guard,
        });
    }

    fn on_scope_exit(&mut self, kind: ScopeKind) {
        if self.stack.last().is_some_and(|top| top.kind == kind) {
            if let Some(entry) = self.stack.pop() {
                let ScopeEntry {
                    label: _label,
                    guard: _guard,
                    ..
                } = entry;
                let _ = (_label, _guard);
            }
            return;
        }
        // If the stack got out of sync, drop any active scopes to avoid leaking.
        self.drop_active_scopes();
    }

    // Drop in LIFO order so nested spans close inner-to-outer.
    fn drop_active_scopes(&mut self) {
        while let Some(entry) = self.stack.pop() {
            let ScopeEntry {
                label: _label,
                guard: _guard,
                ..
            } = entry;
            let _ = (_label, _guard);
        }
    }
}

fn start_scope(kind: ScopeKind, label: &str, depth: usize) -> Option<BackendGuard> {
    let function_name = match kind {
        ScopeKind::Invoke => "delegate_value.invoke",
        ScopeKind::Target { .. } => "delegate_value.target",
    };
    let line = u32::try_from(depth).unwrap_or(u32::MAX);
    let client = tracy_client::Client::running()?;
    Some(client.span_alloc(Some(label), function_name, "delegate_value", line, 0))
}

impl<R: LabelResolver> DispatchSink for ProfilingDispatchSink<R> {
    fn mask(&self) -> DispatchMask {
        DispatchMask::INVOKE | DispatchMask::TARGET
    }

    fn invoke_enter(&mut self, delegate: &DelegateValue) {
        let label = self
            .resolver
            .invoke_label(delegate)
            .unwrap_or_else(|| default_invoke_label(delegate));
        self.on_scope_enter(ScopeKind::Invoke, label);
    }

    fn invoke_exit(&mut self, _delegate: &DelegateValue, _outcome: Outcome) {
        self.on_scope_exit(ScopeKind::Invoke);
    }

    fn target_enter(&mut self, _delegate: &DelegateValue, index: usize, target: &CallableTarget) {
        let label = self
            .resolver
            .target_label(target)
            .unwrap_or_else(|| default_target_label(target));
        self.on_scope_enter(ScopeKind::Target { index }, label);
    }

    fn target_exit(
        &mut self,
        _delegate: &DelegateValue,
        index: usize,
        _target: &CallableTarget,
        _outcome: Outcome,
    ) {
        self.on_scope_exit(ScopeKind::Target { index });
    }
}

impl<R> Default for ProfilingDispatchSink<R>
where
    R: LabelResolver + Default,
{
    fn default() -> Self {
        Self::with_resolver(R::default())
    }
}

impl<R> std::fmt::Debug for ProfilingDispatchSink<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilingDispatchSink")
            .field("stack_depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}
