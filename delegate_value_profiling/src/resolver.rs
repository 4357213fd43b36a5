// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use delegate_value::{CallHandle, CallableTarget, DelegateValue, Receiver};
use std::collections::HashMap;
use std::string::String;

/// Optional label resolver for profiling scopes.
///
/// Return `None` to fall back to the default handle-based labels.
pub trait LabelResolver {
    /// Resolve a label for a whole delegate invocation.
    fn invoke_label(&mut self, _delegate: &DelegateValue) -> Option<String> {
        None
    }

    /// Resolve a label for one target call.
    fn target_label(&mut self, _target: &CallableTarget) -> Option<String> {
        None
    }
}

/// Default resolver that keeps stable handle-based labels.
#[derive(Default, Debug)]
pub struct DefaultLabelResolver;

impl LabelResolver for DefaultLabelResolver {}

/// Resolver that uses embedder-registered symbol names for call handles.
#[derive(Default, Debug)]
pub struct SymbolLabelResolver {
    symbols: HashMap<CallHandle, String>,
    target_cache: HashMap<CallHandle, String>,
}

impl SymbolLabelResolver {
    /// Creates a resolver with no symbols.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` for `handle`, replacing any previous name.
    pub fn register(&mut self, handle: CallHandle, name: impl Into<String>) {
        self.target_cache.remove(&handle);
        self.symbols.insert(handle, name.into());
    }
}

impl LabelResolver for SymbolLabelResolver {
    fn invoke_label(&mut self, delegate: &DelegateValue) -> Option<String> {
        let name = self.symbols.get(&delegate.method())?;
        Some(format!(
            "delegate:{}->{name} n={}",
            delegate.delegate_type().name(),
            delegate.target_count()
        ))
    }

    fn target_label(&mut self, target: &CallableTarget) -> Option<String> {
        let handle = target.handle();
        if let Some(label) = self.target_cache.get(&handle) {
            return Some(label.clone());
        }
        let name = self.symbols.get(&handle)?;
        let label = format!("target:{name}");
        self.target_cache.insert(handle, label.clone());
        Some(label)
    }
}

pub(crate) fn default_invoke_label(delegate: &DelegateValue) -> String {
    format!(
        "delegate:{} n={}",
        delegate.delegate_type().name(),
        delegate.target_count()
    )
}

pub(crate) fn default_target_label(target: &CallableTarget) -> String {
    let handle = target.handle().0;
    match target.receiver() {
        Receiver::Static => format!("target:{handle:#x}"),
        Receiver::Object(obj) => format!("target:{handle:#x} recv={}", obj.0),
        Receiver::SelfReferential => format!("target:{handle:#x} recv=self"),
    }
}
