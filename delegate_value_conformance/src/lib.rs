// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the `delegate_value` conformance tests.
//!
//! The tests live in `tests/`; this crate only provides a stand-in binder that hands out fresh
//! receivers and call handles, and a recording invoker.

use delegate_value::{
    CallHandle, CallableTarget, DelegateType, DelegateValue, Invoker, ObjHandle, Receiver,
};

/// Binder stand-in that hands out distinct receivers and call handles.
#[derive(Debug)]
pub struct Binder {
    ty: DelegateType,
    next_obj: u64,
    next_handle: u64,
}

impl Binder {
    /// Creates a binder producing delegates of type `ty`.
    #[must_use]
    pub fn new(ty: DelegateType) -> Self {
        Self {
            ty,
            next_obj: 1,
            next_handle: 0x1000,
        }
    }

    /// Returns the delegate type used by this binder.
    #[must_use]
    pub fn delegate_type(&self) -> &DelegateType {
        &self.ty
    }

    /// Binds a fresh method on a fresh receiver.
    pub fn bind_fresh(&mut self) -> DelegateValue {
        let obj = ObjHandle(self.next_obj);
        self.next_obj += 1;
        let handle = self.fresh_handle();
        self.ty.bind(CallableTarget::bind_object(obj, handle))
    }

    /// Binds a fresh static method.
    pub fn bind_static(&mut self) -> DelegateValue {
        let handle = self.fresh_handle();
        self.ty.bind(CallableTarget::bind_static(handle))
    }

    /// Binds a fresh method on the delegate's own dispatch wrapper.
    pub fn bind_self_referential(&mut self) -> DelegateValue {
        let handle = self.fresh_handle();
        self.ty
            .bind(CallableTarget::bind(Receiver::SelfReferential, handle))
    }

    fn fresh_handle(&mut self) -> CallHandle {
        let handle = CallHandle(self.next_handle);
        self.next_handle += 0x10;
        handle
    }
}

/// Invoker that records the call handles it was asked to call, in order.
///
/// Each call returns `args + handle`; calls to `fault_on` fail with that handle.
#[derive(Debug, Default)]
pub struct CallLog {
    /// Handles called so far.
    pub calls: Vec<CallHandle>,
    /// Handle whose call faults, if any.
    pub fault_on: Option<CallHandle>,
}

impl Invoker<u64> for CallLog {
    type Output = u64;
    type Error = CallHandle;

    fn invoke(&mut self, target: &CallableTarget, args: &u64) -> Result<u64, CallHandle> {
        let handle = target.handle();
        self.calls.push(handle);
        if self.fault_on == Some(handle) {
            return Err(handle);
        }
        Ok(args.wrapping_add(handle.0))
    }
}
