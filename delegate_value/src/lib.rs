// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable single and multicast delegate values.
//!
//! A delegate is one bound callable ([`CallableTarget`]: receiver identity plus native call
//! handle) or an ordered list of them. This crate owns the value semantics:
//!
//! - structural equality and a matching hash ([`DelegateValue`]), so delegates work as map keys;
//! - `combine` (concatenation) and `remove` (last contiguous occurrence) in [`ops`];
//! - in-order dispatch through an embedder-supplied [`Invoker`], returning the last result.
//!
//! Binding targets, calling code and comparing native call handles belong to the embedder. Call
//! handles are compared through the [`HandleComparator`] carried by each [`DelegateType`].
//!
//! ```
//! use delegate_value::{CallHandle, CallableTarget, DelegateType, DelegateTypeId, ObjHandle};
//!
//! let ty = DelegateType::new(DelegateTypeId(0), "Action");
//! let a = ty.bind(CallableTarget::bind_object(ObjHandle(1), CallHandle(0x10)));
//! let b = ty.bind(CallableTarget::bind_object(ObjHandle(2), CallHandle(0x20)));
//!
//! let ab = a.combine(&b)?;
//! assert_eq!(ab.target_count(), 2);
//! assert_eq!(ab.remove(&b)?, Some(a));
//! # Ok::<(), delegate_value::DelegateError>(())
//! ```
//!
//! `no_std` with `alloc`; the `std` feature is reserved for std-only conveniences.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod comparator;
pub mod delegate;
pub mod invoke;
pub mod ops;
mod persist;
pub mod target;
pub mod trace;

pub use comparator::{BitwiseComparator, HandleComparator, StubTable};
pub use delegate::{DelegateError, DelegateKind, DelegateType, DelegateTypeId, DelegateValue};
pub use invoke::Invoker;
pub use target::{CallHandle, CallableTarget, ExtraData, ObjHandle, Receiver};
pub use trace::{DispatchMask, DispatchSink, Outcome};
