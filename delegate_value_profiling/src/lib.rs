// Copyright 2026 the Delegate Value Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Profiling adapters for `delegate_value` dispatch (currently Tracy).
//!
//! This crate is `std`-only and keeps `delegate_value` itself free of profiling dependencies.
//! It listens for invoke/target enter and exit callbacks and emits matching profiling scopes.
//!
//! ## Backend
//! This crate currently supports the Tracy backend via `tracy-client`.
//!
//! ## Example
//! ```ignore
//! use delegate_value_profiling::ProfilingDispatchSink;
//!
//! let mut sink = ProfilingDispatchSink::new();
//! delegate.invoke_traced(&mut invoker, &args, Some(&mut sink))?;
//! ```

mod resolver;
mod sink;

pub use resolver::{DefaultLabelResolver, LabelResolver, SymbolLabelResolver};
pub use sink::ProfilingDispatchSink;
