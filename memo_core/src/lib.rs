// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! [`ShallowEq`]: crate::ShallowEq
//! [`MemoizedUnit`]: crate::MemoizedUnit
//! [`StableRef`]: crate::StableRef
//! [`StableCallback`]: crate::StableCallback
//! [`InputSet`]: crate::InputSet
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
// LINEBENDER LINT SET - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![deny(clippy::trivially_copy_pass_by_ref)]

mod equality;
pub use equality::{Comparator, Shallow, ShallowEq, never_equal, shallow_equal};

mod value;
pub use value::{Callback, Object, Value};

mod input_set;
pub use input_set::{InputSet, InputSetBuilder, Schema, SchemaError};

mod memoized;
pub use memoized::{CacheEntry, Memo, MemoStats, MemoizedUnit};

mod stable_ref;
pub use stable_ref::{DependencySet, StableCallback, StableRef};
