// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Replays the re-render lessons as passes against [`memo_core`].
//!
//! Each lesson is a parent with a button: every click changes the parent's state, and the
//! parent then re-renders, passing props to its children. Running a lesson reports how many
//! times each child actually rendered, which is the whole point of the lesson.
//!
//! - [`reconciliation`]: plain children, which render on every pass, next to a memoized one.
//! - [`optimizations`]: memoized children, with and without stable props.
//!
//! ```
//! use memo_lessons::{optimizations::UseMemoCase, run};
//!
//! let mut lesson = UseMemoCase::new().unwrap();
//! let report = run(&mut lesson, 3).unwrap();
//! assert_eq!(report.passes, 4);
//! assert_eq!(report.children[0].renders, 4);
//! assert_eq!(report.children[1].renders, 1);
//! ```

#![forbid(unsafe_code)]
// LINEBENDER LINT SET - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![deny(clippy::trivially_copy_pass_by_ref)]

mod lesson;
pub use lesson::{Child, ChildReport, Lesson, LessonReport, Memoization, PassOutcome, run};

pub mod optimizations;
pub mod reconciliation;
pub mod tracing_backend;

use memo_core::SchemaError;

/// Every lesson, in the order they are taught.
pub fn all_lessons() -> Result<Vec<Box<dyn Lesson>>, SchemaError> {
    Ok(vec![
        Box::new(reconciliation::PropsChanged::new()?),
        Box::new(reconciliation::SameProps::new()?),
        Box::new(reconciliation::ObjectFunctionProps::new()?),
        Box::new(optimizations::MemoCase::new()?),
        Box::new(optimizations::UseCallbackCase::new()?),
        Box::new(optimizations::UseMemoCase::new()?),
    ])
}
