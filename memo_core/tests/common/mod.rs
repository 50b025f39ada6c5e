// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, reason = "Not every test uses every helper")]

use std::cell::RefCell;
use std::rc::Rc;

use memo_core::{InputSet, Schema, Value};

/// Records each time a computation runs, so tests can assert on the absence of a call.
#[derive(Clone, Default)]
pub(crate) struct ComputeLog(Rc<RefCell<Vec<String>>>);

impl ComputeLog {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn count(&self) -> usize {
        self.0.borrow().len()
    }
}

/// Builds an input set with a single field.
#[track_caller]
pub(crate) fn single(schema: &Schema, field: &str, value: impl Into<Value>) -> InputSet {
    schema.inputs().set(field, value).unwrap().build().unwrap()
}

#[derive(Debug)]
pub(crate) struct Person {
    pub(crate) name: &'static str,
}
