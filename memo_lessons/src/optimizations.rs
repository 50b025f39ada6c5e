// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Memoized children, and keeping their object and function props stable.
//!
//! Each lesson renders the same memoized child twice: once with a prop which is recreated on
//! every render, so the shallow comparison always fails, and once with a prop which keeps
//! its identity, so rendering is skipped.

use std::rc::Rc;

use memo_core::{Callback, Object, SchemaError, StableCallback, StableRef, Value, deps};

use crate::lesson::{Child, Lesson, Memoization, Person, person_name};

/// A memoized child, given a primitive prop and an object literal prop.
#[derive(Debug)]
pub struct MemoCase {
    count: u32,
    primitive: Child,
    object: Child,
}

impl MemoCase {
    /// The lesson, before its first render.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            count: 0,
            primitive: Child::new("MemoChild", Memoization::Shallow, &["name"], |props| {
                let name = props.get("name").and_then(Value::as_str).unwrap_or("?");
                format!("MemoChild name: {name}")
            })?,
            object: Child::new("MemoChildObj", Memoization::Shallow, &["nameObj"], |props| {
                format!("MemoChildObj name: {}", person_name(props, "nameObj"))
            })?,
        })
    }
}

impl Lesson for MemoCase {
    fn name(&self) -> &'static str {
        "Memo Case"
    }

    fn click(&mut self) {
        self.count += 1;
    }

    fn render(&mut self) -> Result<(), SchemaError> {
        tracing::debug!(count = self.count, "parent rendered");
        let stable_name = "Raj";
        self.primitive.render([("name", stable_name.into())])?;
        self.object
            .render([("nameObj", Object::new(Person { name: "Raj" }).into())])?;
        Ok(())
    }

    fn children(&self) -> Vec<&Child> {
        vec![&self.primitive, &self.object]
    }
}

type Handler = dyn Fn(&[Value]) -> Value;

/// A memoized button, given a fresh handler and a stabilized handler.
#[derive(Debug)]
pub struct UseCallbackCase {
    count: u32,
    handler_memo: StableCallback<Handler>,
    without: Child,
    with: Child,
}

fn action_button() -> Result<Child, SchemaError> {
    Child::new("ActionButton", Memoization::Shallow, &["onAction"], |_| {
        "Action".to_string()
    })
}

impl UseCallbackCase {
    /// The lesson, before its first render.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            count: 0,
            handler_memo: StableCallback::new().named("handlerMemo"),
            without: action_button()?,
            with: action_button()?,
        })
    }
}

impl Lesson for UseCallbackCase {
    fn name(&self) -> &'static str {
        "useCallback Case"
    }

    fn click(&mut self) {
        self.count += 1;
    }

    fn render(&mut self) -> Result<(), SchemaError> {
        tracing::debug!(count = self.count, "parent rendered");
        let handler_not_memo = Callback::new(|_| Value::from("not memo handler"));
        let handler_memo = self.handler_memo.stabilize(
            Rc::new(|_: &[Value]| Value::from("memo handler")),
            deps![],
        );
        self.without
            .render([("onAction", handler_not_memo.into())])?;
        self.with
            .render([("onAction", Callback::from_rc(handler_memo).into())])?;
        Ok(())
    }

    fn children(&self) -> Vec<&Child> {
        vec![&self.without, &self.with]
    }
}

/// A memoized child, given an inline object and a stabilized object.
#[derive(Debug)]
pub struct UseMemoCase {
    count: u32,
    stable_data: StableRef<Object>,
    without: Child,
    with: Child,
}

fn data_child() -> Result<Child, SchemaError> {
    Child::new("DataChild", Memoization::Shallow, &["data"], |props| {
        format!("data.name: {}", person_name(props, "data"))
    })
}

impl UseMemoCase {
    /// The lesson, before its first render.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            count: 0,
            stable_data: StableRef::new().named("stableData"),
            without: data_child()?,
            with: data_child()?,
        })
    }
}

impl Lesson for UseMemoCase {
    fn name(&self) -> &'static str {
        "useMemo Case"
    }

    fn click(&mut self) {
        self.count += 1;
    }

    fn render(&mut self) -> Result<(), SchemaError> {
        tracing::debug!(count = self.count, "parent rendered");
        let inline_data = Object::new(Person { name: "Ravi" });
        let stable_data = self
            .stable_data
            .derive_value(|| Object::new(Person { name: "Ravi" }), deps![])
            .clone();
        self.without.render([("data", inline_data.into())])?;
        self.with.render([("data", stable_data.into())])?;
        Ok(())
    }

    fn children(&self) -> Vec<&Child> {
        vec![&self.without, &self.with]
    }
}
