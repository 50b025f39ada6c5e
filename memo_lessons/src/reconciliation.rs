// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! When does a plain, unmemoized child re-render?
//!
//! Always, whenever its parent does: whether its props changed or not.
//! Only a memoized child given the same primitive props skips.

use memo_core::{Callback, InputSet, Object, SchemaError, Value};

use crate::lesson::{Child, Lesson, Memoization, Person, person_name};

/// A primitive prop which changes on every click.
#[derive(Debug)]
pub struct PropsChanged {
    num: u32,
    child: Child,
}

impl PropsChanged {
    /// The lesson, before its first render.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            num: 1,
            child: Child::new("Child", Memoization::Never, &["number"], |props| {
                let number = props.get("number").and_then(Value::as_number);
                format!("Number: {}", number.unwrap_or_default())
            })?,
        })
    }
}

impl Lesson for PropsChanged {
    fn name(&self) -> &'static str {
        "Props Changed (Primitive)"
    }

    fn click(&mut self) {
        self.num += 1;
    }

    fn render(&mut self) -> Result<(), SchemaError> {
        self.child.render([("number", self.num.into())])?;
        Ok(())
    }

    fn children(&self) -> Vec<&Child> {
        vec![&self.child]
    }
}

/// A primitive prop which never changes, passed to a child which isn't memoized and to one which is.
#[derive(Debug)]
pub struct SameProps {
    count: u32,
    child: Child,
    memo_child: Child,
}

fn greeting(props: &InputSet) -> String {
    let name = props.get("name").and_then(Value::as_str).unwrap_or("?");
    format!("Hello {name}")
}

impl SameProps {
    /// The lesson, before its first render.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            count: 0,
            child: Child::new("Child", Memoization::Never, &["name"], greeting)?,
            memo_child: Child::new("MemoChild", Memoization::Shallow, &["name"], greeting)?,
        })
    }
}

impl Lesson for SameProps {
    fn name(&self) -> &'static str {
        "Same Props (Primitive, No Change)"
    }

    fn click(&mut self) {
        self.count += 1;
    }

    fn render(&mut self) -> Result<(), SchemaError> {
        tracing::debug!(count = self.count, "parent rendered");
        self.child.render([("name", "Raj".into())])?;
        self.memo_child.render([("name", "Raj".into())])?;
        Ok(())
    }

    fn children(&self) -> Vec<&Child> {
        vec![&self.child, &self.memo_child]
    }
}

/// An object literal and a function, both recreated on every render.
#[derive(Debug)]
pub struct ObjectFunctionProps {
    count: u32,
    child: Child,
}

impl ObjectFunctionProps {
    /// The lesson, before its first render.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            count: 0,
            child: Child::new(
                "Child",
                Memoization::Never,
                &["data", "onClick"],
                |props| person_name(props, "data").to_string(),
            )?,
        })
    }
}

impl Lesson for ObjectFunctionProps {
    fn name(&self) -> &'static str {
        "Object or Function Props (New Reference)"
    }

    fn click(&mut self) {
        self.count += 1;
    }

    fn render(&mut self) -> Result<(), SchemaError> {
        tracing::debug!(count = self.count, "parent rendered");
        let handle_click = Callback::new(|_| Value::from("Clicked!"));
        self.child.render([
            ("data", Object::new(Person { name: "Ravi" }).into()),
            ("onClick", handle_click.into()),
        ])?;
        Ok(())
    }

    fn children(&self) -> Vec<&Child> {
        vec![&self.child]
    }
}
