// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Tests for [`StableRef`] and [`StableCallback`], alone and as inputs to a [`MemoizedUnit`].

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use memo_core::{
    DependencySet, InputSet, MemoizedUnit, Object, Schema, StableCallback, StableRef, Value, deps,
};

mod common;
use common::*;

#[test]
fn empty_deps_are_stable_forever() {
    let mut data = StableRef::new();
    let first = data.derive(|| Person { name: "Ravi" }, deps![]);
    for _ in 0..5 {
        let next = data.derive(|| Person { name: "Ravi" }, deps![]);
        assert!(Rc::ptr_eq(&first, &next));
    }
    assert_eq!(data.stats().computed, 1);
}

#[test]
fn same_object_twice() {
    let mut data = StableRef::new();
    let a = data.derive(|| Person { name: "Ravi" }, DependencySet::new());
    let b = data.derive(|| Person { name: "Ravi" }, DependencySet::new());
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(b.name, "Ravi");
}

#[test]
/// The reference follows its dependency, and only its dependency
fn dependency_gates_new_reference() {
    let log = ComputeLog::default();
    let mut greeting = StableRef::new();
    let mut derive = |name: &'static str| {
        let log = log.clone();
        greeting.derive(
            move || {
                log.record(name);
                format!("Hello {name}")
            },
            deps![name],
        )
    };

    let raj = derive("Raj");
    let raj_again = derive("Raj");
    let ravi = derive("Ravi");
    let ravi_again = derive("Ravi");
    let raj_later = derive("Raj");

    assert!(Rc::ptr_eq(&raj, &raj_again));
    assert!(!Rc::ptr_eq(&raj_again, &ravi));
    assert!(Rc::ptr_eq(&ravi, &ravi_again));
    // Only the previous dependencies are remembered.
    assert!(!Rc::ptr_eq(&raj, &raj_later));
    assert_eq!(log.entries(), ["Raj", "Ravi", "Raj"]);
}

#[test]
fn first_callback_is_kept() {
    let mut handler = StableCallback::<dyn Fn() -> &'static str>::new();
    let first = handler.stabilize(Rc::new(|| "first"), deps![]);
    let second = handler.stabilize(Rc::new(|| "second"), deps![]);
    let third = handler.stabilize(Rc::new(|| "third"), deps![]);

    assert!(Rc::ptr_eq(&first, &second));
    assert!(Rc::ptr_eq(&first, &third));
    assert_eq!(third(), "first");
    assert_eq!(handler.stats().skipped, 2);
}

#[test]
fn callback_follows_object_identity() {
    let mut handler = StableCallback::<dyn Fn() -> usize>::new();
    let data = Object::new(Person { name: "Ravi" });

    let a = handler.stabilize(Rc::new(|| 1), deps![data.clone()]);
    let b = handler.stabilize(Rc::new(|| 2), deps![data]);
    assert!(Rc::ptr_eq(&a, &b));

    let c = handler.stabilize(Rc::new(|| 3), deps![Object::new(Person { name: "Ravi" })]);
    assert!(!Rc::ptr_eq(&a, &c));
    assert_eq!(c(), 3);
}

#[test]
/// A stable reference lets a memoized child skip, a fresh one doesn't
fn stable_input_lets_child_skip() {
    let schema = Schema::new(["data"]).unwrap();
    let mut inline_child = MemoizedUnit::new(|_: &InputSet| ()).named("inline");
    let mut stable_child = MemoizedUnit::new(|_: &InputSet| ()).named("stable");
    let mut stable_data = StableRef::<Object>::new();

    for _pass in 0..4 {
        let inline = Object::new(Person { name: "Ravi" });
        let stable = stable_data
            .derive_value(|| Object::new(Person { name: "Ravi" }), deps![])
            .clone();
        inline_child.invoke(single(&schema, "data", inline));
        stable_child.invoke(single(&schema, "data", stable));
    }

    assert_eq!(inline_child.stats().computed, 4);
    assert_eq!(stable_child.stats().computed, 1);
}

#[test]
fn stabilized_dynamic_callback_keeps_identity() {
    let schema = Schema::new(["onAction"]).unwrap();
    let mut handler = StableCallback::<dyn Fn(&[Value]) -> Value>::new();
    let mut button = MemoizedUnit::new(|_: &InputSet| ());

    for _pass in 0..3 {
        let on_action = handler.stabilize(Rc::new(|_: &[Value]| Value::from("memo handler")), deps![]);
        let on_action = memo_core::Callback::from_rc(on_action);
        button.invoke(single(&schema, "onAction", on_action));
    }
    assert_eq!(button.stats().computed, 1);
}

#[test]
/// A panicking factory propagates, and the previous reference stays in place
fn panicking_factory_keeps_previous_reference() {
    let mut value = StableRef::<u32, u32>::new();
    let first = value.derive(|| 1, 1);

    let result = catch_unwind(AssertUnwindSafe(|| {
        value.derive(|| panic!("factory failed"), 2);
    }));
    assert!(result.is_err());

    let again = value.derive(|| unreachable!(), 1);
    assert!(Rc::ptr_eq(&first, &again));
}
