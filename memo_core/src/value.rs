// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Dynamically typed input values, for inputs whose shape is only known at runtime.

use core::any::Any;
use core::fmt;
use std::rc::Rc;

use anymore::AnyDebug;

use crate::ShallowEq;
use crate::equality::same_value;

/// A handle to a shared object, compared by identity.
///
/// Cloning an `Object` shares the underlying allocation, so the clone is identical to the original.
/// Two objects created separately with [`Object::new`] are never identical, even if their contents are equal.
#[derive(Clone)]
pub struct Object(Rc<dyn AnyDebug>);

impl Object {
    /// Allocates `value` behind a new identity.
    ///
    /// `value` doesn't need to be `Send`, so it can itself hold [`Rc`]s.
    pub fn new<T: AnyDebug>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Wraps an existing shared allocation, keeping its identity.
    pub fn from_rc<T: AnyDebug>(value: Rc<T>) -> Self {
        Self(value)
    }

    /// Whether `self` and `other` refer to the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Access the contained value, if it is of type `T`.
    pub fn downcast_ref<T: AnyDebug>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Object").field(&self.0).finish()
    }
}

type CallbackFn = dyn Fn(&[Value]) -> Value;

/// A handle to a shared function, compared by identity.
///
/// As with [`Object`], a freshly created callback is never identical to an earlier one,
/// even if it was created from the same closure expression.
#[derive(Clone)]
pub struct Callback(Rc<CallbackFn>);

impl Callback {
    /// Allocates `f` behind a new identity.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    /// Wraps an existing shared function, keeping its identity.
    pub fn from_rc(f: Rc<CallbackFn>) -> Self {
        Self(f)
    }

    /// Calls the function with `args`.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Whether `self` and `other` refer to the same function allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// A single field of an [`InputSet`](crate::InputSet) or [`DependencySet`](crate::DependencySet).
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value was given.
    #[default]
    Undefined,
    /// An explicitly empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number, compared with same-value semantics.
    Number(f64),
    /// A string, compared by contents.
    Str(Rc<str>),
    /// A shared object, compared by identity.
    Object(Object),
    /// A shared function, compared by identity.
    Function(Callback),
}

impl Value {
    /// The string contents, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// The number, if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The object handle, if this is a [`Value::Object`].
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The function handle, if this is a [`Value::Function`].
    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Whether this is [`Value::Null`] or [`Value::Undefined`].
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }
}

impl ShallowEq for Value {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => same_value(*a, *b),
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Callback> for Value {
    fn from(value: Callback) -> Self {
        Self::Function(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Debug)]
    struct Data {
        name: &'static str,
    }

    #[test]
    /// Objects are single-threaded, so they may hold other `Rc`s
    fn object_can_hold_shared_state() {
        let shared = Rc::new(RefCell::new(vec!["Ravi"]));
        let object = Object::new(Rc::clone(&shared));
        shared.borrow_mut().push("Raj");
        let held = object.downcast_ref::<Rc<RefCell<Vec<&str>>>>().map(|list| list.borrow().len());
        assert_eq!(held, Some(2));
    }

    #[test]
    fn strings_compare_by_contents() {
        assert!(Value::from("Raj").shallow_eq(&Value::from(String::from("Raj"))));
        assert!(!Value::from("Raj").shallow_eq(&Value::from("Ravi")));
    }

    #[test]
    fn different_variants_are_unequal() {
        assert!(!Value::Null.shallow_eq(&Value::Undefined));
        assert!(!Value::from(1).shallow_eq(&Value::from("1")));
        assert!(!Value::from(0).shallow_eq(&Value::Bool(false)));
    }

    #[test]
    fn objects_compare_by_identity() {
        let a = Object::new(Data { name: "Ravi" });
        let b = Object::new(Data { name: "Ravi" });
        assert!(Value::from(a.clone()).shallow_eq(&Value::from(a.clone())));
        assert!(!Value::from(a.clone()).shallow_eq(&Value::from(b)));
        assert_eq!(a.downcast_ref::<Data>().map(|d| d.name), Some("Ravi"));
        assert!(a.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn from_rc_keeps_identity() {
        let shared = Rc::new(RefCell::new(1_u32));
        let a = Object::from_rc(Rc::clone(&shared));
        let b = Object::from_rc(shared);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn callbacks_compare_by_identity() {
        let make = || Callback::new(|_| Value::Undefined);
        let a = make();
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&make()));
        let echo = Callback::new(|args| args.first().cloned().unwrap_or_default());
        assert_eq!(echo.call(&[Value::from("hi")]).as_str(), Some("hi"));
    }

    #[test]
    fn none_is_null() {
        assert!(Value::from(None::<bool>).is_nullish());
        assert_eq!(Value::from(Some(true)).as_bool(), Some(true));
    }
}
