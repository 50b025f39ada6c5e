// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The one-level equality check which decides whether recomputation can be skipped.

use std::rc::Rc;
use std::sync::Arc;

/// Equality which inspects exactly one level of a value.
///
/// Primitives compare by value, while shared handles ([`Rc`], [`Arc`]) compare by identity.
/// Structured inputs (tuples, or structs using [`shallow_eq_fields`](crate::shallow_eq_fields))
/// compare field by field, applying those two rules to each field.
/// Nothing is ever compared recursively: a changed value behind an unchanged [`Rc`] is
/// invisible to this check.
///
/// Lists ([`Vec`], slices and arrays) compare their lengths, then each element shallowly.
/// Their elements are still compared one level deep, so a list of [`Rc`]s is equal only when
/// every position holds the same allocation.
///
/// References are not compared by identity. `&str` compares its contents like [`String`] does,
/// and other borrowed values should be shared through an [`Rc`] to have an identity.
pub trait ShallowEq {
    /// Whether `self` and `other` are equal enough to skip recomputation.
    fn shallow_eq(&self, other: &Self) -> bool;
}

/// Compares `prev` and `next` using their [`ShallowEq`] implementation.
pub fn shallow_equal<T: ShallowEq + ?Sized>(prev: &T, next: &T) -> bool {
    prev.shallow_eq(next)
}

/// A policy deciding whether a cached computation can be reused for new inputs.
///
/// [`Shallow`] is the default policy.
/// Any `Fn(&T, &T) -> bool` can be used as a policy, which fully replaces the
/// field-by-field comparison for the unit it is given to.
pub trait Comparator<T: ?Sized> {
    /// Whether `next` is equal to `prev`, so that the output computed for `prev` can be reused.
    fn equal(&self, prev: &T, next: &T) -> bool;
}

/// The default [`Comparator`], which delegates to [`ShallowEq`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shallow;

impl<T: ShallowEq + ?Sized> Comparator<T> for Shallow {
    fn equal(&self, prev: &T, next: &T) -> bool {
        prev.shallow_eq(next)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equal(&self, prev: &T, next: &T) -> bool {
        self(prev, next)
    }
}

/// A [`Comparator`] which never considers inputs equal, so every invocation recomputes.
///
/// This is the behaviour of a computation which isn't memoized at all.
pub fn never_equal<T: ?Sized>(_: &T, _: &T) -> bool {
    false
}

macro_rules! impl_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ShallowEq for $ty {
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    str,
    String,
);

impl ShallowEq for &str {
    fn shallow_eq(&self, other: &Self) -> bool {
        *self == *other
    }
}

/// Same-value comparison: `NaN` is equal to itself, and `0.0` is not equal to `-0.0`.
pub(crate) fn same_value(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    a == b && a.is_sign_negative() == b.is_sign_negative()
}

impl ShallowEq for f64 {
    fn shallow_eq(&self, other: &Self) -> bool {
        same_value(*self, *other)
    }
}

impl ShallowEq for f32 {
    fn shallow_eq(&self, other: &Self) -> bool {
        same_value(f64::from(*self), f64::from(*other))
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ShallowEq> ShallowEq for [T] {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.shallow_eq(b))
    }
}

impl<T: ShallowEq, const N: usize> ShallowEq for [T; N] {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.as_slice().shallow_eq(other.as_slice())
    }
}

impl<T: ShallowEq> ShallowEq for Vec<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.as_slice().shallow_eq(other.as_slice())
    }
}

macro_rules! impl_tuple {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name: ShallowEq),+> ShallowEq for ($($name,)+) {
            fn shallow_eq(&self, other: &Self) -> bool {
                $(self.$idx.shallow_eq(&other.$idx))&&+
            }
        }
    };
}

impl_tuple!(A: 0);
impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);

/// Implements [`ShallowEq`] for a struct by comparing the listed fields one by one.
///
/// Every field which can change between invocations must be listed.
///
/// ```
/// use std::rc::Rc;
/// use memo_core::{ShallowEq, shallow_eq_fields};
///
/// struct Data {
///     name: String,
/// }
///
/// struct Props {
///     title: String,
///     data: Rc<Data>,
/// }
/// shallow_eq_fields!(Props { title, data });
///
/// let data = Rc::new(Data { name: "Ravi".into() });
/// let a = Props { title: "Case 3".into(), data: Rc::clone(&data) };
/// let b = Props { title: "Case 3".into(), data };
/// assert!(a.shallow_eq(&b));
///
/// let c = Props { title: "Case 3".into(), data: Rc::new(Data { name: "Ravi".into() }) };
/// assert!(!a.shallow_eq(&c));
/// ```
#[macro_export]
macro_rules! shallow_eq_fields {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::ShallowEq for $ty {
            fn shallow_eq(&self, other: &Self) -> bool {
                true $(&& $crate::ShallowEq::shallow_eq(&self.$field, &other.$field))*
            }
        }
    };
}
