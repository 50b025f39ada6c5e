// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! References which keep their identity until their dependencies change.
//!
//! Identity-compared inputs (see [`ShallowEq`]) defeat memoization when they are recreated on
//! every pass. [`StableRef`] and [`StableCallback`] hand out the same [`Rc`] for as long as
//! their dependencies are unchanged, so they can be passed to a [`MemoizedUnit`](crate::MemoizedUnit)
//! without forcing it to recompute.

use core::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::{Memo, MemoStats, ShallowEq, Value};

/// The values a derived reference depends on, compared position by position.
///
/// Sets of different lengths are never equal. An empty set depends on nothing.
#[derive(Clone, Debug, Default)]
pub struct DependencySet(SmallVec<[Value; 4]>);

impl DependencySet {
    /// An empty set, which depends on nothing.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Appends a dependency.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    /// The dependencies, in order.
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// The number of dependencies.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this set depends on nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ShallowEq for DependencySet {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.as_slice().shallow_eq(other.as_slice())
    }
}

impl From<Vec<Value>> for DependencySet {
    fn from(values: Vec<Value>) -> Self {
        Self(SmallVec::from_vec(values))
    }
}

impl<const N: usize> From<[Value; N]> for DependencySet {
    fn from(values: [Value; N]) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<Value> for DependencySet {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Creates a [`DependencySet`] from values convertible into [`Value`].
///
/// `deps![]` depends on nothing.
#[macro_export]
macro_rules! deps {
    () => {
        $crate::DependencySet::new()
    };
    ($($dep:expr),+ $(,)?) => {
        <$crate::DependencySet as ::core::iter::FromIterator<$crate::Value>>::from_iter([
            $($crate::Value::from($dep)),+
        ])
    };
}

/// A derived value which is only recreated when its dependencies change.
///
/// The dependencies can be a [`DependencySet`], or any other [`ShallowEq`] type, such as a
/// tuple of typed values. `()` depends on nothing.
///
/// ```
/// use std::rc::Rc;
/// use memo_core::{StableRef, deps};
///
/// let mut data = StableRef::new();
/// let first = data.derive(|| String::from("Ravi"), deps![]);
/// let second = data.derive(|| String::from("Ravi"), deps![]);
/// assert!(Rc::ptr_eq(&first, &second));
/// ```
pub struct StableRef<T, D = DependencySet> {
    memo: Memo<D, Rc<T>>,
}

impl<T, D: ShallowEq> StableRef<T, D> {
    /// Creates a reference with no value yet.
    pub fn new() -> Self {
        Self {
            memo: Memo::new().named("stable_ref"),
        }
    }

    /// Sets the label used when logging.
    pub fn named(mut self, label: &'static str) -> Self {
        self.memo = self.memo.named(label);
        self
    }

    /// Returns the stored reference if `deps` are equal to the previous dependencies,
    /// otherwise calls `factory` and stores its result as the new reference.
    pub fn derive(&mut self, factory: impl FnOnce() -> T, deps: D) -> Rc<T> {
        Rc::clone(self.memo.get_or_compute(deps, |_| Rc::new(factory())))
    }

    /// As [`derive`](Self::derive), but borrows the stored value instead of sharing it.
    ///
    /// This suits cached derived values whose identity is not needed, such as the result of
    /// an expensive calculation, or values which are themselves handles.
    pub fn derive_value(&mut self, factory: impl FnOnce() -> T, deps: D) -> &T {
        self.memo.get_or_compute(deps, |_| Rc::new(factory()))
    }

    /// Whether a reference has been derived yet.
    pub fn is_cached(&self) -> bool {
        self.memo.is_cached()
    }

    /// How often `factory` ran, and how often the stored reference was reused.
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }
}

impl<T, D: ShallowEq> Default for StableRef<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, D: fmt::Debug> fmt::Debug for StableRef<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StableRef").field("memo", &self.memo).finish()
    }
}

/// A function reference which keeps its identity until its dependencies change.
///
/// Each call to [`stabilize`](Self::stabilize) passes the current function, which is only
/// adopted when the dependencies have changed. Otherwise it is dropped, and the function
/// captured earlier is returned.
///
/// `F` is usually a trait object such as `dyn Fn()`, since each closure expression has its own type.
pub struct StableCallback<F: ?Sized, D = DependencySet> {
    memo: Memo<D, Rc<F>>,
}

impl<F: ?Sized, D: ShallowEq> StableCallback<F, D> {
    /// Creates a callback slot with no function yet.
    pub fn new() -> Self {
        Self {
            memo: Memo::new().named("stable_callback"),
        }
    }

    /// Sets the label used when logging.
    pub fn named(mut self, label: &'static str) -> Self {
        self.memo = self.memo.named(label);
        self
    }

    /// Returns the stored function if `deps` are equal to the previous dependencies,
    /// otherwise stores and returns `f`.
    pub fn stabilize(&mut self, f: Rc<F>, deps: D) -> Rc<F> {
        Rc::clone(self.memo.get_or_compute(deps, |_| f))
    }

    /// Whether a function has been stored yet.
    pub fn is_cached(&self) -> bool {
        self.memo.is_cached()
    }

    /// How often a new function was adopted, and how often the stored one was reused.
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }
}

impl<F: ?Sized, D: ShallowEq> Default for StableCallback<F, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized, D: fmt::Debug> fmt::Debug for StableCallback<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let deps = self.memo.entry().map(|entry| entry.inputs());
        f.debug_struct("StableCallback")
            .field("label", &self.memo.label())
            .field("deps", &deps)
            .field("stats", &self.memo.stats())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deps_compare_positionally() {
        assert!(deps![1, "a"].shallow_eq(&deps![1, "a"]));
        assert!(!deps![1, "a"].shallow_eq(&deps!["a", 1]));
        assert!(!deps![1].shallow_eq(&deps![1, 1]));
        assert!(deps![].shallow_eq(&DependencySet::new()));
    }

    #[test]
    fn deps_convert_from_lists() {
        let from_vec = DependencySet::from(vec![Value::from(1), Value::from("a")]);
        let from_array = DependencySet::from([Value::from(1), Value::from("a")]);
        assert_eq!(from_vec.len(), 2);
        assert!(from_vec.shallow_eq(&from_array));
        assert!(from_array.shallow_eq(&deps![1, "a"]));
        assert!(DependencySet::from(Vec::new()).is_empty());
    }

    #[test]
    fn typed_deps_work() {
        let mut total = StableRef::<u32, (u32, u32)>::new();
        let a = total.derive(|| 3, (1, 2));
        let b = total.derive(|| unreachable!(), (1, 2));
        assert!(Rc::ptr_eq(&a, &b));
        let c = total.derive(|| 4, (1, 3));
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(*c, 4);
    }

    #[test]
    fn derive_value_borrows() {
        let mut sum = StableRef::<u64, ()>::new();
        assert_eq!(*sum.derive_value(|| (1..=10).sum(), ()), 55);
        assert_eq!(*sum.derive_value(|| unreachable!(), ()), 55);
        assert_eq!(sum.stats().skipped, 1);
    }

    #[test]
    fn callback_adopts_new_function_when_deps_change() {
        let mut handler = StableCallback::<dyn Fn() -> u32>::new();
        let first = handler.stabilize(Rc::new(|| 1), deps![1]);
        let second = handler.stabilize(Rc::new(|| 2), deps![2]);
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(second(), 2);
    }

    #[test]
    fn callback_debug_shows_deps() {
        let mut handler = StableCallback::<dyn Fn()>::new().named("on_click");
        handler.stabilize(Rc::new(|| {}), deps![7]);
        let debug = format!("{handler:?}");
        assert!(debug.contains("on_click"), "{debug}");
        assert!(debug.contains("Number(7.0)"), "{debug}");
    }
}
