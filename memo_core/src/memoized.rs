// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Caching the output of a computation against the inputs it was computed from.

use core::convert::Infallible;
use core::fmt;

use crate::{Comparator, Shallow, ShallowEq};

/// How often a [`Memo`] recomputed, and how often it reused its cached output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// The number of times the computation ran.
    pub computed: u64,
    /// The number of invocations answered from the cache.
    pub skipped: u64,
}

/// The most recent inputs of a [`Memo`], and the output computed from them.
///
/// Both are always replaced together.
#[derive(Debug)]
pub struct CacheEntry<I, O> {
    inputs: I,
    output: O,
}

impl<I, O> CacheEntry<I, O> {
    /// The inputs `output` was computed from.
    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// The cached output.
    pub fn output(&self) -> &O {
        &self.output
    }
}

/// A cache of one computation's last inputs and output.
///
/// A `Memo` starts out empty. The first lookup always computes. Every later lookup asks the
/// [`Comparator`] (by default [`Shallow`]) whether the new inputs are equal to the cached ones:
/// if so, the cached output is returned and the computation is not called at all.
/// Otherwise the computation runs, and its inputs and output replace the cache.
///
/// The computation is passed in on each lookup, which makes a `Memo` suitable for embedding
/// in a larger structure. [`MemoizedUnit`] owns its computation instead.
pub struct Memo<I, O, C = Shallow> {
    entry: Option<CacheEntry<I, O>>,
    comparator: C,
    stats: MemoStats,
    label: &'static str,
}

impl<I, O> Memo<I, O>
where
    I: ShallowEq,
{
    /// Creates an empty cache using the [`Shallow`] policy.
    pub fn new() -> Self {
        Self::with_comparator(Shallow)
    }
}

impl<I, O> Default for Memo<I, O>
where
    I: ShallowEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O, C> Memo<I, O, C>
where
    C: Comparator<I>,
{
    /// Creates an empty cache which uses `comparator` in place of the shallow policy.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            entry: None,
            comparator,
            stats: MemoStats::default(),
            label: "memo",
        }
    }

    /// Sets the label used when logging this cache's decisions.
    pub fn named(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Returns the cached output if `inputs` are equal to the cached inputs, otherwise runs
    /// `compute` and caches its result.
    pub fn get_or_compute(&mut self, inputs: I, compute: impl FnOnce(&I) -> O) -> &O {
        match self.try_get_or_compute(inputs, |inputs| Ok::<_, Infallible>(compute(inputs))) {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// As [`get_or_compute`](Self::get_or_compute), for a computation which can fail.
    ///
    /// If `compute` fails the error is returned unchanged, and the previous cache entry
    /// (if any) is kept, so a later lookup with the old inputs still skips.
    pub fn try_get_or_compute<E>(
        &mut self,
        inputs: I,
        compute: impl FnOnce(&I) -> Result<O, E>,
    ) -> Result<&O, E> {
        // A hit is taken out and put straight back. A miss leaves the old entry in place
        // until `compute` has returned successfully.
        let comparator = &self.comparator;
        let entry = match self
            .entry
            .take_if(|entry| comparator.equal(&entry.inputs, &inputs))
        {
            Some(entry) => {
                self.stats.skipped += 1;
                tracing::trace!(label = self.label, "inputs unchanged, reusing cached output");
                entry
            }
            None => {
                let output = compute(&inputs)?;
                self.stats.computed += 1;
                tracing::trace!(
                    label = self.label,
                    first = self.entry.is_none(),
                    "inputs changed, recomputed"
                );
                CacheEntry { inputs, output }
            }
        };
        Ok(&self.entry.insert(entry).output)
    }
}

impl<I, O, C> Memo<I, O, C> {
    /// Whether this cache holds an entry.
    pub fn is_cached(&self) -> bool {
        self.entry.is_some()
    }

    /// The current cache entry, if any.
    pub fn entry(&self) -> Option<&CacheEntry<I, O>> {
        self.entry.as_ref()
    }

    /// The cached output, if any.
    pub fn cached_output(&self) -> Option<&O> {
        self.entry.as_ref().map(CacheEntry::output)
    }

    /// Discards the cache entry, so that the next lookup computes unconditionally.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// How often this cache computed and skipped so far.
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    /// The label used when logging.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<I: fmt::Debug, O: fmt::Debug, C> fmt::Debug for Memo<I, O, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("label", &self.label)
            .field("entry", &self.entry)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// A computation wrapped together with a [`Memo`] of its last inputs and output.
///
/// `compute` is assumed to be pure with respect to its inputs: calling [`invoke`](Self::invoke)
/// with equal inputs twice only runs it once, and the second call returns the first output.
///
/// ```
/// use memo_core::MemoizedUnit;
///
/// let mut calls = 0;
/// let mut greeting = MemoizedUnit::new(|name: &String| {
///     calls += 1;
///     format!("Hello {name}")
/// });
/// assert_eq!(greeting.invoke("Raj".to_string()), "Hello Raj");
/// assert_eq!(greeting.invoke("Raj".to_string()), "Hello Raj");
/// assert_eq!(greeting.stats().computed, 1);
/// assert_eq!(greeting.stats().skipped, 1);
/// drop(greeting);
/// assert_eq!(calls, 1);
/// ```
pub struct MemoizedUnit<I, O, F, C = Shallow> {
    memo: Memo<I, O, C>,
    compute: F,
}

impl<I, O, F> MemoizedUnit<I, O, F>
where
    I: ShallowEq,
    F: FnMut(&I) -> O,
{
    /// Wraps `compute`, using the [`Shallow`] policy.
    pub fn new(compute: F) -> Self {
        Self {
            memo: Memo::new(),
            compute,
        }
    }
}

impl<I, O, F, C> MemoizedUnit<I, O, F, C>
where
    F: FnMut(&I) -> O,
    C: Comparator<I>,
{
    /// Wraps `compute`, using `comparator` in place of the shallow policy.
    pub fn with_comparator(compute: F, comparator: C) -> Self {
        Self {
            memo: Memo::with_comparator(comparator),
            compute,
        }
    }

    /// Sets the label used when logging this unit's decisions.
    pub fn named(mut self, label: &'static str) -> Self {
        self.memo = self.memo.named(label);
        self
    }

    /// Returns the output for `inputs`, computing it only if they differ from the previous inputs.
    pub fn invoke(&mut self, inputs: I) -> &O {
        let compute = &mut self.compute;
        self.memo.get_or_compute(inputs, |inputs| compute(inputs))
    }
}

impl<I, O, F, C> MemoizedUnit<I, O, F, C> {

    /// Whether this unit has computed at least once since creation or the last [`clear`](Self::clear).
    pub fn is_cached(&self) -> bool {
        self.memo.is_cached()
    }

    /// The output of the last computation, if any.
    pub fn cached_output(&self) -> Option<&O> {
        self.memo.cached_output()
    }

    /// Discards the cache, so that the next invocation computes unconditionally.
    pub fn clear(&mut self) {
        self.memo.clear();
    }

    /// How often `compute` ran, and how often it was skipped.
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }

    /// The label used when logging.
    pub fn label(&self) -> &'static str {
        self.memo.label()
    }
}

impl<I: fmt::Debug, O: fmt::Debug, F, C> fmt::Debug for MemoizedUnit<I, O, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoizedUnit")
            .field("memo", &self.memo)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_lookup_computes() {
        let mut memo = Memo::<u32, u32>::new();
        assert!(!memo.is_cached());
        assert_eq!(*memo.get_or_compute(2, |n| n * 10), 20);
        assert!(memo.is_cached());
        assert_eq!(memo.entry().map(|e| *e.inputs()), Some(2));
    }

    #[test]
    fn equal_inputs_skip() {
        let mut memo = Memo::<u32, u32>::new();
        memo.get_or_compute(2, |n| n * 10);
        assert_eq!(*memo.get_or_compute(2, |_| unreachable!()), 20);
        assert_eq!(
            memo.stats(),
            MemoStats {
                computed: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn failed_compute_keeps_cache() {
        let mut memo = Memo::<u32, u32>::new();
        memo.get_or_compute(2, |n| n * 10);
        let result = memo.try_get_or_compute(3, |_| Err("boom"));
        assert_eq!(result, Err("boom"));
        assert_eq!(memo.entry().map(|e| (*e.inputs(), *e.output())), Some((2, 20)));
        assert_eq!(memo.stats().computed, 1);
        assert_eq!(*memo.get_or_compute(2, |_| unreachable!()), 20);
    }

    #[test]
    /// A skipped lookup leaves the entry in place for the lookup after it
    fn repeated_hits_keep_entry() {
        let mut memo = Memo::<u32, String>::new();
        memo.get_or_compute(1, |n| n.to_string());
        for _ in 0..3 {
            assert_eq!(memo.get_or_compute(1, |_| unreachable!()), "1");
            assert!(memo.is_cached());
        }
        assert_eq!(memo.stats().skipped, 3);
    }

    #[test]
    fn clear_returns_to_empty() {
        let mut memo = Memo::<u32, u32>::new().named("cleared");
        memo.get_or_compute(1, |n| *n);
        memo.clear();
        assert!(!memo.is_cached());
        memo.get_or_compute(1, |n| *n);
        assert_eq!(memo.stats().computed, 2);
        assert_eq!(memo.label(), "cleared");
    }
}
