// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::entry::CacheTable;
use super::MemoizeBuilder;
use std::convert::Infallible;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// How a call reaches the cache table.
pub(crate) enum Invoke {
    /// Concurrent misses on one key may each run the operation.
    Unlocked,
    /// Lookup, operation and store all happen under one lock.
    Locked(Mutex<()>),
}

impl Invoke {
    pub(crate) fn locked() -> Self {
        Self::Locked(Mutex::new(()))
    }

    fn run<R>(&self, call: impl FnOnce() -> R) -> R {
        match self {
            Self::Unlocked => call(),
            Self::Locked(lock) => {
                // Poisoned by a panicking operation; the next caller just proceeds.
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                call()
            }
        }
    }
}

/// An in-memory cache of results keyed by the leading arguments of a call.
///
/// # Example
///
/// ```
/// use wadutils::Memoize;
///
/// let memo = Memoize::<&str, usize>::builder().expiry_secs(600).build();
/// assert_eq!(memo.call(&["orders"], |args| args[0].len()), 6);
/// // Served from the cache.
/// assert_eq!(memo.call(&["orders"], |_| unreachable!()), 6);
/// ```
pub struct Memoize<A, V> {
    table: CacheTable<A, V>,
    invoke: Invoke,
}

impl<A: Clone + Eq + Hash, V: Clone> Memoize<A, V> {
    /// Creates a builder with no expiry, all arguments in the key and no lock.
    pub fn builder() -> MemoizeBuilder<A, V> {
        MemoizeBuilder::new()
    }

    pub(crate) fn from_parts(table: CacheTable<A, V>, invoke: Invoke) -> Self {
        Self { table, invoke }
    }

    /// Returns the cached value for `args`, or calls `f` and caches its result.
    pub fn call(&self, args: &[A], f: impl FnOnce(&[A]) -> V) -> V {
        let result: Result<V, Infallible> = self.try_call(args, |args| Ok(f(args)));
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like `call`, but an `Err` from `f` is returned as is and nothing is cached.
    pub fn try_call<E>(
        &self,
        args: &[A],
        f: impl FnOnce(&[A]) -> Result<V, E>,
    ) -> Result<V, E> {
        self.invoke.run(|| self.table.get_or_try_insert(args, f))
    }

    /// Binds an operation to this cache.
    pub fn wrap<F>(self, func: F) -> Memoized<A, V, F> {
        Memoized {
            memoize: self,
            func,
        }
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.table.clear();
    }

    /// Drops the entry `args` would use. Returns `true` if there was one.
    pub fn invalidate(&self, args: &[A]) -> bool {
        self.table.invalidate(args)
    }

    /// Whether the cache holds no entries (fresh or stale).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether calls are serialized.
    pub fn is_locked(&self) -> bool {
        matches!(self.invoke, Invoke::Locked(_))
    }

    /// Number of entries (fresh or stale).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// How long entries stay fresh. Zero never expires.
    pub fn expiry_time(&self) -> Duration {
        self.table.expiry_time()
    }

    /// How many leading arguments form the key.
    pub fn num_args(&self) -> Option<usize> {
        self.table.num_args()
    }
}

/// An operation bound to its own `Memoize`, i.e. a memoized function.
///
/// ```
/// use wadutils::Memoize;
///
/// let square = Memoize::<u64, u64>::builder().num_args(1).build().wrap(|args: &[u64]| args[0] * args[0]);
/// assert_eq!(square.call(&[4, 100]), 16);
/// assert_eq!(square.call(&[4, 200]), 16);
/// ```
pub struct Memoized<A, V, F> {
    memoize: Memoize<A, V>,
    func: F,
}

impl<A: Clone + Eq + Hash, V: Clone, F> Memoized<A, V, F> {
    /// Calls the operation through the cache.
    pub fn call(&self, args: &[A]) -> V
    where
        F: Fn(&[A]) -> V,
    {
        self.memoize.call(args, &self.func)
    }

    /// Calls a fallible operation through the cache. Errors are never cached.
    pub fn try_call<E>(&self, args: &[A]) -> Result<V, E>
    where
        F: Fn(&[A]) -> Result<V, E>,
    {
        self.memoize.try_call(args, &self.func)
    }

    /// The underlying cache.
    pub fn memoize(&self) -> &Memoize<A, V> {
        &self.memoize
    }
}

impl<V: Clone> Memoize<(), V> {
    /// Zero-argument form: returns the single cached value, or computes it.
    pub fn get(&self, f: impl FnOnce() -> V) -> V {
        self.call(&[], |_| f())
    }
}
