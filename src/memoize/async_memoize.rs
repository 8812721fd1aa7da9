// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::entry::CacheTable;
use super::MemoizeBuilder;
use crate::log::StringLogger;
use std::convert::Infallible;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

/// How an async call reaches the cache table.
pub(crate) enum AsyncInvoke {
    /// Concurrent misses on one key may each await the operation.
    Unlocked,
    /// Lookup, operation and store all happen while holding one async lock.
    Locked(Mutex<()>),
}

impl AsyncInvoke {
    pub(crate) fn locked() -> Self {
        Self::Locked(Mutex::new(()))
    }

    /// Waits for the call lock, if there is one. Held until the guard drops.
    async fn enter(&self) -> Option<MutexGuard<'_, ()>> {
        match self {
            Self::Unlocked => None,
            Self::Locked(lock) => Some(lock.lock().await),
        }
    }
}

/// Like `Memoize`, but the operation is a future. When locked, waiting callers
/// await the lock instead of blocking a runtime thread.
pub struct AsyncMemoize<A, V> {
    table: CacheTable<A, V>,
    invoke: AsyncInvoke,
}

impl<A: Clone + Eq + Hash, V: Clone> AsyncMemoize<A, V> {
    /// Creates a builder; finish it with `build_async`.
    pub fn builder() -> MemoizeBuilder<A, V> {
        MemoizeBuilder::new()
    }

    pub(crate) fn from_parts(table: CacheTable<A, V>, invoke: AsyncInvoke) -> Self {
        Self { table, invoke }
    }

    /// Returns the cached value for `args`, or awaits `f()` and caches its result.
    pub async fn call<F, Fut>(&self, args: &[A], f: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let result: Result<V, Infallible> = self.try_call(args, || async { Ok(f().await) }).await;
        match result {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Like `call`, but an `Err` is returned as is and nothing is cached.
    pub async fn try_call<E, F, Fut>(&self, args: &[A], f: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.invoke_traced(args, self.table.logger(), f).await
    }

    /// Like `try_call`, but hits and misses are traced to `logger` for this
    /// call only.
    pub async fn try_call_logged<E, F, Fut>(
        &self,
        args: &[A],
        logger: &StringLogger,
        f: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        self.invoke_traced(args, Some(logger), f).await
    }

    async fn invoke_traced<E, F, Fut>(
        &self,
        args: &[A],
        logger: Option<&StringLogger>,
        f: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let _guard = self.invoke.enter().await;
        let key = self.table.key(args);
        if let Some(value) = self.table.lookup_traced(&key, logger) {
            return Ok(value);
        }
        let value = f().await?;
        self.table.store(key, value.clone());
        Ok(value)
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
        matches!(self.invoke, AsyncInvoke::Locked(_))
    }

    /// Number of entries (fresh or stale).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// How long entries stay fresh. Zero never expires.
    pub fn expiry_time(&self) -> Duration {
        self.table.expiry_time()
    }
}
