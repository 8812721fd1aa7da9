// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::ArgsKey;
use crate::log::StringLogger;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A cached result and the instant it was stored.
#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    /// The cached result.
    pub value: V,
    /// When the result was stored.
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Stamps `value` with the current instant.
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    /// A zero `expiry_time` never expires.
    pub fn is_fresh(&self, expiry_time: Duration) -> bool {
        expiry_time.is_zero() || self.stored_at.elapsed() < expiry_time
    }
}

/// Entries plus the settings that decide how keys are built and when entries expire.
/// The entry lock is only held for a lookup or a store, never while computing a value.
pub(crate) struct CacheTable<A, V> {
    entries: Mutex<HashMap<ArgsKey<A>, CacheEntry<V>>>,
    expiry_time: Duration,
    num_args: Option<usize>,
    name: String,
    logger: Option<StringLogger>,
}

impl<A: Clone + Eq + Hash, V: Clone> CacheTable<A, V> {
    pub(crate) fn new(
        seed: Vec<(ArgsKey<A>, V)>,
        expiry_time: Duration,
        num_args: Option<usize>,
        name: String,
        logger: Option<StringLogger>,
    ) -> Self {
        let entries = seed
            .into_iter()
            .map(|(key, value)| (key, CacheEntry::new(value)))
            .collect();
        Self {
            entries: Mutex::new(entries),
            expiry_time,
            num_args,
            name,
            logger,
        }
    }

    pub(crate) fn key(&self, args: &[A]) -> ArgsKey<A> {
        ArgsKey::from_args(args, self.num_args)
    }

    /// Returns a clone of the fresh value stored under `key`, if any.
    pub(crate) fn lookup(&self, key: &ArgsKey<A>) -> Option<V> {
        self.lookup_traced(key, self.logger.as_ref())
    }

    /// Like `lookup`, tracing to `logger` instead of the table's own logger.
    pub(crate) fn lookup_traced(&self, key: &ArgsKey<A>, logger: Option<&StringLogger>) -> Option<V> {
        let entries = self.entries();
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.expiry_time) => {
                self.trace(logger, "hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                self.trace(logger, "expired");
                None
            }
            None => {
                self.trace(logger, "miss");
                None
            }
        }
    }

    #[cfg(feature = "tokio")]
    pub(crate) fn logger(&self) -> Option<&StringLogger> {
        self.logger.as_ref()
    }

    /// Overwrites any entry under `key`.
    pub(crate) fn store(&self, key: ArgsKey<A>, value: V) {
        self.entries().insert(key, CacheEntry::new(value));
    }

    /// Calls `f` on a miss and stores its `Ok` result.
    pub(crate) fn get_or_try_insert<E>(
        &self,
        args: &[A],
        f: impl FnOnce(&[A]) -> Result<V, E>,
    ) -> Result<V, E> {
        let key = self.key(args);
        if let Some(value) = self.lookup(&key) {
            return Ok(value);
        }
        let value = f(args)?;
        self.store(key, value.clone());
        Ok(value)
    }

    pub(crate) fn invalidate(&self, args: &[A]) -> bool {
        let key = self.key(args);
        self.entries().remove(&key).is_some()
    }

    pub(crate) fn clear(&self) {
        self.entries().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    pub(crate) fn expiry_time(&self) -> Duration {
        self.expiry_time
    }

    pub(crate) fn num_args(&self) -> Option<usize> {
        self.num_args
    }

    // A panic inside a caller's operation never happens while this lock is held,
    // so a poisoned table is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<ArgsKey<A>, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn trace(&self, logger: Option<&StringLogger>, what: &str) {
        if let Some(logger) = logger {
            logger.trace(format!("{}: {what}", self.name));
        }
    }
}
