// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(feature = "tokio")]
use super::async_memoize::AsyncInvoke;
#[cfg(feature = "tokio")]
use super::AsyncMemoize;
use super::entry::CacheTable;
use super::memoize::Invoke;
use super::{ArgsKey, Memoize};
use crate::is_default;
use crate::log::StringLogger;
use serde::{Deserialize, Serialize};
use std::hash::Hash;
use std::time::Duration;

/// Memoize settings as they appear in a `[memoize.<name>]` TOML table.
///
/// ```toml
/// [memoize.sqs]
/// expiry_time = 600
/// num_args = 1
/// locked = true
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MemoizeOptions {
    /// Seconds before an entry expires. Zero never expires.
    #[serde(skip_serializing_if = "is_default")]
    pub expiry_time: u64,
    /// How many leading arguments form the key. `None` keeps all of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_args: Option<usize>,
    /// Serialize every call through one lock.
    #[serde(skip_serializing_if = "is_default")]
    pub locked: bool,
}

/// Builder for `Memoize` and `AsyncMemoize`. Every `build` creates a fresh cache
/// and, when locked, a fresh lock.
pub struct MemoizeBuilder<A, V> {
    expiry_time: Duration,
    num_args: Option<usize>,
    locked: bool,
    seed: Vec<(ArgsKey<A>, V)>,
    name: String,
    logger: Option<StringLogger>,
}

impl<A: Clone + Eq + Hash, V: Clone> MemoizeBuilder<A, V> {
    pub(crate) fn new() -> Self {
        Self {
            expiry_time: Duration::ZERO,
            num_args: None,
            locked: false,
            seed: Vec::new(),
            name: "memoize".to_string(),
            logger: None,
        }
    }

    /// Builds a synchronous cache.
    pub fn build(self) -> Memoize<A, V> {
        let invoke = if self.locked {
            Invoke::locked()
        } else {
            Invoke::Unlocked
        };
        Memoize::from_parts(self.into_table(), invoke)
    }

    #[cfg(feature = "tokio")]
    /// Builds a cache whose operations are futures.
    pub fn build_async(self) -> AsyncMemoize<A, V> {
        let invoke = if self.locked {
            AsyncInvoke::locked()
        } else {
            AsyncInvoke::Unlocked
        };
        AsyncMemoize::from_parts(self.into_table(), invoke)
    }

    /// Entries expire after this long. `Duration::ZERO` never expires.
    pub fn expiry_time(mut self, expiry_time: Duration) -> Self {
        self.expiry_time = expiry_time;
        self
    }

    /// Entries expire after this many seconds. Zero never expires.
    pub fn expiry_secs(self, seconds: u64) -> Self {
        self.expiry_time(Duration::from_secs(seconds))
    }

    /// Serialize all calls (hits included) through one lock.
    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Trace hits, misses and expirations. The logger keeps every line for as
    /// long as the cache lives, so long-lived caches should trace per call
    /// instead (`AsyncMemoize::try_call_logged`).
    pub fn logger(mut self, logger: StringLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Prefix for log lines.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Only the first `num_args` arguments form the key.
    pub fn num_args(mut self, num_args: usize) -> Self {
        self.num_args = Some(num_args);
        self
    }

    /// Applies configured options over the current settings.
    pub fn options(self, options: &MemoizeOptions) -> Self {
        let mut builder = self.expiry_secs(options.expiry_time).locked(options.locked);
        builder.num_args = options.num_args;
        builder
    }

    /// Pre-seeds the cache. The entry is stamped when the cache is built.
    pub fn seed(mut self, args: &[A], value: V) -> Self {
        let key = ArgsKey::from_args(args, None);
        self.seed.push((key, value));
        self
    }

    fn into_table(self) -> CacheTable<A, V> {
        let num_args = self.num_args;
        let seed = self
            .seed
            .into_iter()
            .map(|(key, value)| (ArgsKey::from_args(&key.0, num_args), value))
            .collect();
        CacheTable::new(seed, self.expiry_time, num_args, self.name, self.logger)
    }
}
