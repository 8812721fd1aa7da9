// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::RemoteService;
use crate::common::{Error, WadConfig};
use crate::log::StringLogger;
use crate::memoize::{AsyncMemoize, MemoizeOptions};
use serde::Deserialize;
use std::collections::HashMap;

/// Connections are reused for ten minutes unless configured otherwise.
pub const DEFAULT_CONNECTION_EXPIRY_SECS: u64 = 600;

/// One connection per resource name, reused until it expires. Concurrent
/// requests are serialized so a burst of callers opens a single connection.
pub struct CachedConnections<S: RemoteService> {
    service: S,
    connections: AsyncMemoize<String, S::Connection>,
}

impl<S: RemoteService> CachedConnections<S> {
    /// Locked cache with the default expiry.
    pub fn new(service: S) -> Self {
        let options = MemoizeOptions {
            expiry_time: DEFAULT_CONNECTION_EXPIRY_SECS,
            num_args: None,
            locked: true,
        };
        Self::with_options(service, &options)
    }

    /// Reads `expiry_time` and `locked` from the `[memoize.<kind>]` table.
    /// Missing keys keep the defaults.
    pub fn from_config(service: S, wad_config: &WadConfig) -> Result<Self, Error> {
        #[derive(Default, Deserialize)]
        struct ConnectionToml {
            expiry_time: Option<u64>,
            locked: Option<bool>,
        }
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            memoize: HashMap<String, ConnectionToml>,
        }
        let ConfigToml { mut memoize } = wad_config.get()?;
        let ConnectionToml {
            expiry_time,
            locked,
        } = memoize.remove(service.kind()).unwrap_or_default();
        let options = MemoizeOptions {
            expiry_time: expiry_time.unwrap_or(DEFAULT_CONNECTION_EXPIRY_SECS),
            num_args: None,
            locked: locked.unwrap_or(true),
        };
        Ok(Self::with_options(service, &options))
    }

    /// Explicit options. Connections are keyed by resource name only.
    pub fn with_options(service: S, options: &MemoizeOptions) -> Self {
        let connections = AsyncMemoize::builder()
            .options(options)
            .num_args(1)
            .name(service.kind())
            .build_async();
        Self {
            service,
            connections,
        }
    }

    /// Returns the cached connection for `name`, connecting if there is none
    /// or it has expired. A failed connect is not cached. The hit or miss and
    /// any connect attempt are traced to `logger`.
    pub async fn get(&self, name: &str, logger: &StringLogger) -> Result<S::Connection, Error> {
        let service = &self.service;
        let result = self
            .connections
            .try_call_logged(&[name.to_string()], logger, || service.connect(name))
            .await;
        logger.call(format!("{} connection({name})", service.kind()), result)
    }

    /// Forgets the connection for `name` so the next `get` reconnects.
    pub fn invalidate(&self, name: &str) -> bool {
        self.connections.invalidate(&[name.to_string()])
    }

    /// Number of cached connections (fresh or stale).
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether no connection has been cached.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }
}
