// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use async_trait::async_trait;

/// A remote system reached through a named resource, such as a bucket or a queue.
#[async_trait]
pub trait RemoteService {
    /// A cheaply cloned handle, usually an `Arc` around a vendor client.
    type Connection: Clone + Send + Sync;

    /// Short name used for configuration (`[memoize.<kind>]`) and log lines.
    fn kind(&self) -> &str;

    /// Opens a connection to the named resource.
    async fn connect(&self, name: &str) -> Result<Self::Connection, Error>;
}
