// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Memoized connections.
mod cached_connections;
/// Remote service trait.
mod remote_service;

pub use self::cached_connections::{CachedConnections, DEFAULT_CONNECTION_EXPIRY_SECS};
pub use self::remote_service::RemoteService;
