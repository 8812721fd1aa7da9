// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! Memoization with expiry and locking, list parameter expansion for SQL
//! templates, and small formatting helpers used by data-access code.

/// Types common to multiple wrappers.
pub mod common;
pub use common::*;

#[cfg(feature = "format")]
/// Contact numbers, SMS hex, CSV lines and JSON.
pub mod format;
#[cfg(feature = "format")]
pub use format::*;

/// Thread-safe logging.
pub mod log;
pub use log::*;

/// Caches function results by argument, with optional expiry and locking.
pub mod memoize;
pub use memoize::*;

#[cfg(feature = "query")]
/// Expands `_list` and `_tuple_list` placeholders and runs queries.
pub mod query;
#[cfg(feature = "query")]
pub use query::*;

#[cfg(feature = "remote")]
/// Cached connections to remote services.
pub mod remote;
#[cfg(feature = "remote")]
pub use remote::*;

/// Macros used with `serde` serialization and deserialization.
pub mod serde_utils;
pub use serde_utils::*;
