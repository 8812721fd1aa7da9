// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(feature = "tokio")]
/// Memoize futures.
mod async_memoize;
/// Cache entries and the table that holds them.
mod entry;
/// Cache keys built from leading arguments.
mod key;
/// Memoize calls.
#[allow(clippy::module_inception)]
mod memoize;
/// Builder and TOML options.
mod options;
/// Unit tests.
mod tests;

#[cfg(feature = "tokio")]
pub use self::async_memoize::AsyncMemoize;
pub use self::entry::CacheEntry;
pub use self::key::ArgsKey;
pub use self::memoize::{Memoize, Memoized};
pub use self::options::{MemoizeBuilder, MemoizeOptions};
