// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Skipping default values.
mod defaults;
#[cfg(feature = "chrono")]
/// Minute-precision dates and times.
pub mod minutes;
/// Deserializing `FromStr` types.
mod visitors;
/// Macros for string wrapper tuples.
mod wrappers;

pub use self::defaults::*;
pub use self::visitors::*;
