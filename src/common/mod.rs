// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

mod config;
/// An enum that encapsulates a variety of error types.
mod error;

pub use self::config::{WadConfig, WadConfigBuilder};
pub use self::error::Error;
