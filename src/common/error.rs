// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt::{Display, Formatter};

#[cfg(feature = "query")]
use crate::query::ExpandError;

#[derive(Debug)]
/// An enum that encapsulates a variety of error types.
///
/// # Example
///
/// Error::Remote(format!("connect({name}): refused"))
pub enum Error {
    #[cfg(feature = "query")]
    /// Query template or parameter error
    Expand(ExpandError),
    /// Failure reported by a remote collaborator, with context
    Remote(String),
    /// Configuration (TOML) error
    Toml(String),
    /// String error.
    String(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            #[cfg(feature = "query")]
            Error::Expand(e) => Display::fmt(&format!("expand: {e}"), f),
            Error::Remote(s) => Display::fmt(&format!("remote: {s}"), f),
            Error::Toml(s) => Display::fmt(&format!("toml: {s}"), f),
            Error::String(s) => Display::fmt(&s, f),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(feature = "query")]
impl From<ExpandError> for Error {
    fn from(e: ExpandError) -> Self {
        Error::Expand(e)
    }
}
