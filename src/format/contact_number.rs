// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::{impl_wrapper_str, serde_str};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A dialable number with an international `00` prefix, e.g. `00971501234567`.
///
/// Parsing strips `+` and `-`. Numbers already starting with `00` are kept as
/// they are and everything else is prefixed with `00`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct ContactNumber(String);
impl_wrapper_str!(ContactNumber);
serde_str!(ContactNumber);

/// Why a contact number was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContactNumberError {
    /// Nothing left after stripping `+` and `-`.
    Empty,
    /// Something other than an ASCII digit, `+` or `-`.
    InvalidChar(char),
}

impl Display for ContactNumberError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Empty => f.write_str("empty contact number"),
            Self::InvalidChar(c) => write!(f, "invalid character {c:?} in contact number"),
        }
    }
}

impl std::error::Error for ContactNumberError {}

impl FromStr for ContactNumber {
    type Err = ContactNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut digits = String::with_capacity(s.len() + 2);
        for c in s.trim().chars() {
            match c {
                '+' | '-' => {}
                '0'..='9' => digits.push(c),
                _ => return Err(ContactNumberError::InvalidChar(c)),
            }
        }
        if digits.is_empty() {
            Err(ContactNumberError::Empty)
        } else if digits.starts_with("00") {
            Ok(Self(digits))
        } else {
            Ok(Self(format!("00{digits}")))
        }
    }
}
