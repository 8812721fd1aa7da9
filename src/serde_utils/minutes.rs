// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Dates and times as ISO 8601 strings at minute precision.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Order {
//!     #[serde(with = "wadutils::minutes")]
//!     placed: NaiveDateTime,
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime, ParseError};
use serde::{de, Deserialize, Deserializer, Serializer};

const DATE_TIME: &str = "%Y-%m-%dT%H:%M";
const DATE: &str = "%Y-%m-%d";

/// A value with a minute-precision text form.
pub trait Minutes: Sized {
    /// `2024-01-02T03:04` for date-times, `2024-01-02` for dates.
    fn format_minutes(&self) -> String;

    /// Inverse of `format_minutes`.
    fn parse_minutes(s: &str) -> Result<Self, ParseError>;
}

impl Minutes for NaiveDateTime {
    fn format_minutes(&self) -> String {
        self.format(DATE_TIME).to_string()
    }

    fn parse_minutes(s: &str) -> Result<Self, ParseError> {
        NaiveDateTime::parse_from_str(s, DATE_TIME)
    }
}

impl Minutes for NaiveDate {
    fn format_minutes(&self) -> String {
        self.format(DATE).to_string()
    }

    fn parse_minutes(s: &str) -> Result<Self, ParseError> {
        NaiveDate::parse_from_str(s, DATE)
    }
}

/// Serializes with `format_minutes`.
pub fn serialize<T: Minutes, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.format_minutes())
}

/// Deserializes with `parse_minutes`.
pub fn deserialize<'de, T: Minutes, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
    let s = String::deserialize(deserializer)?;
    T::parse_minutes(&s).map_err(de::Error::custom)
}

/// Same, for optional fields (`#[serde(default, with = "wadutils::minutes::option")]`).
pub mod option {
    use super::Minutes;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serializes `None` as unit.
    pub fn serialize<T: Minutes, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&value.format_minutes()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `null` as `None`.
    pub fn deserialize<'de, T: Minutes, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| T::parse_minutes(&s).map_err(de::Error::custom))
            .transpose()
    }
}
