// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Dialable contact numbers.
mod contact_number;
/// CSV line generation.
mod csv;
/// UTF-16 hex encoding.
mod hex;
/// JSON conversion.
mod json;

pub use self::contact_number::{ContactNumber, ContactNumberError};
pub use self::csv::csv_lines;
pub use self::hex::str_to_hex;
pub use self::json::to_json;
