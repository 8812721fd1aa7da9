// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::fmt::Display;

/// One CSV line per record, suitable for streaming as a response body.
///
/// Each record is a list of `(header, value)` pairs. Headers are not written.
/// Commas inside values become `/` so no quoting is needed.
pub fn csv_lines<H, V, R, I>(records: I) -> impl Iterator<Item = String>
where
    V: Display,
    R: IntoIterator<Item = (H, V)>,
    I: IntoIterator<Item = R>,
{
    records.into_iter().map(|record| {
        let mut line = record
            .into_iter()
            .map(|(_, value)| value.to_string().replace(',', "/"))
            .collect::<Vec<_>>()
            .join(",");
        line.push('\n');
        line
    })
}
