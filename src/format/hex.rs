// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Encodes text for SMS gateways that take UCS-2 hex: every UTF-16 unit as four
/// uppercase hex digits, then `000A`. A `u'...'` wrapper is removed first.
///
/// ```
/// assert_eq!(wadutils::str_to_hex("Hi"), "00480069000A");
/// ```
pub fn str_to_hex(text: &str) -> String {
    let text = text
        .strip_prefix("u'")
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);
    text.encode_utf16()
        .chain(std::iter::once(0x000A))
        .map(|unit| format!("{unit:04X}"))
        .collect::<String>()
}
