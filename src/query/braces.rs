// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{ExpandError, QueryParams};
use serde_json::Value;

/// Replaces each `{name}` with the literal text of `params[name]`.
///
/// Strings are inserted raw (for identifiers such as table names that cannot be
/// bound), other values in their JSON form. `{{` and `}}` produce literal braces.
pub fn format_braced(query: &str, params: &QueryParams) -> Result<String, ExpandError> {
    let mut result = String::with_capacity(query.len());
    let mut chars = query.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                chars.next();
                result.push('{');
            }
            '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                chars.next();
                result.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, ch) in chars.by_ref() {
                    if ch == '}' {
                        closed = true;
                        break;
                    }
                    name.push(ch);
                }
                if !closed {
                    return Err(ExpandError::UnbalancedBrace(offset));
                }
                match params.get(&name) {
                    Some(Value::String(s)) => result.push_str(s),
                    Some(value) => result.push_str(&value.to_string()),
                    None => return Err(ExpandError::UnknownBrace(name)),
                }
            }
            '}' => return Err(ExpandError::UnbalancedBrace(offset)),
            _ => result.push(ch),
        }
    }
    Ok(result)
}

/// Returns the distinct braced names which appear in a query, in order.  For example, `{table}`.
pub fn braced_names(query: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut name = String::new();
    let mut parsing_name = false;
    let mut chars = query.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' if !parsing_name && chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' if !parsing_name => parsing_name = true,
            '}' if parsing_name => {
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name.clone());
                }
                name.clear();
                parsing_name = false;
            }
            _ => {
                if parsing_name {
                    name.push(ch);
                }
            }
        }
    }
    names
}
