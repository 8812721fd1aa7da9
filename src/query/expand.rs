// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{ExpandError, QueryParams};
use serde_json::Value;
use std::collections::HashMap;
use std::ops::Range;

const LIST_SUFFIX: &str = "_list";
const TUPLE_LIST_SUFFIX: &str = "_tuple_list";

/// Byte ranges of `:name_list` tokens, each covering the marker and the name.
///
/// A token is a `:` followed by the longest run of ASCII letters and
/// underscores. It counts only if that run ends in `_list` (with at least one
/// character before the suffix), the `:` is not part of a `::` cast, and the
/// run is not continued by a digit.
pub(crate) fn list_tokens(query: &str) -> Vec<Range<usize>> {
    let bytes = query.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b':' {
            i += 1;
            continue;
        }
        let mut end = i + 1;
        while end < bytes.len() && (bytes[end].is_ascii_alphabetic() || bytes[end] == b'_') {
            end += 1;
        }
        let name = &query[i + 1..end];
        let cast = i > 0 && bytes[i - 1] == b':';
        let continued = end < bytes.len() && bytes[end].is_ascii_digit();
        if !cast && !continued && name.len() > LIST_SUFFIX.len() && name.ends_with(LIST_SUFFIX) {
            tokens.push(i..end);
        }
        i = end;
    }
    tokens
}

/// Expands `:name_list` and `:name_tuple_list` tokens into scalar placeholders.
///
/// `:ids_list` with `ids_list = [1, 2, 3]` becomes `(:ids_list_0, :ids_list_1, :ids_list_2)`
/// and the parameters `ids_list_0`, `ids_list_1`, `ids_list_2`. `:pairs_tuple_list` with
/// `[[1, 2], [3, 4]]` becomes `((:pairs_tuple_list_0_0, :pairs_tuple_list_0_1),
/// (:pairs_tuple_list_1_0, :pairs_tuple_list_1_1))`. An empty list becomes `(null)`.
///
/// The token supplies its own parentheses, so templates write `WHERE id IN :ids_list`.
/// Text that does not form a token is left alone.
pub fn expand(query: &str, mut params: QueryParams) -> Result<(String, QueryParams), ExpandError> {
    let tokens = list_tokens(query);
    let mut names: Vec<&str> = Vec::new();
    for range in &tokens {
        let name = &query[range.start + 1..range.end];
        if !names.contains(&name) {
            names.push(name);
        }
    }

    let mut replacements: HashMap<&str, String> = HashMap::new();
    for &name in names.iter().filter(|name| name.ends_with(TUPLE_LIST_SUFFIX)) {
        let placeholders = expand_tuple_list(name, &mut params)?;
        replacements.insert(name, placeholders);
    }
    for &name in names.iter().filter(|name| !name.ends_with(TUPLE_LIST_SUFFIX)) {
        let placeholders = expand_list(name, &mut params)?;
        replacements.insert(name, placeholders);
    }

    let mut rewritten = String::with_capacity(query.len());
    let mut copied = 0;
    for range in tokens {
        let name = &query[range.start + 1..range.end];
        rewritten.push_str(&query[copied..range.start]);
        rewritten.push('(');
        rewritten.push_str(&replacements[name]);
        rewritten.push(')');
        copied = range.end;
    }
    rewritten.push_str(&query[copied..]);
    Ok((rewritten, params))
}

fn expand_list(name: &str, params: &mut QueryParams) -> Result<String, ExpandError> {
    let items = match params.remove(name) {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ExpandError::NotAList(name.to_string())),
        None => return Err(ExpandError::MissingParam(name.to_string())),
    };
    if let Some(index) = items.iter().position(|item| !is_scalar(item)) {
        return Err(ExpandError::NotAScalar {
            name: name.to_string(),
            index,
        });
    }
    let placeholders: Vec<String> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let key = format!("{name}_{i}");
            let placeholder = format!(":{key}");
            params.insert(key, item);
            placeholder
        })
        .collect();
    Ok(join_or_null(placeholders))
}

fn expand_tuple_list(name: &str, params: &mut QueryParams) -> Result<String, ExpandError> {
    let items = match params.remove(name) {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ExpandError::NotATupleList(name.to_string())),
        None => return Err(ExpandError::MissingParam(name.to_string())),
    };
    let mut tuples = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let Value::Array(tuple) = item else {
            return Err(ExpandError::NotATupleList(name.to_string()));
        };
        if tuple.is_empty() {
            return Err(ExpandError::EmptyTuple {
                name: name.to_string(),
                index: i,
            });
        }
        if !tuple.iter().all(is_scalar) {
            return Err(ExpandError::NotAScalar {
                name: name.to_string(),
                index: i,
            });
        }
        if let Some(first) = tuples.first().map(Vec::len) {
            if tuple.len() != first {
                return Err(ExpandError::RaggedTuples {
                    name: name.to_string(),
                    index: i,
                    expected: first,
                    found: tuple.len(),
                });
            }
        }
        tuples.push(tuple);
    }

    // Validated before any parameter is inserted.
    let groups: Vec<String> = tuples
        .into_iter()
        .enumerate()
        .map(|(i, tuple)| {
            let placeholders: Vec<String> = tuple
                .into_iter()
                .enumerate()
                .map(|(j, element)| {
                    let key = format!("{name}_{i}_{j}");
                    let placeholder = format!(":{key}");
                    params.insert(key, element);
                    placeholder
                })
                .collect();
            format!("({})", placeholders.join(", "))
        })
        .collect();
    Ok(join_or_null(groups))
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn join_or_null(parts: Vec<String>) -> String {
    if parts.is_empty() {
        "null".to_string()
    } else {
        parts.join(", ")
    }
}
