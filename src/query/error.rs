// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, Eq, PartialEq)]
/// Query template and parameter errors.
pub enum ExpandError {
    /// A `:name_list` token has no matching parameter.
    MissingParam(String),
    /// A `_list` parameter is not an array.
    NotAList(String),
    /// A `_list` element or `_tuple_list` tuple element is an array or an object.
    NotAScalar {
        /// Parameter name.
        name: String,
        /// Position of the element, or of the tuple holding it.
        index: usize,
    },
    /// A `_tuple_list` parameter is not an array of arrays.
    NotATupleList(String),
    /// A `_tuple_list` parameter contains a tuple with no elements.
    EmptyTuple {
        /// Parameter name.
        name: String,
        /// Position of the tuple.
        index: usize,
    },
    /// Tuples in one `_tuple_list` parameter differ in arity.
    RaggedTuples {
        /// Parameter name.
        name: String,
        /// Position of the first mismatched tuple.
        index: usize,
        /// Arity of the first tuple.
        expected: usize,
        /// Arity of the mismatched tuple.
        found: usize,
    },
    /// A `{name}` has no matching parameter.
    UnknownBrace(String),
    /// A `{` or `}` at this byte offset has no partner.
    UnbalancedBrace(usize),
    /// An upsert row shares no columns with the table.
    NoColumns(String),
}

impl Display for ExpandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::MissingParam(name) => write!(f, "{name}: missing parameter"),
            Self::NotAList(name) => write!(f, "{name}: not a list"),
            Self::NotAScalar { name, index } => write!(f, "{name}[{index}]: not a scalar"),
            Self::NotATupleList(name) => write!(f, "{name}: not a list of tuples"),
            Self::EmptyTuple { name, index } => write!(f, "{name}[{index}]: empty tuple"),
            Self::RaggedTuples {
                name,
                index,
                expected,
                found,
            } => write!(
                f,
                "{name}[{index}]: tuple has {found} elements, expected {expected}"
            ),
            Self::UnknownBrace(name) => write!(f, "{{{name}}}: missing parameter"),
            Self::UnbalancedBrace(offset) => write!(f, "unbalanced brace at {offset}"),
            Self::NoColumns(table) => write!(f, "{table}: row has no matching columns"),
        }
    }
}

impl std::error::Error for ExpandError {}
