// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use serde_json::Value;
use std::collections::BTreeMap;

/// Braced literal substitution.
mod braces;
/// The relational store collaborator.
mod engine;
/// Query errors.
mod error;
/// List parameter expansion.
mod expand;
/// Insert-or-update statements.
mod upsert;

pub use self::braces::{braced_names, format_braced};
pub use self::engine::{results_as_dicts, QueryEngine, QueryEngines};
pub use self::error::ExpandError;
pub use self::expand::expand;
pub use self::upsert::{insert_into, upsert_statement};

/// Named query parameters.
pub type QueryParams = BTreeMap<String, Value>;

/// A result row keyed by column name.
pub type Row = BTreeMap<String, Value>;
