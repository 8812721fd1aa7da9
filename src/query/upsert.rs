// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::{ExpandError, QueryEngine, QueryParams};
use crate::common::Error;
use crate::log::StringLogger;

/// Builds an insert-or-update statement over the columns present in both the
/// table and the row, in table order.
///
/// `INSERT INTO `t` (a, b) VALUES (:a, :b) ON DUPLICATE KEY UPDATE a=VALUES(a), b=VALUES(b)`
pub fn upsert_statement(
    table: &str,
    table_columns: &[&str],
    row: &QueryParams,
) -> Result<String, ExpandError> {
    let columns: Vec<&str> = table_columns
        .iter()
        .copied()
        .filter(|column| row.contains_key(*column))
        .collect();
    if columns.is_empty() {
        return Err(ExpandError::NoColumns(table.to_string()));
    }
    let placeholders: Vec<String> = columns.iter().map(|c| format!(":{c}")).collect();
    let updates: Vec<String> = columns.iter().map(|c| format!("{c}=VALUES({c})")).collect();
    Ok(format!(
        "INSERT INTO `{table}` ({}) VALUES ({}) ON DUPLICATE KEY UPDATE {}",
        columns.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    ))
}

/// Upserts each row and returns how many statements ran. No rows, no statements.
pub fn insert_into<E: QueryEngine + ?Sized>(
    engine: &E,
    table: &str,
    table_columns: &[&str],
    rows: &[QueryParams],
    logger: &StringLogger,
) -> Result<usize, Error> {
    for (i, row) in rows.iter().enumerate() {
        let statement = upsert_statement(table, table_columns, row)?;
        logger.call(format!("upsert {table}[{i}]"), engine.execute(&statement, row))?;
    }
    Ok(rows.len())
}
