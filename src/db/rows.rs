// src/db/rows.rs

//! Runs a prepared query and scans every row into a typed record.

use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// SQL text plus its positional parameters, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// A record that can be read from a row, column by column in select order.
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// Execute `query` and map every row, preserving database row order.
///
/// The first row that fails to scan aborts the whole call; callers never see
/// a partial result. The statement and its cursor are dropped on every path.
pub fn query_rows<T: FromRow>(conn: &Connection, query: &BuiltQuery) -> Result<Vec<T>, ServerError> {
    let mut stmt = conn.prepare(&query.sql)?;
    let mut rows = stmt.query(params_from_iter(query.params.iter()))?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(T::from_row(row)?);
    }
    Ok(out)
}
