// src/db/rentals.rs

use crate::db::connection::Database;
use crate::db::rows::{query_rows, BuiltQuery, FromRow};
use crate::domain::property::RentalSample;
use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::Row;

pub const SAMPLE_LIMIT: i64 = 50;

impl FromRow for RentalSample {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RentalSample { price: row.get(0)? })
    }
}

/// First few rental prices, enough to confirm the service can reach its data.
pub fn sample_rentals(db: &Database) -> Result<Vec<RentalSample>, ServerError> {
    let query = BuiltQuery::new(
        "SELECT price FROM tbl_rentals ORDER BY id LIMIT ?1",
        vec![Value::Integer(SAMPLE_LIMIT)],
    );
    db.with_conn(|conn| query_rows(conn, &query))
}
