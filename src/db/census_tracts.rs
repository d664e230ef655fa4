// src/db/census_tracts.rs

//! Per-tract rental statistics for a map viewport.

use crate::db::connection::Database;
use crate::db::rows::{query_rows, BuiltQuery, FromRow};
use crate::domain::census_tract::CensusTractStat;
use crate::domain::params::{BedroomFilter, BoundingBox};
use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::Row;
use tracing::debug;

/// Coordinate reference system of every stored geometry (WGS 84).
pub const SRID: i32 = 4326;

/// Build the aggregation query for `bbox`, optionally limited to `bedrooms`.
///
/// The four corners are always bound as `?1..?4`. Only the bedroom filter is
/// written into the SQL text, and it can only hold validated small integers.
///
/// Zero in price, sqft, bedrooms or bathrooms means "not recorded": those
/// values are dropped from averages and percentiles with `NULLIF(x, 0)`, but
/// the listing still counts toward `number_of_rentals`. Min and max are the
/// 10th and 90th percentile so a single outlier listing doesn't set them.
///
/// Rounding: percentiles are doubles and round half to even (`1000.5` is
/// `1000`). Averages round half away from zero (`1000.5` is `1001`).
///
/// Tracts are first tested against the viewport so the pairwise
/// tract/listing test only runs for tracts that can match.
pub fn build_census_tract_query(
    bbox: &BoundingBox,
    bedrooms: Option<&BedroomFilter>,
) -> BuiltQuery {
    let bedroom_clause = bedrooms
        .map(|f| format!("\n            AND r.bedrooms IN ({f})"))
        .unwrap_or_default();

    let sql = format!(
        r#"
        SELECT
            ctr.ctuid,
            COUNT(*) AS number_of_rentals,
            CAST(round(AVG(NULLIF(ctr.price, 0))) AS INTEGER) AS average_price,
            round_half_even(percentile_cont(NULLIF(ctr.price, 0), 0.5)) AS median_price,
            round_half_even(percentile_cont(NULLIF(ctr.price, 0), 0.1)) AS min_price,
            round_half_even(percentile_cont(NULLIF(ctr.price, 0), 0.9)) AS max_price,
            CAST(round(AVG(NULLIF(ctr.sqft, 0))) AS INTEGER) AS average_sqft,
            CASE WHEN AVG(NULLIF(ctr.bedrooms, 0)) IS NULL THEN NULL
                 ELSE printf('%.2f', round(AVG(NULLIF(ctr.bedrooms, 0)), 2)) END AS average_bed,
            CASE WHEN AVG(NULLIF(ctr.bathrooms, 0)) IS NULL THEN NULL
                 ELSE printf('%.2f', round(AVG(NULLIF(ctr.bathrooms, 0)), 2)) END AS average_bath
        FROM (
            SELECT r.price, r.sqft, r.bedrooms, r.bathrooms, ct.ctuid
            FROM tbl_rentals r
            INNER JOIN tbl_census_tracts ct
                ON ST_Intersects(ST_MakeEnvelope(?1, ?2, ?3, ?4, {SRID}), ct.geometry)
                AND ST_Intersects(ct.geometry, r.geometry)
            WHERE ST_Intersects(ST_MakeEnvelope(?1, ?2, ?3, ?4, {SRID}), r.geometry){bedroom_clause}
        ) AS ctr
        GROUP BY ctr.ctuid
        ORDER BY ctr.ctuid
        "#
    );

    BuiltQuery::new(
        sql,
        vec![
            Value::Real(bbox.sw_lng),
            Value::Real(bbox.sw_lat),
            Value::Real(bbox.ne_lng),
            Value::Real(bbox.ne_lat),
        ],
    )
}

impl FromRow for CensusTractStat {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CensusTractStat {
            tract_id: row.get(0)?,
            rental_count: row.get(1)?,
            average_price: row.get(2)?,
            median_price: row.get(3)?,
            min_price: row.get(4)?,
            max_price: row.get(5)?,
            average_sq_ft: row.get(6)?,
            average_bed: row.get(7)?,
            average_bath: row.get(8)?,
        })
    }
}

/// Run the viewport aggregation. No matching tracts is an empty vec, not an error.
pub fn get_census_tract_stats(
    db: &Database,
    bbox: &BoundingBox,
    bedrooms: Option<&BedroomFilter>,
) -> Result<Vec<CensusTractStat>, ServerError> {
    let query = build_census_tract_query(bbox, bedrooms);
    let stats = db.with_conn(|conn| query_rows::<CensusTractStat>(conn, &query))?;
    debug!(tracts = stats.len(), ?bbox, ?bedrooms, "census tract stats");
    Ok(stats)
}
