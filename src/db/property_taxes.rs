// src/db/property_taxes.rs

//! Property-tax lookups: by land coordinate, and by clicked point + civic number.

use crate::db::census_tracts::SRID;
use crate::db::connection::Database;
use crate::db::rows::{query_rows, BuiltQuery, FromRow};
use crate::domain::property::{PropertyShortRecord, PropertyTaxRecord};
use crate::errors::ServerError;
use rusqlite::types::Value;
use rusqlite::Row;

const SQL_PROPERTY_TAX: &str = r#"
    SELECT
        LAND_COORDINATE,
        CURRENT_LAND_VALUE,
        BIG_IMPROVEMENT_YEAR,
        CURRENT_IMPROVEMENT_VALUE,
        PREVIOUS_IMPROVEMENT_VALUE,
        PREVIOUS_LAND_VALUE,
        TAX_ASSESSMENT_YEAR,
        TAX_LEVY,
        LEGAL_TYPE,
        PID,
        FROM_CIVIC_NUMBER,
        TO_CIVIC_NUMBER,
        PROPERTY_POSTAL_CODE,
        STREET_NAME,
        YEAR_BUILT,
        ZONE_CATEGORY,
        ZONE_NAME
    FROM tbl_property_taxes
    WHERE LAND_COORDINATE = ?1
"#;

impl FromRow for PropertyTaxRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PropertyTaxRecord {
            land_coordinate: row.get(0)?,
            current_land_value: row.get(1)?,
            big_improvement_year: row.get(2)?,
            current_improvement_value: row.get(3)?,
            previous_improvement_value: row.get(4)?,
            previous_land_value: row.get(5)?,
            tax_assessment_year: row.get(6)?,
            tax_levy: row.get(7)?,
            legal_type: row.get(8)?,
            pid: row.get(9)?,
            from_civic_number: row.get(10)?,
            to_civic_number: row.get(11)?,
            property_postal_code: row.get(12)?,
            street_name: row.get(13)?,
            year_built: row.get(14)?,
            zone_category: row.get(15)?,
            zone_name: row.get(16)?,
        })
    }
}

impl FromRow for PropertyShortRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(PropertyShortRecord {
            land_coordinate: row.get(0)?,
            to_civic_number: row.get(1)?,
            from_civic_number: row.get(2)?,
            street_name: row.get(3)?,
            property_postal_code: row.get(4)?,
        })
    }
}

/// Tax-roll rows for one land coordinate (one per assessment year on file).
pub fn get_property_taxes(
    db: &Database,
    land_coordinate: i64,
) -> Result<Vec<PropertyTaxRecord>, ServerError> {
    let query = BuiltQuery::new(SQL_PROPERTY_TAX, vec![Value::Integer(land_coordinate)]);
    db.with_conn(|conn| query_rows(conn, &query))
}

/// Parcels containing the point (`lng`, `lat`) whose tax row has `civic_number`
/// as its upper civic number.
pub fn search_address(
    db: &Database,
    civic_number: i64,
    lat: f64,
    lng: f64,
) -> Result<Vec<PropertyShortRecord>, ServerError> {
    let sql = format!(
        r#"
        SELECT
            pt.LAND_COORDINATE,
            pt.TO_CIVIC_NUMBER,
            pt.FROM_CIVIC_NUMBER,
            pt.STREET_NAME,
            pt.PROPERTY_POSTAL_CODE
        FROM tbl_property_parcels AS pp
        JOIN tbl_property_taxes AS pt
          ON pp.tax_coord = pt.LAND_COORDINATE
        WHERE ST_Contains(pp.geometry, ST_SetSRID(ST_MakePoint(?1, ?2), {SRID}))
          AND pt.TO_CIVIC_NUMBER = ?3
        "#
    );
    let query = BuiltQuery::new(
        sql,
        vec![Value::Real(lng), Value::Real(lat), Value::Integer(civic_number)],
    );
    db.with_conn(|conn| query_rows(conn, &query))
}
