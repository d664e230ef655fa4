// src/domain/census_tract.rs

use crate::domain::nullable::{NullInt64, NullString};
use serde::{Deserialize, Serialize};

/// Rental statistics for one census tract intersecting the requested viewport.
///
/// Field names on the wire are the ones the map front end reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusTractStat {
    #[serde(rename = "ctuid")]
    pub tract_id: String,
    #[serde(rename = "number_of_rentals")]
    pub rental_count: i64,

    // Price statistics ignore zero prices; a tract with no priced rental has nulls here.
    pub average_price: NullInt64,
    pub median_price: NullInt64,
    pub min_price: NullInt64,
    pub max_price: NullInt64,

    #[serde(rename = "average_sqft")]
    pub average_sq_ft: NullInt64,
    /// Two fraction digits, e.g. `"2.50"`.
    pub average_bed: NullString,
    pub average_bath: NullString,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_front_end_field_names_and_nulls() {
        let stat = CensusTractStat {
            tract_id: "9330001.01".into(),
            rental_count: 2,
            average_price: NullInt64::new(1250),
            median_price: NullInt64::new(1250),
            min_price: NullInt64::null(),
            max_price: NullInt64::new(1450),
            average_sq_ft: NullInt64::null(),
            average_bed: NullString::new("1.50".into()),
            average_bath: NullString::null(),
        };

        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ctuid": "9330001.01",
                "number_of_rentals": 2,
                "average_price": 1250,
                "median_price": 1250,
                "min_price": null,
                "max_price": 1450,
                "average_sqft": null,
                "average_bed": "1.50",
                "average_bath": null
            })
        );

        let back: CensusTractStat = serde_json::from_value(json).unwrap();
        assert_eq!(back, stat);
    }
}
