// src/domain/property.rs

use serde::{Deserialize, Serialize};

/// One row of the property-tax roll, keyed by land coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PropertyTaxRecord {
    pub land_coordinate: i64,
    pub current_land_value: i64,
    pub big_improvement_year: i64,
    pub current_improvement_value: i64,
    pub previous_improvement_value: i64,
    pub previous_land_value: i64,
    pub tax_assessment_year: i64,
    pub tax_levy: i64,
    pub legal_type: String,
    pub pid: String,
    pub from_civic_number: i64,
    pub to_civic_number: i64,
    pub property_postal_code: String,
    pub street_name: String,
    pub year_built: i64,
    pub zone_category: String,
    pub zone_name: String,
}

/// Address-search hit: just enough to label a parcel and fetch its tax row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PropertyShortRecord {
    pub land_coordinate: i64,
    pub to_civic_number: i64,
    pub from_civic_number: i64,
    pub street_name: String,
    pub property_postal_code: String,
}

/// A single rental price, used by the landing endpoint as a quick data check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalSample {
    #[serde(rename = "Price")]
    pub price: i64,
}
