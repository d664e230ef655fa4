pub mod census_tract;
pub mod nullable;
pub mod params;
pub mod property;
