pub mod census_tracts;
pub mod connection;
pub mod percentile;
pub mod property_taxes;
pub mod rentals;
pub mod rows;
pub mod spatial;

pub use connection::Database;
