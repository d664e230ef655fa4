mod census_tract_tests;
mod property_tests;
