use crate::db::census_tracts::get_census_tract_stats;
use crate::db::property_taxes::{get_property_taxes, search_address};
use crate::db::rentals::sample_rentals;
use crate::db::Database;
use crate::domain::params::{BedroomFilter, BoundingBox, QueryParams};
use crate::errors::{ResultResp, ServerError};
use crate::responses::json_response;
use astra::Request;

pub fn handle(req: Request, db: &Database) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = QueryParams::parse(req.uri().query());

    match (method, path) {
        ("GET", "/") => json_response(&sample_rentals(db)?),
        ("GET", "/census-tract") => census_tract(&params, db),
        ("GET", "/property-tax") => property_tax(&params, db),
        ("GET", "/address-search") => address_search(&params, db),
        _ => Err(ServerError::NotFound),
    }
}

fn census_tract(params: &QueryParams, db: &Database) -> ResultResp {
    // Validate everything before touching the store.
    let bbox = BoundingBox::from_params(params)?;
    let bedrooms = BedroomFilter::parse(params.get("bedrooms"))?;

    let stats = get_census_tract_stats(db, &bbox, bedrooms.as_ref())?;
    json_response(&stats)
}

fn property_tax(params: &QueryParams, db: &Database) -> ResultResp {
    let land_coordinate = params.required_i64("pcoord")?;
    json_response(&get_property_taxes(db, land_coordinate)?)
}

fn address_search(params: &QueryParams, db: &Database) -> ResultResp {
    let civic_number = params.required_i64("address")?;
    let lat = params.required_f64("lat")?;
    let lng = params.required_f64("long")?;
    json_response(&search_address(db, civic_number, lat, lng)?)
}
