// src/tests/router_tests/property_tests.rs

use crate::tests::fixtures::{
    fixture_db, insert_parcel, insert_property_tax, insert_rental, square,
};
use crate::tests::utils::{body_json, get};
use serde_json::json;

#[test]
fn property_tax_returns_upper_case_fields() {
    let db = fixture_db("route_pt");
    db.with_conn(|conn| insert_property_tax(conn, 64012345, 3456, "W 4TH AVE"))
        .unwrap();

    let resp = get(&db, "/property-tax?pcoord=64012345");
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

    let body = body_json(resp);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["LAND_COORDINATE"], json!(64012345));
    assert_eq!(rows[0]["TO_CIVIC_NUMBER"], json!(3456));
    assert_eq!(rows[0]["STREET_NAME"], json!("W 4TH AVE"));
    assert_eq!(rows[0]["ZONE_NAME"], json!("RS-1"));
}

#[test]
fn property_tax_requires_integer_pcoord() {
    let db = fixture_db("route_pt_bad");
    assert_eq!(get(&db, "/property-tax").status(), 400);
    assert_eq!(get(&db, "/property-tax?pcoord=1%20OR%201%3D1").status(), 400);
}

#[test]
fn address_search_finds_parcel_under_point() {
    let db = fixture_db("route_search");
    db.with_conn(|conn| {
        insert_property_tax(conn, 777, 2150, "YEW ST")?;
        insert_parcel(conn, 777, &square(-123.155, 49.265, 0.0005))?;
        Ok(())
    })
    .unwrap();

    let resp = get(&db, "/address-search?address=2150&lat=49.2652&long=-123.1548");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        body_json(resp),
        json!([{
            "LAND_COORDINATE": 777,
            "TO_CIVIC_NUMBER": 2150,
            "FROM_CIVIC_NUMBER": 2150,
            "STREET_NAME": "YEW ST",
            "PROPERTY_POSTAL_CODE": "V6H 1J1"
        }])
    );

    let resp = get(&db, "/address-search?address=2150&lat=49.0&long=-123.1548");
    assert_eq!(body_json(resp), json!([]));
}

#[test]
fn address_search_rejects_bad_params() {
    let db = fixture_db("route_search_bad");
    assert_eq!(get(&db, "/address-search?address=2150&lat=49.2").status(), 400);
    assert_eq!(
        get(&db, "/address-search?address=abc&lat=49.2&long=-123.1").status(),
        400
    );
}

#[test]
fn root_lists_rental_prices() {
    let db = fixture_db("route_root");
    db.with_conn(|conn| {
        insert_rental(conn, 1800, None, Some(1), None, -123.1, 49.25)?;
        insert_rental(conn, 2400, None, Some(2), None, -123.1, 49.25)?;
        Ok(())
    })
    .unwrap();

    let resp = get(&db, "/");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp), json!([{ "Price": 1800 }, { "Price": 2400 }]));
}
