// src/tests/router_tests/census_tract_tests.rs

use crate::domain::census_tract::CensusTractStat;
use crate::tests::fixtures::{fixture_db, insert_rental, insert_tract, square};
use crate::tests::utils::{body_json, get};
use serde_json::json;

const VIEWPORT: &str = "/census-tract?swlng=-123.2&swlat=49.2&nelng=-123.0&nelat=49.3";

#[test]
fn viewport_with_no_tracts_is_empty_array() {
    let db = fixture_db("route_ct_empty");

    let resp = get(&db, VIEWPORT);

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "application/json");
    assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    assert_eq!(body_json(resp), json!([]));
}

#[test]
fn zero_price_rental_is_counted_but_excluded_from_price_stats() {
    let db = fixture_db("route_ct_scenario");
    db.with_conn(|conn| {
        insert_tract(conn, "9330049.01", &square(-123.15, 49.22, 0.05))?;
        insert_rental(conn, 1000, Some(0), Some(1), Some(1.0), -123.14, 49.23)?;
        insert_rental(conn, 1500, Some(0), Some(2), Some(1.0), -123.13, 49.24)?;
        insert_rental(conn, 0, Some(0), Some(2), Some(2.0), -123.12, 49.25)?;
        Ok(())
    })
    .unwrap();

    let resp = get(&db, VIEWPORT);
    assert_eq!(resp.status(), 200);
    assert_eq!(
        body_json(resp),
        json!([{
            "ctuid": "9330049.01",
            "number_of_rentals": 3,
            "average_price": 1250,
            "median_price": 1250,
            "min_price": 1050,
            "max_price": 1450,
            "average_sqft": null,
            "average_bed": "1.67",
            "average_bath": "1.33"
        }])
    );
}

#[test]
fn bedroom_filter_is_applied() {
    let db = fixture_db("route_ct_bedrooms");
    db.with_conn(|conn| {
        insert_tract(conn, "A", &square(-123.15, 49.22, 0.05))?;
        insert_tract(conn, "B", &square(-123.05, 49.22, 0.03))?;
        insert_rental(conn, 1000, None, Some(1), None, -123.14, 49.23)?;
        insert_rental(conn, 2000, None, Some(2), None, -123.13, 49.23)?;
        insert_rental(conn, 3000, None, Some(3), None, -123.04, 49.23)?;
        insert_rental(conn, 5000, None, Some(5), None, -123.03, 49.23)?;
        Ok(())
    })
    .unwrap();

    let resp = get(&db, &format!("{VIEWPORT}&bedrooms=2,3"));
    assert_eq!(resp.status(), 200);
    let stats: Vec<CensusTractStat> = serde_json::from_value(body_json(resp)).unwrap();
    let summary: Vec<(&str, i64)> = stats
        .iter()
        .map(|s| (s.tract_id.as_str(), s.rental_count))
        .collect();
    assert_eq!(summary, vec![("A", 1), ("B", 1)]);
    assert_eq!(stats[0].average_price.as_option(), Some(&2000));
    assert_eq!(stats[1].average_price.as_option(), Some(&3000));

    let resp = get(&db, &format!("{VIEWPORT}&bedrooms=0"));
    assert_eq!(body_json(resp), json!([]));

    // Blank filter means no filter.
    let resp = get(&db, &format!("{VIEWPORT}&bedrooms="));
    let stats: Vec<CensusTractStat> = serde_json::from_value(body_json(resp)).unwrap();
    assert_eq!(stats.iter().map(|s| s.rental_count).sum::<i64>(), 4);
}

#[test]
fn malformed_coordinate_is_client_error() {
    let db = fixture_db("route_ct_bad_coord");

    let resp = get(
        &db,
        "/census-tract?swlng=abc&swlat=49.2&nelng=-123.0&nelat=49.3",
    );

    assert_eq!(resp.status(), 400);
    assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    let body = body_json(resp);
    assert!(body["error"].as_str().unwrap().contains("swlng"));
}

#[test]
fn missing_coordinate_is_client_error() {
    let db = fixture_db("route_ct_missing");
    let resp = get(&db, "/census-tract?swlng=-123.2&swlat=49.2&nelng=-123.0");
    assert_eq!(resp.status(), 400);
}

#[test]
fn injection_through_bedrooms_is_rejected() {
    let db = fixture_db("route_ct_injection");
    db.with_conn(|conn| {
        insert_tract(conn, "A", &square(-123.15, 49.22, 0.05))?;
        insert_rental(conn, 1000, None, Some(1), None, -123.14, 49.23)?;
        Ok(())
    })
    .unwrap();

    let resp = get(
        &db,
        &format!("{VIEWPORT}&bedrooms=1)%3B%20DELETE%20FROM%20tbl_rentals%3B%20--"),
    );
    assert_eq!(resp.status(), 400);

    let count: i64 = db
        .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM tbl_rentals", [], |r| r.get(0))?))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn unknown_route_is_404() {
    let db = fixture_db("route_404");
    let resp = get(&db, "/census-tracts");
    assert_eq!(resp.status(), 404);
    assert_eq!(body_json(resp), json!({ "error": "Not Found" }));
}
