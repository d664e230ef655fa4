// src/db/spatial.rs

//! PostGIS-style spatial SQL functions for SQLite.
//!
//! Geometries live in the database as EWKT text, e.g.
//! `SRID=4326;POLYGON((-123.1 49.2, ...))`. A plain WKT string has SRID 0
//! (unknown). The registered functions are:
//!
//! - `ST_MakeEnvelope(xmin, ymin, xmax, ymax, srid)` -> polygon
//! - `ST_MakePoint(x, y)` -> point with SRID 0
//! - `ST_SetSRID(geom, srid)` -> same geometry tagged with `srid`
//! - `ST_Intersects(a, b)` / `ST_Contains(a, b)` -> boolean
//!
//! Any NULL argument yields NULL, matching PostGIS.

use geo::{coord, Contains, Geometry, Intersects, Point, Rect};
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::Connection;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use wkt::ToWkt;

#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("WKT parse error: {0}")]
    WktParse(String),

    #[error("Invalid SRID prefix: {0}")]
    InvalidSrid(String),

    #[error("Operation on mixed SRID geometries ({0} != {1})")]
    MixedSrid(i32, i32),

    #[error("Non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// A geometry together with its spatial reference id.
#[derive(Debug, Clone, PartialEq)]
pub struct Ewkt {
    pub srid: i32,
    pub geometry: Geometry<f64>,
}

impl Ewkt {
    pub fn envelope(
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
        srid: i32,
    ) -> Result<Self, SpatialError> {
        if ![xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite()) {
            return Err(SpatialError::NonFinite("ST_MakeEnvelope"));
        }
        // Rect normalises swapped corners.
        let rect = Rect::new(coord! { x: xmin, y: ymin }, coord! { x: xmax, y: ymax });
        Ok(Self {
            srid,
            geometry: Geometry::Polygon(rect.to_polygon()),
        })
    }

    pub fn point(x: f64, y: f64) -> Result<Self, SpatialError> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(SpatialError::NonFinite("ST_MakePoint"));
        }
        Ok(Self {
            srid: 0,
            geometry: Geometry::Point(Point::new(x, y)),
        })
    }

    fn check_srid(&self, other: &Ewkt) -> Result<(), SpatialError> {
        if self.srid != 0 && other.srid != 0 && self.srid != other.srid {
            return Err(SpatialError::MixedSrid(self.srid, other.srid));
        }
        Ok(())
    }

    pub fn intersects(&self, other: &Ewkt) -> Result<bool, SpatialError> {
        self.check_srid(other)?;
        Ok(self.geometry.intersects(&other.geometry))
    }

    /// True when `other` lies in `self` and at least one interior point is shared.
    pub fn contains(&self, other: &Ewkt) -> Result<bool, SpatialError> {
        self.check_srid(other)?;
        Ok(self.geometry.contains(&other.geometry))
    }
}

impl FromStr for Ewkt {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (srid, body) = match s.split_once(';') {
            Some((prefix, body)) => {
                let srid = prefix
                    .trim()
                    .strip_prefix("SRID=")
                    .and_then(|n| n.parse::<i32>().ok())
                    .ok_or_else(|| SpatialError::InvalidSrid(prefix.to_string()))?;
                (srid, body)
            }
            None => (0, s),
        };
        Ok(Self {
            srid,
            geometry: parse_wkt(body)?,
        })
    }
}

impl fmt::Display for Ewkt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.srid != 0 {
            write!(f, "SRID={};", self.srid)?;
        }
        f.write_str(&self.geometry.wkt_string())
    }
}

/// Parse WKT string to geo-types Geometry.
pub fn parse_wkt(wkt: &str) -> Result<Geometry<f64>, SpatialError> {
    wkt::Wkt::from_str(wkt)
        .map_err(|e| SpatialError::WktParse(format!("{:?}", e)))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| SpatialError::WktParse(format!("{:?}", e)))
        })
}

fn user_err(e: SpatialError) -> rusqlite::Error {
    rusqlite::Error::UserFunctionError(Box::new(e))
}

/// Read argument `idx` as EWKT; `None` for SQL NULL.
fn geometry_arg(ctx: &Context<'_>, idx: usize) -> rusqlite::Result<Option<Ewkt>> {
    match ctx.get::<Option<String>>(idx)? {
        Some(text) => text.parse::<Ewkt>().map(Some).map_err(user_err),
        None => Ok(None),
    }
}

fn predicate(
    ctx: &Context<'_>,
    op: fn(&Ewkt, &Ewkt) -> Result<bool, SpatialError>,
) -> rusqlite::Result<Option<bool>> {
    match (geometry_arg(ctx, 0)?, geometry_arg(ctx, 1)?) {
        (Some(a), Some(b)) => op(&a, &b).map(Some).map_err(user_err),
        _ => Ok(None),
    }
}

/// Register the `ST_*` functions on `conn`.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;

    conn.create_scalar_function("ST_MakeEnvelope", 5, flags, |ctx| {
        let coords = (
            ctx.get::<Option<f64>>(0)?,
            ctx.get::<Option<f64>>(1)?,
            ctx.get::<Option<f64>>(2)?,
            ctx.get::<Option<f64>>(3)?,
        );
        let srid = ctx.get::<Option<i32>>(4)?;
        match (coords, srid) {
            ((Some(xmin), Some(ymin), Some(xmax), Some(ymax)), Some(srid)) => {
                Ewkt::envelope(xmin, ymin, xmax, ymax, srid)
                    .map(|e| Some(e.to_string()))
                    .map_err(user_err)
            }
            _ => Ok(None),
        }
    })?;

    conn.create_scalar_function("ST_MakePoint", 2, flags, |ctx| {
        match (ctx.get::<Option<f64>>(0)?, ctx.get::<Option<f64>>(1)?) {
            (Some(x), Some(y)) => Ewkt::point(x, y).map(|e| Some(e.to_string())).map_err(user_err),
            _ => Ok(None),
        }
    })?;

    conn.create_scalar_function("ST_SetSRID", 2, flags, |ctx| {
        match (geometry_arg(ctx, 0)?, ctx.get::<Option<i32>>(1)?) {
            (Some(geom), Some(srid)) => Ok(Some(Ewkt { srid, ..geom }.to_string())),
            _ => Ok(None),
        }
    })?;

    conn.create_scalar_function("ST_Intersects", 2, flags, |ctx| predicate(ctx, Ewkt::intersects))?;
    conn.create_scalar_function("ST_Contains", 2, flags, |ctx| predicate(ctx, Ewkt::contains))?;

    Ok(())
}
