// src/db/percentile.rs

//! `percentile_cont(value, fraction)` aggregate for SQLite.
//!
//! Same result as PostgreSQL's
//! `percentile_cont(fraction) WITHIN GROUP (ORDER BY value)`: NULL values are
//! skipped, an empty group yields NULL, and the fraction must be constant
//! within a group.
//!
//! `round_half_even(x)` rounds a double to the nearest integer with ties to
//! even, the way PostgreSQL rounds `double precision`. SQLite's own `round`
//! breaks ties away from zero.

use rusqlite::functions::{Aggregate, Context, FunctionFlags};
use rusqlite::{Connection, Error};

/// Continuous percentile over values sorted ascending.
///
/// `rank = fraction * (n - 1)`, then linear interpolation between the
/// values at `floor(rank)` and `ceil(rank)`.
pub fn percentile_cont(sorted: &[f64], fraction: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = fraction * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo]))
}

#[derive(Default)]
struct PercentileAcc {
    values: Vec<f64>,
    fraction: Option<f64>,
}

struct PercentileCont;

impl Aggregate<PercentileAcc, Option<f64>> for PercentileCont {
    fn init(&self, _ctx: &mut Context<'_>) -> rusqlite::Result<PercentileAcc> {
        Ok(PercentileAcc::default())
    }

    fn step(&self, ctx: &mut Context<'_>, acc: &mut PercentileAcc) -> rusqlite::Result<()> {
        let fraction: f64 = ctx.get(1)?;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::UserFunctionError(
                format!("percentile value {fraction} is not between 0 and 1").into(),
            ));
        }
        match acc.fraction {
            None => acc.fraction = Some(fraction),
            Some(f) if f != fraction => {
                return Err(Error::UserFunctionError(
                    "percentile fraction must be constant within a group".into(),
                ))
            }
            Some(_) => {}
        }

        if let Some(v) = ctx.get::<Option<f64>>(0)? {
            acc.values.push(v);
        }
        Ok(())
    }

    fn finalize(
        &self,
        _ctx: &mut Context<'_>,
        acc: Option<PercentileAcc>,
    ) -> rusqlite::Result<Option<f64>> {
        let Some(mut acc) = acc else {
            return Ok(None);
        };
        let Some(fraction) = acc.fraction else {
            return Ok(None);
        };
        acc.values.sort_by(f64::total_cmp);
        Ok(percentile_cont(&acc.values, fraction))
    }
}

pub fn register(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    conn.create_aggregate_function("percentile_cont", 2, flags, PercentileCont)?;
    conn.create_scalar_function("round_half_even", 1, flags, |ctx| {
        let x: Option<f64> = ctx.get(0)?;
        Ok(x.map(|x| x.round_ties_even() as i64))
    })
}
