// src/domain/params.rs

//! Request parameters, validated before they get anywhere near SQL.

use crate::errors::ServerError;
use std::collections::HashMap;
use std::fmt;

/// Decoded query-string pairs. Later duplicates win.
#[derive(Debug, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let map = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();
        Self(map)
    }

    /// Value of `name`, trimmed; an empty value counts as missing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, name: &str) -> Result<&str, ServerError> {
        self.get(name)
            .ok_or_else(|| ServerError::BadRequest(format!("missing required parameter `{name}`")))
    }

    /// A required, finite floating-point parameter.
    pub fn required_f64(&self, name: &str) -> Result<f64, ServerError> {
        let raw = self.required(name)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ServerError::BadRequest(format!("`{name}` must be a number, got `{raw}`")))
    }

    pub fn required_i64(&self, name: &str) -> Result<i64, ServerError> {
        let raw = self.required(name)?;
        raw.parse::<i64>()
            .map_err(|_| ServerError::BadRequest(format!("`{name}` must be an integer, got `{raw}`")))
    }
}

/// Map viewport: south-west and north-east corners in EPSG:4326 (lng/lat).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub sw_lng: f64,
    pub sw_lat: f64,
    pub ne_lng: f64,
    pub ne_lat: f64,
}

impl BoundingBox {
    pub fn from_params(params: &QueryParams) -> Result<Self, ServerError> {
        Ok(Self {
            sw_lng: params.required_f64("swlng")?,
            sw_lat: params.required_f64("swlat")?,
            ne_lng: params.required_f64("nelng")?,
            ne_lat: params.required_f64("nelat")?,
        })
    }
}

/// Largest bedroom count accepted in a filter.
pub const MAX_BEDROOMS: u8 = 99;

/// Allowed bedroom counts, already validated, sorted, and deduplicated.
///
/// This is the only request value that is written into SQL text, so it can
/// only be built by [`BedroomFilter::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedroomFilter(Vec<u8>);

impl BedroomFilter {
    /// Parse a comma-separated list such as `"2,3"`.
    ///
    /// `None` or a blank string means no filter. Any element that is not an
    /// integer in `0..=MAX_BEDROOMS` rejects the whole list.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, ServerError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(r) => r,
        };

        let mut counts = raw
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u8>()
                    .ok()
                    .filter(|n| *n <= MAX_BEDROOMS)
                    .ok_or_else(|| {
                        ServerError::BadRequest(format!(
                            "`bedrooms` must be a comma-separated list of integers 0-{MAX_BEDROOMS}, got `{part}`"
                        ))
                    })
            })
            .collect::<Result<Vec<u8>, ServerError>>()?;

        counts.sort_unstable();
        counts.dedup();
        Ok(Some(Self(counts)))
    }
}

impl fmt::Display for BedroomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}
