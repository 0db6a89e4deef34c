//! Geographic region bounds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An axis-aligned latitude/longitude rectangle, in degrees.
///
/// A valid region has finite bounds with `min_lat < max_lat` and
/// `min_lon < max_lon`. Membership is inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl RegionBounds {
    /// Approximate bounds of the state of Texas.
    pub const TEXAS: Self = Self {
        min_lat: 25.8,
        max_lat: 36.5,
        min_lon: -106.6,
        max_lon: -93.5,
    };

    /// Create validated bounds.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self> {
        let bounds = Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check the `min < max` invariant on both axes.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.min_lat, self.max_lat, self.min_lon, self.max_lon]
            .iter()
            .all(|v| v.is_finite());

        // Negated comparisons so that NaN also fails.
        if !finite || !(self.min_lat < self.max_lat) || !(self.min_lon < self.max_lon) {
            return Err(Error::InvalidRegion {
                min_lat: self.min_lat,
                max_lat: self.max_lat,
                min_lon: self.min_lon,
                max_lon: self.max_lon,
            });
        }
        Ok(())
    }

    /// Whether (lat, lon) lies inside the region, edges included.
    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::TEXAS
    }
}

impl fmt::Display for RegionBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon
        )
    }
}

/// Parses `minLat,maxLat,minLon,maxLon`, or the preset name `texas`.
impl FromStr for RegionBounds {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("texas") {
            return Ok(Self::TEXAS);
        }

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(Error::InvalidParameter {
                name: "bounds",
                value: s.to_string(),
                reason: "expected minLat,maxLat,minLon,maxLon".into(),
            });
        }

        let mut coords = [0.0; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| Error::InvalidParameter {
                name: "bounds",
                value: s.to_string(),
                reason: format!("'{}' is not a number", part),
            })?;
        }

        Self::new(coords[0], coords[1], coords[2], coords[3])
    }
}
