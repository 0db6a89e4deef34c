//! Geolocated scalar samples

use serde::{Deserialize, Serialize};

/// A record that exposes a latitude, a longitude and a scalar value.
///
/// Any of the three may be missing; such records are skipped by the
/// interpolator rather than treated as zero.
pub trait GeoSample {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
    fn value(&self) -> Option<f64>;

    /// Convert to a [`Sample`] if all three fields are present and finite.
    fn to_sample(&self) -> Option<Sample> {
        let latitude = self.latitude().filter(|v| v.is_finite())?;
        let longitude = self.longitude().filter(|v| v.is_finite())?;
        let value = self.value().filter(|v| v.is_finite())?;
        Some(Sample {
            latitude,
            longitude,
            value,
        })
    }
}

/// A single observed point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(latitude: f64, longitude: f64, value: f64) -> Self {
        Self {
            latitude,
            longitude,
            value,
        }
    }

    /// Squared planar distance in degree space
    #[inline]
    pub fn dist_sq(&self, lat: f64, lon: f64) -> f64 {
        let dlat = self.latitude - lat;
        let dlon = self.longitude - lon;
        dlat * dlat + dlon * dlon
    }

    /// Planar distance in degree space (no great-circle correction)
    #[inline]
    pub fn dist(&self, lat: f64, lon: f64) -> f64 {
        self.dist_sq(lat, lon).sqrt()
    }
}

impl GeoSample for Sample {
    fn latitude(&self) -> Option<f64> {
        Some(self.latitude)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.longitude)
    }

    fn value(&self) -> Option<f64> {
        Some(self.value)
    }
}

/// A sample as decoded from an external source, with every field optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSample {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub value: Option<f64>,
}

impl GeoSample for RawSample {
    fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    fn value(&self) -> Option<f64> {
        self.value
    }
}

impl<T: GeoSample + ?Sized> GeoSample for &T {
    fn latitude(&self) -> Option<f64> {
        (**self).latitude()
    }

    fn longitude(&self) -> Option<f64> {
        (**self).longitude()
    }

    fn value(&self) -> Option<f64> {
        (**self).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_is_planar() {
        let s = Sample::new(0.0, 0.0, 1.0);
        assert_relative_eq!(s.dist(3.0, 4.0), 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.dist_sq(1.0, 1.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_sample_rejects_missing_and_non_finite() {
        let ok = RawSample {
            latitude: Some(30.0),
            longitude: Some(-97.0),
            value: Some(0.2),
        };
        assert_eq!(ok.to_sample(), Some(Sample::new(30.0, -97.0, 0.2)));

        let missing = RawSample {
            value: None,
            ..ok
        };
        assert!(missing.to_sample().is_none());

        let nan = RawSample {
            latitude: Some(f64::NAN),
            ..ok
        };
        assert!(nan.to_sample().is_none());

        let inf = Sample::new(30.0, f64::INFINITY, 0.1);
        assert!(inf.to_sample().is_none());
    }
}
