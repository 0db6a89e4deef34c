//! Contour level banding

use serde::{Deserialize, Serialize};

/// Evenly spaced contour levels from `start` to `end` every `size`.
///
/// Quantizing values to the lower edge of their band before color mapping
/// gives the filled-contour look of a contour plot with heatmap coloring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourLevels {
    pub start: f64,
    pub end: f64,
    pub size: f64,
}

impl Default for ContourLevels {
    /// A line every 0.02 AOD between 0 and 0.5.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 0.5,
            size: 0.02,
        }
    }
}

impl ContourLevels {
    pub fn new(start: f64, end: f64, size: f64) -> Result<Self, String> {
        let levels = Self { start, end, size };
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(format!("contour range must satisfy start < end, got {}..{}", start, end));
        }
        if !(size.is_finite() && size > 0.0) {
            return Err(format!("contour size must be positive, got {}", size));
        }
        Ok(levels)
    }

    /// Number of bands between `start` and `end`.
    pub fn band_count(&self) -> usize {
        // The small tolerance keeps 0.5 / 0.02 from rounding up to 26 bands.
        ((self.end - self.start) / self.size - 1e-9).ceil().max(1.0) as usize
    }

    /// Level values, `start` first and `end` last.
    pub fn levels(&self) -> Vec<f64> {
        let n = self.band_count();
        (0..n)
            .map(|i| self.start + i as f64 * self.size)
            .chain(std::iter::once(self.end))
            .collect()
    }

    /// Index of the band containing `value`, clamped to the first and last band.
    pub fn band_of(&self, value: f64) -> usize {
        let last = self.band_count() - 1;
        if !(value > self.start) {
            return 0;
        }
        let idx = ((value - self.start) / self.size + 1e-9).floor() as usize;
        idx.min(last)
    }

    /// Lower edge of the band containing `value`.
    pub fn quantize(&self, value: f64) -> f64 {
        self.start + self.band_of(value) as f64 * self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_levels() {
        let l = ContourLevels::default();
        assert_eq!(l.band_count(), 25);
        let levels = l.levels();
        assert_eq!(levels.len(), 26);
        assert_eq!(levels[0], 0.0);
        assert_eq!(*levels.last().unwrap(), 0.5);
    }

    #[test]
    fn banding() {
        let l = ContourLevels::default();
        assert_eq!(l.band_of(-1.0), 0);
        assert_eq!(l.band_of(0.0), 0);
        assert_eq!(l.band_of(0.019), 0);
        assert_eq!(l.band_of(0.02), 1);
        assert_eq!(l.band_of(0.49), 24);
        assert_eq!(l.band_of(0.8), 24);
        assert!((l.quantize(0.105) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn uneven_last_band() {
        let l = ContourLevels::new(0.0, 1.0, 0.3).unwrap();
        assert_eq!(l.band_count(), 4);
        assert_eq!(l.levels().len(), 5);
        assert_eq!(l.band_of(0.95), 3);
    }

    #[test]
    fn invalid() {
        assert!(ContourLevels::new(0.5, 0.0, 0.1).is_err());
        assert!(ContourLevels::new(0.0, 1.0, 0.0).is_err());
        assert!(ContourLevels::new(0.0, f64::NAN, 0.1).is_err());
    }
}
