//! Color schemes and multi-stop interpolation engine.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available color schemes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Blue -> Cyan -> Green -> Yellow -> Orange -> Red (the dashboard's AOD scale)
    #[default]
    Aod,
    /// Black -> White
    Grayscale,
    /// Blue -> White -> Red
    Divergent,
}

impl ColorScheme {
    pub const ALL: &[ColorScheme] = &[Self::Aod, Self::Grayscale, Self::Divergent];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Aod => "AOD",
            Self::Grayscale => "Grayscale",
            Self::Divergent => "Divergent",
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aod" => Ok(Self::Aod),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            "divergent" | "bwr" => Ok(Self::Divergent),
            _ => Err(format!("Unknown color scheme: {}. Use aod, grayscale or divergent.", s)),
        }
    }
}

// ─── Color stop definitions ───────────────────────────────────────────

// Stops are positions on a [zmin, zmax] = [0, 0.5] ramp rescaled to
// [0, 1], so red is reached at t = 1.0 and AOD 0.1 is cyan.
const AOD_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 0, 255),
    ColorStop::new(0.2, 0, 255, 255),
    ColorStop::new(0.4, 0, 128, 0),
    ColorStop::new(0.6, 255, 255, 0),
    ColorStop::new(0.8, 255, 165, 0),
    ColorStop::new(1.0, 255, 0, 0),
];

const DIVERGENT_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 44, 62, 180),
    ColorStop::new(0.25, 120, 160, 220),
    ColorStop::new(0.50, 240, 240, 240),
    ColorStop::new(0.75, 220, 120, 80),
    ColorStop::new(1.00, 180, 30, 30),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 || t.is_nan() {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
/// Positions outside the unit interval are clamped.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    match scheme {
        ColorScheme::Aod => multi_stop(AOD_STOPS, t),
        ColorScheme::Grayscale => {
            let v = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgb::new(v, v, v)
        }
        ColorScheme::Divergent => multi_stop(DIVERGENT_STOPS, t),
    }
}
