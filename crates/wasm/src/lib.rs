//! WebAssembly bindings for AODMAP.
//!
//! Exposes point-to-grid interpolation and rendering to JavaScript.
//! Points come in as the same JSON document the CLI reads
//! (`{"points": [...]}` or a bare array); parameters as an optional
//! camelCase JSON object that overrides the defaults field by field.

use wasm_bindgen::prelude::*;

use aodmap_algorithms::interpolation::{idw, IdwParams, IdwResult};
use aodmap_colormap::{grid_to_rgba, ColorScheme, ColormapParams, ContourLevels};
use aodmap_core::io::{grid_to_json, read_points_from_str, DEFAULT_VALUE_FIELD};
use aodmap_core::{Error, RegionBounds};

fn to_js(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_params(params_json: Option<&str>) -> aodmap_core::Result<IdwParams> {
    let params = match params_json.map(str::trim) {
        Some(text) if !text.is_empty() => serde_json::from_str(text)?,
        _ => IdwParams::default(),
    };
    Ok(params)
}

fn run(points_json: &str, params_json: Option<&str>) -> aodmap_core::Result<IdwResult> {
    let params = parse_params(params_json)?;
    let records = read_points_from_str(points_json, DEFAULT_VALUE_FIELD)?;
    idw(&records, params)
}

fn interpolate_to_json(points_json: &str, params_json: Option<&str>) -> aodmap_core::Result<String> {
    let result = run(points_json, params_json)?;
    grid_to_json(&result.grid, result.summary.used)
}

fn render_to_rgba(points_json: &str, params_json: Option<&str>, zmin: f64, zmax: f64) -> aodmap_core::Result<Vec<u8>> {
    if !(zmin < zmax) {
        return Err(Error::InvalidParameter {
            name: "zmax",
            value: zmax.to_string(),
            reason: format!("must be greater than zmin ({})", zmin),
        });
    }
    let result = run(points_json, params_json)?;

    let mut colormap = ColormapParams::with_range(ColorScheme::Aod, zmin, zmax);
    let step = ContourLevels::default().size;
    if let Ok(levels) = ContourLevels::new(zmin, zmax, step) {
        colormap = colormap.with_levels(levels);
    }
    Ok(grid_to_rgba(&result.grid, &colormap))
}

// ===========================================================================
// Exports
// ===========================================================================

/// Interpolate points onto a grid. Returns `{lats, lons, values, pointCount}`
/// as JSON; "no data" nodes are `null`.
#[wasm_bindgen]
pub fn interpolate_points(points_json: &str, params_json: Option<String>) -> std::result::Result<String, JsValue> {
    interpolate_to_json(points_json, params_json.as_deref()).map_err(to_js)
}

/// Interpolate and render to RGBA bytes (north-up, `(resolution+1)²` pixels)
/// on the AOD scale between `zmin` and `zmax`.
#[wasm_bindgen]
pub fn render_points(
    points_json: &str,
    params_json: Option<String>,
    zmin: f64,
    zmax: f64,
) -> std::result::Result<Vec<u8>, JsValue> {
    render_to_rgba(points_json, params_json.as_deref(), zmin, zmax).map_err(to_js)
}

/// Default region as `{minLat, maxLat, minLon, maxLon}` JSON.
#[wasm_bindgen]
pub fn texas_bounds() -> String {
    texas_bounds_json()
}

fn texas_bounds_json() -> String {
    serde_json::to_string(&RegionBounds::TEXAS).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const POINTS: &str = r#"{"points": [
        {"latitude": 0.5, "longitude": 0.5, "AOD": 0.2},
        {"latitude": 0.0, "longitude": 0.0, "AOD": "bad"}
    ]}"#;

    const PARAMS: &str = r#"{
        "bounds": {"minLat": 0.0, "maxLat": 1.0, "minLon": 0.0, "maxLon": 1.0},
        "resolution": 2,
        "influenceRadius": 0.5
    }"#;

    #[test]
    fn interpolates_with_params() {
        let json = interpolate_to_json(POINTS, Some(PARAMS)).unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["pointCount"], 1);
        assert_eq!(v["lats"].as_array().unwrap().len(), 3);
        // Centre node sits on the sample
        let centre = v["values"][1][1].as_f64().unwrap();
        assert!((centre - 0.2).abs() < 1e-12);
        // Corners are 0.707 degrees away
        assert!(v["values"][0][0].is_null());
    }

    #[test]
    fn default_params_when_absent() {
        assert_eq!(parse_params(None).unwrap(), IdwParams::default());
        assert_eq!(parse_params(Some("  ")).unwrap(), IdwParams::default());
        assert!(parse_params(Some("{not json")).is_err());
    }

    #[test]
    fn invalid_region_is_an_error() {
        let params = r#"{"bounds": {"minLat": 2.0, "maxLat": 1.0, "minLon": 0.0, "maxLon": 1.0}}"#;
        let err = interpolate_to_json(POINTS, Some(params)).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { .. }));
    }

    #[test]
    fn renders_rgba() {
        let rgba = render_to_rgba(POINTS, Some(PARAMS), 0.0, 0.5).unwrap();
        assert_eq!(rgba.len(), 9 * 4);
        // Centre pixel is opaque, corners transparent
        assert_eq!(rgba[4 * 4 + 3], 255);
        assert_eq!(rgba[3], 0);
        assert!(render_to_rgba(POINTS, Some(PARAMS), 0.5, 0.5).is_err());
    }

    #[test]
    fn exported_functions_return_plain_values() {
        let json = interpolate_points(POINTS, Some(PARAMS.to_string())).unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["values"].as_array().unwrap().len(), 3);

        let rgba = render_points(POINTS, Some(PARAMS.to_string()), 0.0, 0.5).unwrap();
        assert_eq!(rgba.len(), 9 * 4);
        assert_eq!(texas_bounds(), texas_bounds_json());
    }

    #[test]
    fn texas_bounds_shape() {
        let v: Value = serde_json::from_str(&texas_bounds_json()).unwrap();
        assert_eq!(v["minLat"], 25.8);
        assert_eq!(v["maxLon"], -93.5);
    }
}
