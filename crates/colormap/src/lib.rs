//! # AODMAP Colormap
//!
//! Color mapping and grid-to-RGBA rendering for AODMAP.
//!
//! Provides the dashboard's AOD color scale plus two general schemes, a
//! multi-stop interpolation engine, and contour banding. The main entry point
//! is [`grid_to_rgba`], which converts a `Grid` into a north-up RGBA buffer.
//!
//! ## Usage
//!
//! ```ignore
//! use aodmap_colormap::{ColorScheme, ColormapParams, grid_to_rgba};
//!
//! let params = ColormapParams::new(ColorScheme::Aod);
//! let rgba = grid_to_rgba(&grid, &params);
//! ```

mod levels;
mod render;
mod scheme;

pub use levels::ContourLevels;
pub use render::{auto_params, grid_to_rgba, ColormapParams};
pub use scheme::{evaluate, ColorScheme, ColorStop, Rgb};
