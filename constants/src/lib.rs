//! Constants shared between the scan render engine and its tooling.
//!
//! Everything here is a default: the engine reads the live values from its
//! JSON configuration and only falls back to these when a field is absent.

/// Axis mapping matrices and reference frames for scan and sensor geometry.
pub mod coordinate_system;

/// Asset locations for the scan record, sensor stream and engine configuration.
pub mod path;

/// Line widths, point sizes, marker behaviour and query thresholds.
pub mod render_settings;
