//! Body-scan geometry reconstruction and interactive ray queries on Bevy.
//!
//! Decoded scan records and sensor clouds are assembled into line strips,
//! triangle meshes and point sets, swapped into the scene per source, and
//! queried every frame by tracked pointing devices.

pub mod engine;
pub mod scan;

pub use engine::core::app_setup::{ScanEnginePlugin, ScanScenePlugin, ScanSystems};
