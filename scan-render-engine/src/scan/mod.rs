//! Scan data model handed over by the decoder collaborator.
//!
//! Structured body-scan records (body parts with layers, silhouettes and
//! surface regions) and raw sensor point clouds. Both are immutable once
//! decoded and consumed read-only by the assemblers.

/// Decoder seam between raw bytes and the scan data model.
pub mod decoder;

/// Body-scan record: body parts, layers, silhouettes and surface regions.
pub mod record;

/// Raw sensor point clouds, one per physical capture sensor.
pub mod sensor;

pub use decoder::{JsonScanDecoder, ScanDecoder};
pub use record::{
    BodyPart, Contour, Layer, ScanRecord, SilhouetteCurve, SilhouetteView, SurfaceRegion,
};
pub use sensor::SensorPointCloud;
