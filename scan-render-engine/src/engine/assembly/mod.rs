//! Scan data to renderable primitive buffers.
pub mod builder;
pub mod contour;
pub mod point_cloud;
pub mod surface;

pub use builder::{AssemblyDiagnostic, BuildOutput, SceneBuilder};
pub use contour::{LineStyle, assemble_contour};
pub use point_cloud::assemble_point_cloud;
pub use surface::{assemble_region, dedup_edges, validate_region, wireframe_edges};
