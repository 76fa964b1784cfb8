//! Scan-space to scene-space coordinate convention.
//!
//! Every assembler goes through [`to_scene_space`] so layers, silhouettes,
//! surface regions and sensor clouds stay mutually aligned.

use bevy::prelude::*;
use constants::coordinate_system::{
    FRONT_SILHOUETTE_AXES, LAYER_AXES, RAW_AXES, SIDE_SILHOUETTE_AXES, apply_axes,
};
use serde::{Deserialize, Serialize};

/// How a scan-space point is laid out in the scene before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateMode {
    /// `(p.x, layer_y, p.y)`: cross-section lying flat at its height.
    Layer,
    /// `(p.x, p.y, 0)`
    FrontSilhouette,
    /// `(0, p.y, p.x)`
    SideSilhouette,
    /// 3-D sample, unchanged.
    Raw,
}

impl CoordinateMode {
    fn axes(self) -> &'static [[f32; 3]; 3] {
        match self {
            Self::Layer => &LAYER_AXES,
            Self::FrontSilhouette => &FRONT_SILHOUETTE_AXES,
            Self::SideSilhouette => &SIDE_SILHOUETTE_AXES,
            Self::Raw => &RAW_AXES,
        }
    }
}

/// Uniform scale followed by a translation, applied after axis mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub offset: Vec3,
    pub scale: f32,
}

impl ReferenceFrame {
    pub const IDENTITY: Self = Self {
        offset: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn new(offset: Vec3, scale: f32) -> Self {
        Self { offset, scale }
    }

    pub fn place(&self, mapped: Vec3) -> Vec3 {
        mapped * self.scale + self.offset
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis mapping only, no placement.
///
/// Planar modes read `point.x`/`point.y` and take the height from `layer_y`
/// (ignored by the silhouette modes). `Raw` reads all three components.
pub fn axis_map(point: Vec3, mode: CoordinateMode, layer_y: f32) -> Vec3 {
    let input = match mode {
        CoordinateMode::Raw => point.to_array(),
        _ => [point.x, point.y, layer_y],
    };
    Vec3::from_array(apply_axes(mode.axes(), input))
}

pub fn to_scene_space(
    point: Vec3,
    mode: CoordinateMode,
    layer_y: f32,
    frame: &ReferenceFrame,
) -> Vec3 {
    frame.place(axis_map(point, mode, layer_y))
}

/// Planar convenience for contour nodes.
pub fn planar_to_scene_space(
    node: Vec2,
    mode: CoordinateMode,
    layer_y: f32,
    frame: &ReferenceFrame,
) -> Vec3 {
    to_scene_space(node.extend(0.0), mode, layer_y, frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Vec3 = Vec3::new(2.0, 3.0, 0.0);

    #[test]
    fn layer_lies_flat_at_its_height() {
        assert_eq!(axis_map(P, CoordinateMode::Layer, 5.0), Vec3::new(2.0, 5.0, 3.0));
    }

    #[test]
    fn front_silhouette_suppresses_z() {
        assert_eq!(
            axis_map(P, CoordinateMode::FrontSilhouette, 5.0),
            Vec3::new(2.0, 3.0, 0.0)
        );
    }

    #[test]
    fn side_silhouette_suppresses_x() {
        assert_eq!(
            axis_map(P, CoordinateMode::SideSilhouette, 5.0),
            Vec3::new(0.0, 3.0, 2.0)
        );
    }

    #[test]
    fn raw_passes_through() {
        let p = Vec3::new(1.0, -2.0, 7.5);
        assert_eq!(axis_map(p, CoordinateMode::Raw, 99.0), p);
    }

    #[test]
    fn placement_scales_then_offsets() {
        let frame = ReferenceFrame::new(Vec3::new(0.0, 1.0, -1.0), 0.5);
        let scene = to_scene_space(P, CoordinateMode::Layer, 4.0, &frame);
        assert_eq!(scene, Vec3::new(1.0, 3.0, 0.5));
    }
}
