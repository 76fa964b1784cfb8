use bevy::prelude::*;

use crate::engine::colour::Rgba;
use crate::engine::coordinates::{CoordinateMode, ReferenceFrame, planar_to_scene_space};
use crate::engine::primitive::{LineStrip, PrimitiveBounds};
use crate::scan::Contour;

/// Caller-chosen tag for a line strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub colour: Rgba,
    pub line_width: f32,
}

/// One vertex per node, in node order.
///
/// Nothing is resampled, closed or rejected: an empty contour gives an empty
/// strip and a single node gives a one-vertex strip.
pub fn assemble_contour(
    contour: &Contour,
    mode: CoordinateMode,
    layer_y: f32,
    frame: &ReferenceFrame,
    style: LineStyle,
) -> LineStrip {
    let positions: Vec<Vec3> = contour
        .nodes
        .iter()
        .map(|node| planar_to_scene_space(*node, mode, layer_y, frame))
        .collect();

    LineStrip {
        bounds: PrimitiveBounds::from_points(&positions),
        positions,
        colour: style.colour,
        line_width: style.line_width,
    }
}
