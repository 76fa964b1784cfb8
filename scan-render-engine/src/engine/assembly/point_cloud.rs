use bevy::prelude::*;

use crate::engine::colour::{ColourPolicy, Rgba};
use crate::engine::coordinates::{CoordinateMode, ReferenceFrame, to_scene_space};
use crate::engine::primitive::{PointSet, PrimitiveBounds};
use crate::scan::SensorPointCloud;

/// Place every sample of one sensor with the same frame.
///
/// Colours recorded by the sensor win; otherwise each point asks the policy.
pub fn assemble_point_cloud(
    cloud: &SensorPointCloud,
    sensor_index: usize,
    placement: &ReferenceFrame,
    colours: &mut dyn ColourPolicy,
    point_size: f32,
) -> PointSet {
    let positions: Vec<Vec3> = cloud
        .points
        .iter()
        .map(|p| to_scene_space(*p, CoordinateMode::Raw, 0.0, placement))
        .collect();

    let point_colours: Vec<Rgba> = match cloud.matched_colours() {
        Some(recorded) => recorded.iter().map(|[r, g, b]| [*r, *g, *b, 1.0]).collect(),
        None => (0..positions.len())
            .map(|point| colours.point_colour(sensor_index, point))
            .collect(),
    };

    PointSet {
        bounds: PrimitiveBounds::from_points(&positions),
        positions,
        colours: Some(point_colours),
        point_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::colour::FixedColours;

    #[test]
    fn one_entry_per_sample_with_shared_placement() {
        let cloud = SensorPointCloud::new(vec![Vec3::new(8.0, 0.0, 0.0), Vec3::new(0.0, 16.0, 0.0)]);
        let frame = ReferenceFrame::new(Vec3::new(0.0, -1.0, -2.0), 0.25);
        let mut colours = FixedColours::default();

        let set = assemble_point_cloud(&cloud, 0, &frame, &mut colours, 0.02);

        assert_eq!(
            set.positions,
            vec![Vec3::new(2.0, -1.0, -2.0), Vec3::new(0.0, 3.0, -2.0)]
        );
        assert_eq!(set.colours, Some(vec![colours.point; 2]));
    }

    #[test]
    fn recorded_colours_take_precedence() {
        let mut cloud = SensorPointCloud::new(vec![Vec3::ZERO]);
        cloud.colours = Some(vec![[0.2, 0.4, 0.6]]);
        let mut colours = FixedColours::default();

        let set = assemble_point_cloud(&cloud, 0, &ReferenceFrame::IDENTITY, &mut colours, 0.02);
        assert_eq!(set.colours, Some(vec![[0.2, 0.4, 0.6, 1.0]]));
    }

    #[test]
    fn empty_cloud_is_an_empty_set() {
        let mut colours = FixedColours::default();
        let set = assemble_point_cloud(
            &SensorPointCloud::default(),
            0,
            &ReferenceFrame::IDENTITY,
            &mut colours,
            0.02,
        );
        assert!(set.positions.is_empty());
        assert!(set.bounds.is_none());
    }
}
