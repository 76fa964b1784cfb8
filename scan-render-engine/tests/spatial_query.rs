// Nearest-hit queries over a built scene.

use bevy::prelude::*;
use scan_render_engine::engine::assembly::SceneBuilder;
use scan_render_engine::engine::colour::FixedColours;
use scan_render_engine::engine::config::EngineConfig;
use scan_render_engine::engine::coordinates::ReferenceFrame;
use scan_render_engine::engine::loading::SourceKind;
use scan_render_engine::engine::primitive::{AssembledPrimitive, ScenePrimitive};
use scan_render_engine::engine::query::{InteractionMode, query_nearest, select_targets};
use scan_render_engine::engine::scene::context::SceneBuildContext;
use scan_render_engine::scan::{
    BodyPart, Contour, Layer, ScanRecord, SensorPointCloud, SurfaceRegion,
};

const THRESHOLD: f32 = 0.01;

fn forward_ray() -> Ray3d {
    Ray3d::new(Vec3::ZERO, Dir3::NEG_Z)
}

fn identity_context(record: &ScanRecord, sensors: &[SensorPointCloud]) -> SceneBuildContext {
    let mut config = EngineConfig::default();
    config.body_scan = ReferenceFrame::IDENTITY;
    config.sensors.frame = ReferenceFrame::IDENTITY;
    let mut builder = SceneBuilder::new(&config).with_colours(FixedColours::default());

    let mut context = SceneBuildContext::default();
    context.replace(SourceKind::BodyScan, 1, builder.build_record(record).primitives);
    context.replace(SourceKind::SensorStream, 2, builder.build_sensors(sensors).primitives);
    context
}

#[test]
fn single_sample_within_threshold_is_hit() {
    let sample = Vec3::new(0.004, -0.003, -1.5);
    let context = identity_context(
        &ScanRecord::default(),
        &[SensorPointCloud::new(vec![sample])],
    );

    let hit = query_nearest(forward_ray(), context.primitives(), THRESHOLD).expect("sample should be hit");
    assert_eq!(hit.point, sample);
    assert!((hit.distance - sample.length()).abs() < 1e-6);
}

#[test]
fn empty_targets_never_hit() {
    let targets: Vec<&ScenePrimitive> = Vec::new();
    assert!(query_nearest(forward_ray(), targets, THRESHOLD).is_none());
    assert!(query_nearest(forward_ray(), SceneBuildContext::default().primitives(), THRESHOLD).is_none());
}

#[test]
fn layer_contour_is_hit_at_closest_segment_point() {
    // a layer at height 0 whose second segment crosses the ray at z = -2
    let record = ScanRecord {
        body_parts: vec![BodyPart {
            layers: vec![Layer {
                y: 0.0,
                contour: Contour::new(vec![
                    Vec2::new(-1.0, -3.0),
                    Vec2::new(-1.0, -2.0),
                    Vec2::new(1.0, -2.0),
                ]),
            }],
            ..default()
        }],
    };
    let context = identity_context(&record, &[]);

    let hit = query_nearest(forward_ray(), context.primitives(), THRESHOLD).expect("contour should be hit");
    assert!(hit.point.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
}

#[test]
fn single_node_layer_is_hit_at_its_vertex() {
    let record = ScanRecord {
        body_parts: vec![BodyPart {
            layers: vec![Layer {
                y: 0.0,
                contour: Contour::new(vec![Vec2::new(0.0, -2.0)]),
            }],
            ..default()
        }],
    };
    let context = identity_context(&record, &[]);

    let hit = query_nearest(forward_ray(), context.primitives(), THRESHOLD).expect("node should be hit");
    assert_eq!(hit.point, Vec3::new(0.0, 0.0, -2.0));
    assert_eq!(hit.distance, 2.0);
}

#[test]
fn interaction_mode_limits_candidates() {
    let record = ScanRecord {
        body_parts: vec![BodyPart {
            regions: vec![SurfaceRegion {
                vertices: vec![
                    Vec3::new(-1.0, -1.0, -1.0),
                    Vec3::new(1.0, -1.0, -1.0),
                    Vec3::new(0.0, 1.0, -1.0),
                ],
                normals: vec![Vec3::Z; 3],
                polygons: vec![[0, 1, 2]],
            }],
            ..default()
        }],
    };
    let behind_surface = Vec3::new(0.0, 0.0, -3.0);
    let context = identity_context(&record, &[SensorPointCloud::new(vec![behind_surface])]);

    let all = query_nearest(forward_ray(), context.primitives(), THRESHOLD).expect("surface hit");
    assert!(all.point.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));

    let points = select_targets(context.primitives(), InteractionMode::PointClouds);
    let hit = query_nearest(forward_ray(), points, THRESHOLD).expect("point hit");
    assert_eq!(hit.point, behind_surface);

    let surfaces: Vec<_> = select_targets(context.primitives(), InteractionMode::Surfaces).collect();
    assert!(surfaces
        .iter()
        .all(|p| !matches!(p.primitive, AssembledPrimitive::PointSet(_))));
}
