// Assembly of decoded scan records into primitives, end to end from JSON.

use bevy::prelude::*;
use scan_render_engine::engine::assembly::{AssemblyDiagnostic, SceneBuilder};
use scan_render_engine::engine::colour::FixedColours;
use scan_render_engine::engine::config::EngineConfig;
use scan_render_engine::engine::coordinates::ReferenceFrame;
use scan_render_engine::engine::error::{AssemblyError, MalformedReason};
use scan_render_engine::engine::primitive::{AssembledPrimitive, PrimitiveOrigin};
use scan_render_engine::scan::{JsonScanDecoder, ScanDecoder};

fn identity_builder() -> SceneBuilder {
    let mut config = EngineConfig::default();
    config.body_scan = ReferenceFrame::IDENTITY;
    SceneBuilder::new(&config).with_colours(FixedColours::default())
}

#[test]
fn layer_with_empty_region_yields_one_strip_and_one_skip() {
    let json = br#"{
        "body_parts": [{
            "name": "arm",
            "layers": [{ "y": 10.0, "contour": { "nodes": [[0, 0], [1, 0], [1, 1]] } }],
            "regions": [{
                "vertices": [[0, 0, 0], [1, 0, 0]],
                "normals": [[0, 0, 1], [0, 0, 1]],
                "polygons": []
            }]
        }]
    }"#;
    let record = JsonScanDecoder.decode_record(json).expect("record should decode");

    let output = identity_builder().build_record(&record);

    let strips = output.count(|p| matches!(p, AssembledPrimitive::LineStrip(_)));
    let meshes = output.count(|p| matches!(p, AssembledPrimitive::TriangleMesh(_)));
    assert_eq!(strips, 1);
    assert_eq!(meshes, 0);
    assert_eq!(
        output.diagnostics,
        vec![AssemblyDiagnostic::MalformedRegion(AssemblyError::MalformedRegion {
            part: "arm".into(),
            region: 0,
            reason: MalformedReason::EmptyPolygons,
        })]
    );

    match &output.primitives[0] {
        (PrimitiveOrigin::Layer { part: 0, layer: 0 }, AssembledPrimitive::LineStrip(strip)) => {
            assert_eq!(
                strip.positions,
                vec![
                    Vec3::new(0.0, 10.0, 0.0),
                    Vec3::new(1.0, 10.0, 0.0),
                    Vec3::new(1.0, 10.0, 1.0),
                ]
            );
        }
        other => panic!("unexpected first primitive {other:?}"),
    }
}

#[test]
fn region_buffers_scale_with_polygon_count() {
    let json = br#"{
        "body_parts": [{
            "regions": [{
                "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]],
                "normals": [[0, 0, 1], [0, 0, 1], [0, 0, 1], [0, 0, 1]],
                "polygons": [[0, 1, 2], [0, 2, 3], [1, 2, 3]]
            }]
        }]
    }"#;
    let record = JsonScanDecoder.decode_record(json).expect("record should decode");

    let output = identity_builder().build_record(&record);

    for (_, primitive) in &output.primitives {
        match primitive {
            AssembledPrimitive::TriangleMesh(mesh) => assert_eq!(mesh.positions.len(), 9),
            AssembledPrimitive::Wireframe(wire) => assert_eq!(wire.edges.len(), 9),
            other => panic!("unexpected primitive {other:?}"),
        }
    }
    assert_eq!(output.primitives.len(), 2);
}

#[test]
fn body_scan_frame_places_the_group() {
    let json = br#"{ "body_parts": [{ "silhouettes": [
        { "view": "front", "contour": { "nodes": [[10000, 20000]] } },
        { "view": "side", "contour": { "nodes": [[10000, 20000]] } }
    ] }] }"#;
    let record = JsonScanDecoder.decode_record(json).expect("record should decode");

    let mut builder =
        SceneBuilder::new(&EngineConfig::default()).with_colours(FixedColours::default());
    let output = builder.build_record(&record);

    let points: Vec<Vec3> = output
        .primitives
        .iter()
        .filter_map(|(_, p)| match p {
            AssembledPrimitive::LineStrip(strip) => strip.positions.first().copied(),
            _ => None,
        })
        .collect();

    // default frame: scale 1/10000, offset (0, 1, -1)
    assert!(points[0].abs_diff_eq(Vec3::new(1.0, 3.0, -1.0), 1e-5));
    assert!(points[1].abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), 1e-5));
}
