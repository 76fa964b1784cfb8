// Snapshot replacement mirrored into the world as mesh entities.

use bevy::prelude::*;
use scan_render_engine::ScanScenePlugin;
use scan_render_engine::engine::loading::SourceKind;
use scan_render_engine::engine::primitive::{
    AssembledPrimitive, LineStrip, PointSet, PrimitiveBounds, PrimitiveOrigin,
};
use scan_render_engine::engine::scene::context::SceneBuildContext;
use scan_render_engine::engine::scene::sync::{AttachedSnapshots, BuiltPrimitive};

fn scene_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_resource::<SceneBuildContext>()
        .add_plugins(ScanScenePlugin);
    app
}

fn cloud(sensor: usize, positions: Vec<Vec3>) -> (PrimitiveOrigin, AssembledPrimitive) {
    (
        PrimitiveOrigin::Sensor {
            sensor,
            label: format!("sensor#{sensor}"),
        },
        AssembledPrimitive::PointSet(PointSet {
            bounds: PrimitiveBounds::from_points(&positions),
            positions,
            colours: None,
            point_size: 0.02,
        }),
    )
}

fn empty_strip() -> (PrimitiveOrigin, AssembledPrimitive) {
    (
        PrimitiveOrigin::Layer { part: 0, layer: 0 },
        AssembledPrimitive::LineStrip(LineStrip {
            positions: Vec::new(),
            colour: [1.0; 4],
            line_width: 1.5,
            bounds: None,
        }),
    )
}

fn attached_ids(app: &mut App) -> Vec<u64> {
    let mut query = app.world_mut().query::<&BuiltPrimitive>();
    let mut ids: Vec<u64> = query.iter(app.world()).map(|p| p.id.0).collect();
    ids.sort_unstable();
    ids
}

fn snapshot_ids(app: &App, kind: SourceKind) -> Vec<u64> {
    let context = app.world().resource::<SceneBuildContext>();
    let mut ids: Vec<u64> = context
        .snapshot(kind)
        .map(|scene| {
            scene
                .primitives
                .iter()
                .filter(|p| !p.primitive.is_empty())
                .map(|p| p.id.0)
                .collect()
        })
        .unwrap_or_default();
    ids.sort_unstable();
    ids
}

#[test]
fn replacing_a_source_swaps_its_entities() {
    let mut app = scene_app();

    app.world_mut().resource_mut::<SceneBuildContext>().replace(
        SourceKind::SensorStream,
        1,
        vec![
            cloud(0, vec![Vec3::ZERO]),
            cloud(1, vec![Vec3::ONE]),
            empty_strip(),
        ],
    );
    app.update();

    let first = attached_ids(&mut app);
    assert_eq!(first.len(), 2);
    assert_eq!(first, snapshot_ids(&app, SourceKind::SensorStream));

    app.world_mut().resource_mut::<SceneBuildContext>().replace(
        SourceKind::SensorStream,
        2,
        vec![cloud(0, vec![Vec3::X]), empty_strip()],
    );
    app.update();

    let second = attached_ids(&mut app);
    assert_eq!(second.len(), 1);
    assert_eq!(second, snapshot_ids(&app, SourceKind::SensorStream));
    assert!(second.iter().all(|id| !first.contains(id)));
    assert_eq!(
        app.world()
            .resource::<AttachedSnapshots>()
            .generation(SourceKind::SensorStream),
        Some(2)
    );
}

#[test]
fn other_sources_keep_their_entities() {
    let mut app = scene_app();

    {
        let mut context = app.world_mut().resource_mut::<SceneBuildContext>();
        context.replace(SourceKind::SensorStream, 1, vec![cloud(0, vec![Vec3::ZERO])]);
        context.replace(SourceKind::BodyScan, 2, vec![cloud(0, vec![Vec3::Y])]);
    }
    app.update();
    let body = snapshot_ids(&app, SourceKind::BodyScan);

    app.world_mut().resource_mut::<SceneBuildContext>().replace(
        SourceKind::SensorStream,
        3,
        vec![cloud(0, vec![Vec3::X]), cloud(1, vec![Vec3::Z])],
    );
    app.update();

    let attached = attached_ids(&mut app);
    assert_eq!(attached.len(), 3);
    assert!(body.iter().all(|id| attached.contains(id)));
}
