use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{ROOM_DIVISIONS, ROOM_SIZE};

// Crate engine modules
use crate::engine::assembly::SceneBuilder;
use crate::engine::config::{ConfigLoader, EngineConfig, apply_loaded_config, start_config_loading};
use crate::engine::core::app_state::{AppState, request_configured_sources, transition_to_running};
use crate::engine::input::desktop::{DesktopPointer, drive_desktop_pointer};
use crate::engine::input::pointer::{
    PointerConnected, PointerDisconnected, PointerHits, PointerRay, handle_pointer_connections,
    pointer_ray_mesh, query_pointer_hits, update_pointer_rays,
};
use crate::engine::loading::tasks::{
    LoadRequested, ScanBuilt, ScanLoadFailed, ScanSources, poll_load_tasks, spawn_load_tasks,
    sync_builder_config,
};
use crate::engine::loading::ScanLoader;
use crate::engine::scene::context::SceneBuildContext;
use crate::engine::scene::marker::{
    MarkerTrail, spawn_markers, update_marker_trail, update_primary_marker,
};
use crate::engine::scene::room::create_room;
use crate::engine::scene::sync::{AttachedSnapshots, PrimitiveMaterials, sync_scene_primitives};

/// Frame ordering: loads complete and build first, then pointers query the
/// fresh snapshots, then the results are presented.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanSystems {
    Load,
    Query,
    Present,
}

/// Loading, assembly, queries and marker logic. Needs no renderer, so it runs
/// under `MinimalPlugins` as well as `DefaultPlugins`.
pub struct ScanEnginePlugin;

impl Plugin for ScanEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .init_resource::<ScanLoader>()
            .init_resource::<SceneBuildContext>()
            .init_resource::<PointerHits>()
            .init_resource::<MarkerTrail>()
            .add_event::<LoadRequested>()
            .add_event::<ScanBuilt>()
            .add_event::<ScanLoadFailed>()
            .add_event::<PointerConnected>()
            .add_event::<PointerDisconnected>();

        // Collaborators supplied before the plugin win over the defaults.
        if !app.world().contains_resource::<SceneBuilder>() {
            let builder = SceneBuilder::new(app.world().resource::<EngineConfig>());
            app.insert_resource(builder);
        }
        if !app.world().contains_resource::<ScanSources>() {
            let sources = ScanSources::from_config(app.world().resource::<EngineConfig>());
            app.insert_resource(sources);
        }

        app.configure_sets(
            Update,
            (ScanSystems::Load, ScanSystems::Query, ScanSystems::Present).chain(),
        )
        .add_systems(
            Update,
            (sync_builder_config, spawn_load_tasks, poll_load_tasks)
                .chain()
                .in_set(ScanSystems::Load),
        )
        .add_systems(
            Update,
            (handle_pointer_connections, query_pointer_hits)
                .chain()
                .in_set(ScanSystems::Query),
        )
        .add_systems(
            Update,
            (update_primary_marker, update_marker_trail, update_pointer_rays)
                .in_set(ScanSystems::Present),
        );
    }
}

/// Mirrors snapshots into mesh entities. Requires the PBR asset types.
pub struct ScanScenePlugin;

impl Plugin for ScanScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PrimitiveMaterials>()
            .init_resource::<AttachedSnapshots>()
            .add_systems(Update, sync_scene_primitives.in_set(ScanSystems::Present));
    }
}

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers EngineConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<EngineConfig>::new(&["json"]))
        .add_plugins((ScanEnginePlugin, ScanScenePlugin))
        .insert_resource(ClearColor(Color::srgb_u8(0x50, 0x50, 0x50)))
        .init_resource::<ConfigLoader>();

    app.add_systems(Startup, (setup, start_config_loading))
        .add_systems(
            Update,
            (apply_loaded_config, transition_to_running)
                .chain()
                .run_if(in_state(AppState::LoadingConfig)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (spawn_room, spawn_markers, request_configured_sources),
        )
        .add_systems(
            Update,
            drive_desktop_pointer
                .before(ScanSystems::Query)
                .run_if(in_state(AppState::Running)),
        );

    app
}

// Startup system that only handles basic initialisation
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);

    let ray_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    commands.spawn(DesktopPointer).with_child((
        Mesh3d(meshes.add(pointer_ray_mesh())),
        MeshMaterial3d(ray_material),
        Transform::from_scale(Vec3::new(1.0, 1.0, 0.0)),
        Visibility::Hidden,
        PointerRay,
    ));
}

fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x60, 0x60, 0x60),
        brightness: 400.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.6, 3.0).looking_at(Vec3::new(0.0, 1.0, -1.0), Vec3::Y),
    ));
}

fn spawn_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    create_room(&mut commands, &mut meshes, &mut materials, ROOM_SIZE, ROOM_DIVISIONS);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(Window {
            title: "Scan Viewer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
