use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;

use crate::engine::config::EngineConfig;
use crate::engine::query::{Hit, query_nearest, select_targets};
use crate::engine::scene::context::SceneBuildContext;

/// A handheld or emulated pointing device. Its `GlobalTransform` is the pose.
#[derive(Component, Debug, Default)]
pub struct PointerDevice;

/// Present while the device is connected and reporting poses.
#[derive(Component, Debug, Default)]
pub struct Tracked;

/// Visual ray parented to a pointer, scaled along -Z.
#[derive(Component, Debug)]
pub struct PointerRay;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerConnected(pub Entity);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDisconnected(pub Entity);

/// Latest query result per tracked device.
#[derive(Resource, Debug, Default)]
pub struct PointerHits {
    per_device: HashMap<Entity, Option<Hit>>,
}

impl PointerHits {
    pub fn get(&self, device: Entity) -> Option<Hit> {
        self.per_device.get(&device).copied().flatten()
    }

    pub fn any_tracked(&self) -> bool {
        !self.per_device.is_empty()
    }

    /// Closest hit across all devices.
    pub fn nearest(&self) -> Option<Hit> {
        self.per_device
            .values()
            .flatten()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .copied()
    }
}

/// Origin at the pose translation, direction is the pose rotation applied to -Z.
pub fn pointer_ray(pose: &GlobalTransform) -> Ray3d {
    let direction = Dir3::new(pose.rotation() * Vec3::NEG_Z).unwrap_or(Dir3::NEG_Z);
    Ray3d::new(pose.translation(), direction)
}

pub fn handle_pointer_connections(
    mut commands: Commands,
    mut connected: EventReader<PointerConnected>,
    mut disconnected: EventReader<PointerDisconnected>,
    devices: Query<(), With<PointerDevice>>,
) {
    for PointerConnected(entity) in connected.read() {
        if devices.contains(*entity) {
            info!("Pointer {entity} connected");
            commands.entity(*entity).insert(Tracked);
        }
    }

    for PointerDisconnected(entity) in disconnected.read() {
        if devices.contains(*entity) {
            info!("Pointer {entity} disconnected");
            commands.entity(*entity).remove::<Tracked>();
        }
    }
}

/// One nearest-hit query per tracked device per frame.
pub fn query_pointer_hits(
    pointers: Query<(Entity, &GlobalTransform), (With<PointerDevice>, With<Tracked>)>,
    context: Res<SceneBuildContext>,
    config: Res<EngineConfig>,
    mut hits: ResMut<PointerHits>,
) {
    hits.per_device.clear();

    for (entity, pose) in &pointers {
        let targets = select_targets(context.primitives(), config.query.interaction_mode);
        let hit = query_nearest(pointer_ray(pose), targets, config.query.threshold);
        hits.per_device.insert(entity, hit);
    }
}

/// Extend the ray visual while tracked, collapse it otherwise.
pub fn update_pointer_rays(
    pointers: Query<(Has<Tracked>, &Children), With<PointerDevice>>,
    mut rays: Query<(&mut Transform, &mut Visibility), With<PointerRay>>,
    config: Res<EngineConfig>,
) {
    for (tracked, children) in &pointers {
        for &child in &**children {
            let Ok((mut transform, mut visibility)) = rays.get_mut(child) else {
                continue;
            };
            let length = ray_visual_length(tracked, config.query.ray_length);
            transform.scale.z = length;
            *visibility = if length > 0.0 {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

/// Unit line along -Z; `update_pointer_rays` stretches it through the scale.
pub fn pointer_ray_mesh() -> Mesh {
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vec![[0.0, 0.0, 0.0], [0.0, 0.0, -1.0]])
}

pub fn ray_visual_length(tracked: bool, length: f32) -> f32 {
    if tracked { length } else { 0.0 }
}
