use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use super::context::SceneBuildContext;
use crate::engine::loading::SourceKind;
use crate::engine::primitive::PrimitiveId;

/// Entity rendering one scene primitive.
#[derive(Component, Debug)]
pub struct BuiltPrimitive {
    pub id: PrimitiveId,
    pub source: SourceKind,
}

/// Materials shared by every built primitive. Colour lives in the vertices.
#[derive(Resource)]
pub struct PrimitiveMaterials {
    pub lines: Handle<StandardMaterial>,
    pub surfaces: Handle<StandardMaterial>,
}

impl FromWorld for PrimitiveMaterials {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<StandardMaterial>>();
        Self {
            lines: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            }),
            surfaces: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            }),
        }
    }
}

/// Which generation of each source currently has entities in the world.
#[derive(Resource, Debug, Default)]
pub struct AttachedSnapshots {
    attached: HashMap<SourceKind, (u64, Vec<Entity>)>,
}

impl AttachedSnapshots {
    pub fn generation(&self, kind: SourceKind) -> Option<u64> {
        self.attached.get(&kind).map(|(generation, _)| *generation)
    }
}

/// Mirror new snapshots into the world. Old entities of a source are
/// despawned in the same pass that spawns the new ones.
pub fn sync_scene_primitives(
    mut commands: Commands,
    context: Res<SceneBuildContext>,
    mut attached: ResMut<AttachedSnapshots>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Res<PrimitiveMaterials>,
) {
    if !context.is_changed() {
        return;
    }

    for scene in context.snapshots() {
        if attached.generation(scene.kind) == Some(scene.generation) {
            continue;
        }

        let previous = attached.attached.remove(&scene.kind);
        if let Some((_, entities)) = &previous {
            for entity in entities {
                commands.entity(*entity).despawn();
            }
        }

        let entities: Vec<Entity> = scene
            .primitives
            .iter()
            .filter(|p| !p.primitive.is_empty())
            .map(|p| {
                let material = if p.primitive.is_surface() {
                    materials.surfaces.clone()
                } else {
                    materials.lines.clone()
                };
                commands
                    .spawn((
                        Mesh3d(meshes.add(p.primitive.to_mesh())),
                        MeshMaterial3d(material),
                        Transform::IDENTITY,
                        Visibility::Visible,
                        NoFrustumCulling,
                        BuiltPrimitive {
                            id: p.id,
                            source: scene.kind,
                        },
                    ))
                    .id()
            })
            .collect();

        debug!(
            "Attached {} entities for {} (detached {})",
            entities.len(),
            scene.kind,
            previous.map_or(0, |(_, e)| e.len())
        );
        attached
            .attached
            .insert(scene.kind, (scene.generation, entities));
    }
}
