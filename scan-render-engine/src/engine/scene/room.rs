/// Wireframe room the scan group is placed in
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;

#[derive(Component)]
pub struct RoomWireframe;

/// Line-list positions for a cube of edge `size` standing on y = 0.
///
/// For every axis, `divisions + 1` rectangular rings wrap the cube at evenly
/// spaced positions along that axis.
pub fn room_line_positions(size: f32, divisions: u32) -> Vec<[f32; 3]> {
    let half = size * 0.5;
    let divisions = divisions.max(1);
    let mut vertices = Vec::new();

    for axis in 0..3 {
        let (u, v) = ((axis + 1) % 3, (axis + 2) % 3);
        for i in 0..=divisions {
            let along = -half + size * i as f32 / divisions as f32;
            let corners = [(-half, -half), (half, -half), (half, half), (-half, half)];

            for k in 0..4 {
                let (a, b) = (corners[k], corners[(k + 1) % 4]);
                for (cu, cv) in [a, b] {
                    let mut p = [0.0; 3];
                    p[axis] = along;
                    p[u] = cu;
                    p[v] = cv;
                    p[1] += half; // floor at y = 0
                    vertices.push(p);
                }
            }
        }
    }

    vertices
}

pub fn create_room(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    size: f32,
    divisions: u32,
) {
    let room_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.5, 0.5),
        unlit: true,
        ..default()
    });

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, room_line_positions(size, divisions));

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(room_material),
        Visibility::Visible,
        NoFrustumCulling,
        Transform::IDENTITY,
        RoomWireframe,
    ));
}
