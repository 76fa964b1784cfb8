use std::collections::HashSet;

use bevy::prelude::*;

use crate::engine::colour::{ColourPolicy, Rgba};
use crate::engine::coordinates::{CoordinateMode, ReferenceFrame, to_scene_space};
use crate::engine::error::MalformedReason;
use crate::engine::primitive::{PrimitiveBounds, TriangleMesh, Wireframe};
use crate::scan::SurfaceRegion;

/// Check a region before any of its arrays are indexed.
pub fn validate_region(region: &SurfaceRegion) -> Result<(), MalformedReason> {
    if region.polygons.is_empty() {
        return Err(MalformedReason::EmptyPolygons);
    }

    let vertex_count = region.vertices.len();
    if region.normals.len() != vertex_count {
        return Err(MalformedReason::NormalCountMismatch {
            vertex_count,
            normal_count: region.normals.len(),
        });
    }

    for (polygon, indices) in region.polygons.iter().enumerate() {
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MalformedReason::IndexOutOfBounds {
                polygon,
                index,
                vertex_count,
            });
        }
    }

    Ok(())
}

/// Expand an indexed region into a flat triangle list.
///
/// Positions are mapped through the frame, normals are carried over as given.
/// Every vertex of a triangle takes that triangle's colour.
pub fn assemble_region(
    region: &SurfaceRegion,
    region_index: usize,
    frame: &ReferenceFrame,
    colours: &mut dyn ColourPolicy,
) -> Result<TriangleMesh, MalformedReason> {
    validate_region(region)?;

    let vertex_total = region.polygons.len() * 3;
    let mut positions = Vec::with_capacity(vertex_total);
    let mut normals = Vec::with_capacity(vertex_total);
    let mut vertex_colours: Vec<Rgba> = Vec::with_capacity(vertex_total);

    for (triangle, indices) in region.polygons.iter().enumerate() {
        let colour = colours.triangle_colour(region_index, triangle);
        for &index in indices {
            let index = index as usize;
            positions.push(to_scene_space(
                region.vertices[index],
                CoordinateMode::Raw,
                0.0,
                frame,
            ));
            normals.push(region.normals[index]);
            vertex_colours.push(colour);
        }
    }

    Ok(TriangleMesh {
        bounds: PrimitiveBounds::from_points(&positions),
        positions,
        normals,
        colours: vertex_colours,
    })
}

/// Three edges per triangle, shared edges repeated.
pub fn wireframe_edges(mesh: &TriangleMesh) -> Vec<[Vec3; 2]> {
    mesh.triangles()
        .flat_map(|[a, b, c]| [[a, b], [b, c], [c, a]])
        .collect()
}

/// Drop repeated edges regardless of direction, keeping first occurrence order.
pub fn dedup_edges(edges: &[[Vec3; 2]]) -> Vec<[Vec3; 2]> {
    let mut seen = HashSet::with_capacity(edges.len());
    edges
        .iter()
        .filter(|[a, b]| {
            let (ka, kb) = (bits(*a), bits(*b));
            seen.insert(if ka <= kb { (ka, kb) } else { (kb, ka) })
        })
        .copied()
        .collect()
}

fn bits(v: Vec3) -> [u32; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

pub fn wireframe_overlay(mesh: &TriangleMesh, colour: Rgba) -> Wireframe {
    Wireframe {
        edges: wireframe_edges(mesh),
        colour,
        bounds: mesh.bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::colour::FixedColours;

    fn quad() -> SurfaceRegion {
        SurfaceRegion {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vec3::Z; 4],
            polygons: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn triangle_soup_has_three_vertices_per_polygon() {
        let mut colours = FixedColours::default();
        let mesh = assemble_region(&quad(), 0, &ReferenceFrame::IDENTITY, &mut colours).unwrap();

        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.normals.len(), 6);
        assert_eq!(mesh.colours.len(), 6);
        assert_eq!(mesh.positions[4], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn wireframe_has_three_edges_per_triangle_before_dedup() {
        let mut colours = FixedColours::default();
        let mesh = assemble_region(&quad(), 0, &ReferenceFrame::IDENTITY, &mut colours).unwrap();

        let edges = wireframe_edges(&mesh);
        assert_eq!(edges.len(), 6);
        // the diagonal 0-2 is shared
        assert_eq!(dedup_edges(&edges).len(), 5);
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let mut region = quad();
        region.polygons.push([0, 3, 4]);

        assert_eq!(
            validate_region(&region),
            Err(MalformedReason::IndexOutOfBounds {
                polygon: 2,
                index: 4,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn empty_polygons_and_normal_mismatch_are_rejected() {
        let mut empty = quad();
        empty.polygons.clear();
        assert_eq!(validate_region(&empty), Err(MalformedReason::EmptyPolygons));

        let mut mismatched = quad();
        mismatched.normals.pop();
        assert_eq!(
            validate_region(&mismatched),
            Err(MalformedReason::NormalCountMismatch {
                vertex_count: 4,
                normal_count: 3
            })
        );
    }
}
