//! Renderable buffers produced by the assemblers.
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;

use super::colour::Rgba;
use super::loading::SourceKind;
use crate::scan::SilhouetteView;

/// Axis-aligned bounding volume in scene space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl PrimitiveBounds {
    /// `None` for an empty buffer.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }
}

/// Ordered vertices joined in sequence. No closing segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    pub positions: Vec<Vec3>,
    pub colour: Rgba,
    pub line_width: f32,
    pub bounds: Option<PrimitiveBounds>,
}

/// Flat, non-indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colours: Vec<Rgba>,
    pub bounds: Option<PrimitiveBounds>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub positions: Vec<Vec3>,
    pub colours: Option<Vec<Rgba>>,
    pub point_size: f32,
    pub bounds: Option<PrimitiveBounds>,
}

/// Edge overlay derived from a triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub edges: Vec<[Vec3; 2]>,
    pub colour: Rgba,
    pub bounds: Option<PrimitiveBounds>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssembledPrimitive {
    LineStrip(LineStrip),
    TriangleMesh(TriangleMesh),
    PointSet(PointSet),
    Wireframe(Wireframe),
}

impl AssembledPrimitive {
    pub fn bounds(&self) -> Option<PrimitiveBounds> {
        match self {
            Self::LineStrip(strip) => strip.bounds,
            Self::TriangleMesh(mesh) => mesh.bounds,
            Self::PointSet(points) => points.bounds,
            Self::Wireframe(wire) => wire.bounds,
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Self::LineStrip(strip) => strip.positions.len(),
            Self::TriangleMesh(mesh) => mesh.positions.len(),
            Self::PointSet(points) => points.positions.len(),
            Self::Wireframe(wire) => wire.edges.len() * 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Triangle meshes render lit and blended, everything else unlit.
    pub fn is_surface(&self) -> bool {
        matches!(self, Self::TriangleMesh(_))
    }

    /// Convert to a Bevy mesh asset. Colours go in the vertex colour channel.
    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::LineStrip(strip) => {
                let colours = vec![strip.colour; strip.positions.len()];
                coloured_mesh(PrimitiveTopology::LineStrip, to_arrays(&strip.positions), colours)
            }
            Self::TriangleMesh(mesh) => {
                let normals: Vec<[f32; 3]> = mesh.normals.iter().map(|n| n.to_array()).collect();
                coloured_mesh(
                    PrimitiveTopology::TriangleList,
                    to_arrays(&mesh.positions),
                    mesh.colours.clone(),
                )
                .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            }
            Self::PointSet(points) => {
                let colours = points
                    .colours
                    .clone()
                    .unwrap_or_else(|| vec![[1.0; 4]; points.positions.len()]);
                coloured_mesh(PrimitiveTopology::PointList, to_arrays(&points.positions), colours)
            }
            Self::Wireframe(wire) => {
                let positions: Vec<[f32; 3]> = wire
                    .edges
                    .iter()
                    .flat_map(|[a, b]| [a.to_array(), b.to_array()])
                    .collect();
                let colours = vec![wire.colour; positions.len()];
                coloured_mesh(PrimitiveTopology::LineList, positions, colours)
            }
        }
    }
}

fn to_arrays(points: &[Vec3]) -> Vec<[f32; 3]> {
    points.iter().map(|p| p.to_array()).collect()
}

fn coloured_mesh(topology: PrimitiveTopology, positions: Vec<[f32; 3]>, colours: Vec<Rgba>) -> Mesh {
    Mesh::new(topology, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colours)
}

/// Stable identity of a primitive within the scene, unique across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u64);

/// Which piece of scan data a primitive was assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveOrigin {
    Layer { part: usize, layer: usize },
    Silhouette { part: usize, view: SilhouetteView, index: usize },
    Region { part: usize, region: usize },
    RegionWireframe { part: usize, region: usize },
    Sensor { sensor: usize, label: String },
}

/// A primitive attached to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePrimitive {
    pub id: PrimitiveId,
    pub source: SourceKind,
    pub origin: PrimitiveOrigin,
    pub primitive: AssembledPrimitive,
}
