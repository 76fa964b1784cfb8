use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Root of a decoded body scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(default)]
    pub body_parts: Vec<BodyPart>,
}

/// Anatomical region grouping layers, silhouettes and surface regions.
/// Every collection may be absent or empty; both read as "nothing to draw".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyPart {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub silhouettes: Vec<SilhouetteCurve>,
    #[serde(default)]
    pub regions: Vec<SurfaceRegion>,
}

impl BodyPart {
    /// Label used in diagnostics, falls back to the part's position in the record.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("part#{index}"),
        }
    }
}

/// Horizontal cross-section at height `y`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub y: f32,
    #[serde(default)]
    pub contour: Contour,
}

/// Ordered 2-D points. Node order is the drawn path; there is no closing edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    #[serde(default)]
    pub nodes: Vec<Vec2>,
}

impl Contour {
    pub fn new(nodes: Vec<Vec2>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SilhouetteView {
    Front,
    Side,
}

/// Projected outline of a body part seen from the front or the side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilhouetteCurve {
    pub view: SilhouetteView,
    #[serde(default)]
    pub contour: Contour,
}

/// Indexed triangle patch with one normal per vertex.
///
/// Indices are not trusted: the mesh assembler validates every polygon
/// against `vertices` and `normals` before dereferencing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRegion {
    #[serde(default)]
    pub vertices: Vec<Vec3>,
    #[serde(default)]
    pub normals: Vec<Vec3>,
    #[serde(default)]
    pub polygons: Vec<[u32; 3]>,
}
