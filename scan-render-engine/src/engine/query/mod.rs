//! Ray queries against assembled primitives.
pub mod nearest;
pub mod ray;

use serde::{Deserialize, Serialize};

use crate::engine::primitive::AssembledPrimitive;

pub use nearest::{Hit, query_nearest, select_targets};

/// Which primitives a pointer can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Sensor point sets only.
    PointClouds,
    /// Body-scan geometry: contours, meshes and their wireframes.
    Surfaces,
    #[default]
    All,
}

impl InteractionMode {
    pub fn accepts(self, primitive: &AssembledPrimitive) -> bool {
        match self {
            Self::PointClouds => matches!(primitive, AssembledPrimitive::PointSet(_)),
            Self::Surfaces => !matches!(primitive, AssembledPrimitive::PointSet(_)),
            Self::All => true,
        }
    }
}
