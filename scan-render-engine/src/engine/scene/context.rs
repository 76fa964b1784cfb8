use std::collections::BTreeMap;
use std::sync::Arc;

use bevy::prelude::*;

use crate::engine::loading::SourceKind;
use crate::engine::primitive::{AssembledPrimitive, PrimitiveId, PrimitiveOrigin, ScenePrimitive};

/// Everything built from one successful load of one source.
#[derive(Debug)]
pub struct BuiltScene {
    pub kind: SourceKind,
    pub generation: u64,
    pub primitives: Vec<ScenePrimitive>,
}

/// Last fully built snapshot per source.
///
/// Snapshots are swapped whole, so readers never observe a mix of old and
/// new primitives for a source.
#[derive(Resource, Debug, Default)]
pub struct SceneBuildContext {
    snapshots: BTreeMap<SourceKind, Arc<BuiltScene>>,
    next_id: u64,
}

impl SceneBuildContext {
    pub fn replace(
        &mut self,
        kind: SourceKind,
        generation: u64,
        primitives: Vec<(PrimitiveOrigin, AssembledPrimitive)>,
    ) -> Arc<BuiltScene> {
        let primitives = primitives
            .into_iter()
            .map(|(origin, primitive)| {
                self.next_id += 1;
                ScenePrimitive {
                    id: PrimitiveId(self.next_id),
                    source: kind,
                    origin,
                    primitive,
                }
            })
            .collect();

        let scene = Arc::new(BuiltScene {
            kind,
            generation,
            primitives,
        });
        self.snapshots.insert(kind, scene.clone());
        scene
    }

    pub fn snapshot(&self, kind: SourceKind) -> Option<Arc<BuiltScene>> {
        self.snapshots.get(&kind).cloned()
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Arc<BuiltScene>> {
        self.snapshots.values()
    }

    /// All attached primitives across sources.
    pub fn primitives(&self) -> impl Iterator<Item = &ScenePrimitive> {
        self.snapshots.values().flat_map(|scene| scene.primitives.iter())
    }
}
