use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future};

use super::fetch::{FileFetcher, ScanFetcher};
use super::orchestrator::{LoadOutcome, LoadTicket, ScanLoader};
use super::{DecodedScan, LoadRequest, SourceKind, fetch_and_decode};
use crate::engine::assembly::SceneBuilder;
use crate::engine::config::EngineConfig;
use crate::engine::error::LoadError;
use crate::engine::scene::context::SceneBuildContext;
use crate::scan::{JsonScanDecoder, ScanDecoder};

/// Ask for a source to be (re)loaded.
#[derive(Event, Debug, Clone)]
pub struct LoadRequested(pub LoadRequest);

#[derive(Event, Debug, Clone)]
pub struct ScanLoadFailed {
    pub kind: SourceKind,
    pub location: String,
    pub error: Arc<LoadError>,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBuilt {
    pub kind: SourceKind,
    pub generation: u64,
    pub primitives: usize,
}

/// Collaborators used by load tasks.
#[derive(Resource, Clone)]
pub struct ScanSources {
    pub fetcher: Arc<dyn ScanFetcher>,
    pub decoder: Arc<dyn ScanDecoder>,
}

impl ScanSources {
    pub fn new(fetcher: impl ScanFetcher, decoder: impl ScanDecoder) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            decoder: Arc::new(decoder),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(FileFetcher::from_asset_root(&config.sources.asset_root), JsonScanDecoder)
    }
}

/// One fetch-then-decode in flight.
#[derive(Component)]
pub struct LoadTask {
    ticket: LoadTicket,
    task: Task<Result<DecodedScan, LoadError>>,
}

pub fn spawn_load_tasks(
    mut commands: Commands,
    mut requests: EventReader<LoadRequested>,
    mut loader: ResMut<ScanLoader>,
    sources: Res<ScanSources>,
) {
    let pool = AsyncComputeTaskPool::get();

    for LoadRequested(request) in requests.read() {
        let ticket = loader.request(request);
        let request = request.clone();
        let fetcher = sources.fetcher.clone();
        let decoder = sources.decoder.clone();

        let task = pool.spawn(async move {
            fetch_and_decode(&request, fetcher.as_ref(), decoder.as_ref())
        });
        commands.spawn(LoadTask { ticket, task });
    }
}

/// Build as soon as a task is observed complete.
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadTask)>,
    mut loader: ResMut<ScanLoader>,
    mut builder: ResMut<SceneBuilder>,
    mut context: ResMut<SceneBuildContext>,
    mut built: EventWriter<ScanBuilt>,
    mut failed: EventWriter<ScanLoadFailed>,
) {
    for (entity, mut load) in &mut tasks {
        let Some(result) = block_on(future::poll_once(&mut load.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        match loader.complete(load.ticket, result, &mut builder, &mut context) {
            LoadOutcome::Built { ticket, scene, .. } => {
                built.write(ScanBuilt {
                    kind: ticket.kind,
                    generation: ticket.generation,
                    primitives: scene.primitives.len(),
                });
            }
            LoadOutcome::Failed { ticket, error } => {
                failed.write(ScanLoadFailed {
                    kind: ticket.kind,
                    location: error.location().to_string(),
                    error,
                });
            }
            LoadOutcome::Superseded { .. } => {}
        }
    }
}

/// Keep the builder in step with config reloads.
pub fn sync_builder_config(config: Res<EngineConfig>, mut builder: ResMut<SceneBuilder>) {
    if config.is_changed() {
        builder.configure(&config);
    }
}
