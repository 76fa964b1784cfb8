use bevy::prelude::*;

use crate::engine::config::{ConfigLoader, EngineConfig};
use crate::engine::loading::{LoadRequest, LoadRequested, ScanSources, SourceKind};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    LoadingConfig,
    Running,
}

pub fn transition_to_running(
    loader: Res<ConfigLoader>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loader.settled {
        info!("Engine config settled, starting scene");
        next_state.set(AppState::Running);
    }
}

/// The load requests a config asks for, in issue order.
pub fn configured_requests(config: &EngineConfig) -> Vec<LoadRequest> {
    let sources = &config.sources;
    [
        (SourceKind::BodyScan, sources.body_scan.as_ref()),
        (SourceKind::SensorStream, sources.sensor_stream.as_ref()),
    ]
    .into_iter()
    .filter_map(|(kind, location)| location.map(|l| LoadRequest::new(kind, l.clone())))
    .collect()
}

/// Point the fetcher at the configured root and request every enabled source.
pub fn request_configured_sources(
    mut commands: Commands,
    config: Res<EngineConfig>,
    mut requests: EventWriter<LoadRequested>,
) {
    commands.insert_resource(ScanSources::from_config(&config));

    for request in configured_requests(&config) {
        requests.write(LoadRequested(request));
    }
}
