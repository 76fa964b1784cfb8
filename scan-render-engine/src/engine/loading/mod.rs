pub mod fetch;
pub mod orchestrator;
pub mod tasks;

use std::fmt;

use bevy::prelude::*;

use super::error::LoadError;
use crate::scan::{ScanDecoder, ScanRecord, SensorPointCloud};
use fetch::ScanFetcher;

pub use orchestrator::{LoadOutcome, LoadPhase, LoadTicket, ScanLoader};
pub use tasks::{LoadRequested, ScanBuilt, ScanLoadFailed, ScanSources};

/// Independent input streams, each with its own load state and snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    BodyScan,
    SensorStream,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::BodyScan => write!(f, "body scan"),
            SourceKind::SensorStream => write!(f, "sensor stream"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub kind: SourceKind,
    pub location: String,
}

impl LoadRequest {
    pub fn new(kind: SourceKind, location: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }
}

/// Decoder output for one source, ready for assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedScan {
    Record(ScanRecord),
    Sensors(Vec<SensorPointCloud>),
}

/// Fetch then decode. Runs off the main thread inside a load task.
pub fn fetch_and_decode(
    request: &LoadRequest,
    fetcher: &dyn ScanFetcher,
    decoder: &dyn ScanDecoder,
) -> Result<DecodedScan, LoadError> {
    let bytes = fetcher
        .fetch(&request.location)
        .map_err(|source| LoadError::TransportFailure {
            kind: request.kind,
            location: request.location.clone(),
            source,
        })?;

    debug!("Fetched {} bytes for {}", bytes.len(), request.kind);

    let decoded = match request.kind {
        SourceKind::BodyScan => decoder.decode_record(&bytes).map(DecodedScan::Record),
        SourceKind::SensorStream => decoder.decode_sensors(&bytes).map(DecodedScan::Sensors),
    };

    decoded.map_err(|source| LoadError::DecodeFailure {
        kind: request.kind,
        location: request.location.clone(),
        source,
    })
}
