//! Error taxonomy for loading and assembly.
//!
//! Transport problems abort the load attempt they belong to and are surfaced
//! to the caller. Assembly problems are isolated to a single region and only
//! ever show up as diagnostics.

use thiserror::Error;

use super::loading::SourceKind;

/// Decoder collaborator rejected the payload.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed scan payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fetch collaborator could not deliver bytes.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing found at {location}")]
    NotFound { location: String },
}

/// Terminal failure of a single load attempt.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("transport failure loading {kind} from {location}: {source}")]
    TransportFailure {
        kind: SourceKind,
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("decode failure loading {kind} from {location}: {source}")]
    DecodeFailure {
        kind: SourceKind,
        location: String,
        #[source]
        source: DecodeError,
    },
}

/// Why a surface region was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("region has no polygons")]
    EmptyPolygons,

    #[error("polygon {polygon} references vertex {index} but only {vertex_count} exist")]
    IndexOutOfBounds {
        polygon: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("{vertex_count} vertices but {normal_count} normals")]
    NormalCountMismatch {
        vertex_count: usize,
        normal_count: usize,
    },
}

/// Structural problem found while assembling one region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("malformed region {region} of {part}: {reason}")]
    MalformedRegion {
        part: String,
        region: usize,
        reason: MalformedReason,
    },
}

impl LoadError {
    pub fn kind(&self) -> SourceKind {
        match self {
            LoadError::TransportFailure { kind, .. } | LoadError::DecodeFailure { kind, .. } => *kind,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            LoadError::TransportFailure { location, .. }
            | LoadError::DecodeFailure { location, .. } => location,
        }
    }
}
