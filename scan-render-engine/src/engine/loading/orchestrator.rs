//! Per-source load state machine.
//!
//! ```text
//! Idle -> Loading -> Decoded -> Built
//!            \-> Failed
//! ```
//!
//! Every request bumps a generation counter. Only the newest generation of a
//! source may complete; anything older is discarded on arrival.
use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

use super::{DecodedScan, LoadRequest, SourceKind};
use crate::engine::assembly::{AssemblyDiagnostic, SceneBuilder};
use crate::engine::error::LoadError;
use crate::engine::scene::context::{BuiltScene, SceneBuildContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Decoded,
    Built,
    Failed,
}

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub kind: SourceKind,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct LoadTrack {
    phase: LoadPhase,
    generation: u64,
    location: Option<String>,
    last_error: Option<Arc<LoadError>>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Built {
        ticket: LoadTicket,
        scene: Arc<BuiltScene>,
        diagnostics: Vec<AssemblyDiagnostic>,
    },
    Failed {
        ticket: LoadTicket,
        error: Arc<LoadError>,
    },
    /// A newer request for the same source was issued meanwhile.
    Superseded { ticket: LoadTicket },
}

#[derive(Resource, Debug, Default)]
pub struct ScanLoader {
    tracks: HashMap<SourceKind, LoadTrack>,
    next_generation: u64,
}

impl ScanLoader {
    /// Start a new attempt for `request.kind`, superseding any in flight.
    pub fn request(&mut self, request: &LoadRequest) -> LoadTicket {
        self.next_generation += 1;
        let generation = self.next_generation;

        let track = self.tracks.entry(request.kind).or_default();
        if track.phase == LoadPhase::Loading {
            debug!(
                "{} request {} superseded by {generation}",
                request.kind, track.generation
            );
        }
        track.phase = LoadPhase::Loading;
        track.generation = generation;
        track.location = Some(request.location.clone());

        info!("Loading {} from {}", request.kind, request.location);
        LoadTicket {
            kind: request.kind,
            generation,
        }
    }

    pub fn phase(&self, kind: SourceKind) -> LoadPhase {
        self.tracks.get(&kind).map_or(LoadPhase::Idle, |t| t.phase)
    }

    pub fn last_error(&self, kind: SourceKind) -> Option<&LoadError> {
        self.tracks.get(&kind)?.last_error.as_deref()
    }

    pub fn location(&self, kind: SourceKind) -> Option<&str> {
        self.tracks.get(&kind)?.location.as_deref()
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.tracks
            .get(&ticket.kind)
            .is_some_and(|t| t.generation == ticket.generation)
    }

    /// Finish an attempt.
    ///
    /// A stale ticket changes nothing. A failure is recorded and leaves the
    /// previous snapshot in place. A decoded scan is assembled and swapped
    /// into `context` in one step.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<DecodedScan, LoadError>,
        builder: &mut SceneBuilder,
        context: &mut SceneBuildContext,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Discarding {} result from superseded request {}",
                ticket.kind, ticket.generation
            );
            return LoadOutcome::Superseded { ticket };
        }

        let Some(track) = self.tracks.get_mut(&ticket.kind) else {
            return LoadOutcome::Superseded { ticket };
        };

        match result {
            Err(err) => {
                warn!("Failed to load {}: {err}", ticket.kind);
                let error = Arc::new(err);
                track.phase = LoadPhase::Failed;
                track.last_error = Some(error.clone());
                LoadOutcome::Failed { ticket, error }
            }
            Ok(decoded) => {
                track.phase = LoadPhase::Decoded;

                let output = builder.build(&decoded);
                let skipped = output.malformed_regions().count();
                let scene = context.replace(ticket.kind, ticket.generation, output.primitives);

                track.phase = LoadPhase::Built;
                track.last_error = None;
                info!(
                    "✓ Built {}: {} primitives, {} regions skipped",
                    ticket.kind,
                    scene.primitives.len(),
                    skipped
                );

                LoadOutcome::Built {
                    ticket,
                    scene,
                    diagnostics: output.diagnostics,
                }
            }
        }
    }
}
