//! Scene state and its presentation.
//!
//! Holds the built snapshots per source, mirrors them into Bevy entities,
//! and drives the hit markers and the room around the scan.

/// Per-source snapshots of assembled primitives with atomic replacement.
pub mod context;

/// Primary hit marker and the fading marker trail.
///
/// Placement runs off the per-frame pointer hits; decay only while a device is tracked.
pub mod marker;

/// Wireframe box room the scan group stands in.
pub mod room;

/// Spawns and despawns mesh entities whenever a snapshot changes.
pub mod sync;
