//! Core application setup and state management.
//!
//! Handles plugin registration, system ordering and the config-then-run
//! state transition.

/// Engine and scene plugins plus the viewer app bootstrap.
///
/// Orders loading, querying and presentation within each frame.
pub mod app_setup;

/// Application state machine from config loading to the running scene.
pub mod app_state;
