use std::collections::HashMap;

use bevy::prelude::*;
use constants::coordinate_system::{
    BODY_SCAN_OFFSET, BODY_SCAN_SCALE, SENSOR_OFFSET, SENSOR_SCALE,
};
use constants::path::{ASSET_ROOT, BODY_SCAN_PATH, ENGINE_CONFIG_PATH, SENSOR_STREAM_PATH};
use constants::render_settings::{
    LAYER_LINE_WIDTH, MARKER_DECAY, MARKER_MAX_SCALE, MARKER_MIN_SCALE, MARKER_RADIUS,
    MARKER_SPAWN_INTERVAL, MARKER_TRAIL_LENGTH, MESH_ALPHA_RANGE, MESH_BASE_COLOUR, POINT_SIZE,
    POINTER_RAY_LENGTH, QUERY_THRESHOLD, SILHOUETTE_LINE_WIDTH, WIREFRAME_COLOUR,
};
use serde::{Deserialize, Serialize};

use super::coordinates::ReferenceFrame;
use super::query::InteractionMode;

/// Engine settings, read from `config/engine.json` through the JSON asset
/// plugin. Any missing section or field falls back to the workspace constants.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub body_scan: ReferenceFrame,
    pub sensors: SensorPlacement,
    pub build: BuildSettings,
    pub query: QuerySettings,
    pub marker: MarkerSettings,
    pub sources: SourceSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            body_scan: ReferenceFrame::new(BODY_SCAN_OFFSET, BODY_SCAN_SCALE),
            sensors: SensorPlacement::default(),
            build: BuildSettings::default(),
            query: QuerySettings::default(),
            marker: MarkerSettings::default(),
            sources: SourceSettings::default(),
        }
    }
}

/// Shared sensor frame plus optional per-sensor replacements keyed by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorPlacement {
    pub frame: ReferenceFrame,
    pub overrides: HashMap<String, ReferenceFrame>,
}

impl SensorPlacement {
    pub fn frame_for(&self, label: &str) -> ReferenceFrame {
        self.overrides.get(label).copied().unwrap_or(self.frame)
    }
}

impl Default for SensorPlacement {
    fn default() -> Self {
        Self {
            frame: ReferenceFrame::new(SENSOR_OFFSET, SENSOR_SCALE),
            overrides: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub wireframe: bool,
    pub layer_line_width: f32,
    pub silhouette_line_width: f32,
    pub point_size: f32,
    pub mesh_base_colour: [f32; 3],
    pub mesh_alpha_range: (f32, f32),
    pub wireframe_colour: [f32; 4],
    /// Fixed seed for reproducible colours; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            wireframe: true,
            layer_line_width: LAYER_LINE_WIDTH,
            silhouette_line_width: SILHOUETTE_LINE_WIDTH,
            point_size: POINT_SIZE,
            mesh_base_colour: MESH_BASE_COLOUR,
            mesh_alpha_range: MESH_ALPHA_RANGE,
            wireframe_colour: WIREFRAME_COLOUR,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub threshold: f32,
    pub interaction_mode: InteractionMode,
    pub ray_length: f32,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            threshold: QUERY_THRESHOLD,
            interaction_mode: InteractionMode::All,
            ray_length: POINTER_RAY_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub radius: f32,
    pub trail_length: usize,
    pub spawn_interval: f32,
    pub decay: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            radius: MARKER_RADIUS,
            trail_length: MARKER_TRAIL_LENGTH,
            spawn_interval: MARKER_SPAWN_INTERVAL,
            decay: MARKER_DECAY,
            min_scale: MARKER_MIN_SCALE,
            max_scale: MARKER_MAX_SCALE,
        }
    }
}

/// Where the fetcher looks for each source. `None` disables that source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub asset_root: String,
    pub body_scan: Option<String>,
    pub sensor_stream: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            asset_root: ASSET_ROOT.to_string(),
            body_scan: Some(BODY_SCAN_PATH.to_string()),
            sensor_stream: Some(SENSOR_STREAM_PATH.to_string()),
        }
    }
}

/// Tracks the config asset until it either resolves or fails.
#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<EngineConfig>>,
    pub settled: bool,
}

pub fn start_config_loading(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading engine config from {}", ENGINE_CONFIG_PATH);
    loader.handle = Some(asset_server.load(ENGINE_CONFIG_PATH));
}

/// Install the loaded config, or keep defaults when the asset failed.
pub fn apply_loaded_config(
    mut commands: Commands,
    mut loader: ResMut<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<EngineConfig>>,
) {
    if loader.settled {
        return;
    }

    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let Some(config) = configs.get(&handle) {
        info!("✓ Engine config loaded");
        commands.insert_resource(config.clone());
        loader.settled = true;
    } else if let Some(bevy::asset::LoadState::Failed(err)) = asset_server.get_load_state(&handle)
    {
        warn!("Engine config unavailable ({err}), using defaults");
        loader.settled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.body_scan.scale, BODY_SCAN_SCALE);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let json = r#"{
            "query": { "threshold": 0.05 },
            "build": { "seed": 7, "wireframe": false }
        }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.query.threshold, 0.05);
        assert_eq!(config.query.interaction_mode, InteractionMode::All);
        assert_eq!(config.build.seed, Some(7));
        assert!(!config.build.wireframe);
        assert_eq!(config.build.layer_line_width, LAYER_LINE_WIDTH);
    }

    #[test]
    fn sensor_overrides_replace_shared_frame() {
        let json = r#"{ "sensors": { "overrides": {
            "left": { "offset": [1.0, 0.0, 0.0], "scale": 2.0 }
        } } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.sensors.frame_for("left").scale, 2.0);
        assert_eq!(config.sensors.frame_for("right").offset, SENSOR_OFFSET);
    }
}
