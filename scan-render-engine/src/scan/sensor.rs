use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// Raw samples captured by one physical sensor.
///
/// Independent of the body-scan record; a session may deliver several of
/// these and each one is assembled and placed on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorPointCloud {
    #[serde(default)]
    pub sensor: Option<String>,
    #[serde(default)]
    pub points: Vec<Vec3>,
    /// Optional per-point RGB, must match `points` in length to be used.
    #[serde(default)]
    pub colours: Option<Vec<[f32; 3]>>,
}

impl SensorPointCloud {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            sensor: None,
            points,
            colours: None,
        }
    }

    pub fn label(&self, index: usize) -> String {
        match &self.sensor {
            Some(name) => name.clone(),
            None => format!("sensor#{index}"),
        }
    }

    /// Per-point colours, only when there is exactly one per sample.
    pub fn matched_colours(&self) -> Option<&[[f32; 3]]> {
        self.colours
            .as_deref()
            .filter(|colours| colours.len() == self.points.len())
    }
}
