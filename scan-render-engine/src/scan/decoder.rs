use serde::Deserialize;

use super::{ScanRecord, SensorPointCloud};
use crate::engine::error::DecodeError;

/// Turns raw bytes into scan data. The structured-format decoder is an
/// external collaborator; this trait is the seam it plugs into.
pub trait ScanDecoder: Send + Sync + 'static {
    fn decode_record(&self, bytes: &[u8]) -> Result<ScanRecord, DecodeError>;

    fn decode_sensors(&self, bytes: &[u8]) -> Result<Vec<SensorPointCloud>, DecodeError>;
}

/// Decoder for the JSON rendition of the scan data model.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonScanDecoder;

/// Sensor streams are accepted either as a bare array or wrapped.
#[derive(Deserialize)]
#[serde(untagged)]
enum SensorStream {
    Bare(Vec<SensorPointCloud>),
    Wrapped { sensors: Vec<SensorPointCloud> },
}

impl ScanDecoder for JsonScanDecoder {
    fn decode_record(&self, bytes: &[u8]) -> Result<ScanRecord, DecodeError> {
        serde_json::from_slice(bytes).map_err(DecodeError::from)
    }

    fn decode_sensors(&self, bytes: &[u8]) -> Result<Vec<SensorPointCloud>, DecodeError> {
        let stream: SensorStream = serde_json::from_slice(bytes)?;
        Ok(match stream {
            SensorStream::Bare(sensors) => sensors,
            SensorStream::Wrapped { sensors } => sensors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn decodes_both_sensor_stream_shapes() {
        let decoder = JsonScanDecoder;
        let bare = br#"[ { "points": [[1.0, 2.0, 3.0]] } ]"#;
        let wrapped = br#"{ "sensors": [ { "sensor": "left", "points": [] } ] }"#;

        let sensors = decoder.decode_sensors(bare).unwrap();
        assert_eq!(sensors[0].points, vec![Vec3::new(1.0, 2.0, 3.0)]);

        let sensors = decoder.decode_sensors(wrapped).unwrap();
        assert_eq!(sensors[0].label(0), "left");
    }

    #[test]
    fn rejects_garbage() {
        let decoder = JsonScanDecoder;
        assert!(decoder.decode_record(b"not json").is_err());
    }
}
