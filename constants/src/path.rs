/// Engine configuration loaded through the JSON asset plugin.
pub const ENGINE_CONFIG_PATH: &str = "config/engine.json";

/// Default structured scan record (body parts, layers, silhouettes, regions).
pub const BODY_SCAN_PATH: &str = "scans/body_scan.json";

/// Default raw sensor stream (one point cloud per physical sensor).
pub const SENSOR_STREAM_PATH: &str = "scans/sensor_points.json";

/// Directory the filesystem fetcher resolves relative paths against.
pub const ASSET_ROOT: &str = "assets";
