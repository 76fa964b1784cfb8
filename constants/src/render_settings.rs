/// Line width hint for layer cross-sections.
pub const LAYER_LINE_WIDTH: f32 = 1.5;

/// Line width hint for front and side silhouettes.
pub const SILHOUETTE_LINE_WIDTH: f32 = 4.0;

/// Point size hint for sensor clouds.
pub const POINT_SIZE: f32 = 0.02;

/// Base hue for surface regions before the per-triangle alpha is applied.
pub const MESH_BASE_COLOUR: [f32; 3] = [0.8, 0.55, 0.45];

/// Per-triangle alpha is drawn uniformly from this range.
pub const MESH_ALPHA_RANGE: (f32, f32) = (0.35, 0.9);

/// Wireframe overlay colour.
pub const WIREFRAME_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 0.25];

/// Ray to sample distance under which a query reports a hit.
pub const QUERY_THRESHOLD: f32 = 0.01;

/// Marker sphere radius.
pub const MARKER_RADIUS: f32 = 0.02;

/// Number of markers in the trail ring.
pub const MARKER_TRAIL_LENGTH: usize = 40;

/// Minimum seconds between two trail markers.
pub const MARKER_SPAWN_INTERVAL: f32 = 0.02;

/// Per-frame multiplicative decay of trail marker scale.
pub const MARKER_DECAY: f32 = 0.98;

/// Trail marker scale clamp.
pub const MARKER_MIN_SCALE: f32 = 0.01;
pub const MARKER_MAX_SCALE: f32 = 1.0;

/// Pointer ray visual length while a device is tracked.
pub const POINTER_RAY_LENGTH: f32 = 10.0;

/// Room wireframe: edge length and subdivisions per axis.
pub const ROOM_SIZE: f32 = 6.0;
pub const ROOM_DIVISIONS: u32 = 10;
