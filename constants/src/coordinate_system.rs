use bevy::math::Vec3;

/// Axis mapping matrices (row-major: [x_new, y_new, z_new]).
/// Input vector is `[p.x, p.y, h]` where `h` is the layer height for layer
/// contours and the third component of the sample for raw points.
pub const LAYER_AXES: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0], // X = p.x
    [0.0, 0.0, 1.0], // Y = layer height
    [0.0, 1.0, 0.0], // Z = p.y
];

/// Front silhouettes live in the XY plane, Z suppressed.
pub const FRONT_SILHOUETTE_AXES: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0], // X = p.x
    [0.0, 1.0, 0.0], // Y = p.y
    [0.0, 0.0, 0.0], // Z = 0
];

/// Side silhouettes live in the ZY plane, X suppressed.
pub const SIDE_SILHOUETTE_AXES: [[f32; 3]; 3] = [
    [0.0, 0.0, 0.0], // X = 0
    [0.0, 1.0, 0.0], // Y = p.y
    [1.0, 0.0, 0.0], // Z = p.x
];

/// Raw samples pass through untouched.
pub const RAW_AXES: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Scan records are stored in 1/10000 scene units.
pub const BODY_SCAN_SCALE: f32 = 1.0 / 10_000.0;

/// Body scan group sits one unit up and one unit in front of the viewer.
pub const BODY_SCAN_OFFSET: Vec3 = Vec3::new(0.0, 1.0, -1.0);

/// Sensor samples are pre-divided by 8 and then scaled by 0.02.
pub const SENSOR_SCALE: f32 = 0.02 / 8.0;

/// Sensor clouds sit below and behind the body scan group.
pub const SENSOR_OFFSET: Vec3 = Vec3::new(0.0, -1.0, -2.0);

/// Apply an axis mapping matrix to an input vector.
pub fn apply_axes(axes: &[[f32; 3]; 3], input: [f32; 3]) -> [f32; 3] {
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += axes[i][j] * input[j];
        }
    }

    output
}
