use bevy::prelude::*;

const PARALLEL_EPSILON: f32 = 1e-8;

// Slab-method ray–AABB intersection, returns the entry distance or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let (o, lo, hi) = (ray_origin[axis], min[axis], max[axis]);

        // parallel to this slab: either always inside or never
        if ray_direction[axis] == 0.0 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / ray_direction[axis];
        let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(tmin.max(0.0))
}

/// Distance along the ray and perpendicular distance to `point`.
/// `None` when the point is behind the origin.
pub fn ray_point_distance(origin: Vec3, direction: Vec3, point: Vec3) -> Option<(f32, f32)> {
    let t = (point - origin).dot(direction);
    if t < 0.0 {
        return None;
    }
    Some((t, (origin + direction * t).distance(point)))
}

/// Closest approach between a ray and the segment `a..b`.
///
/// Returns the point on the segment and its distance to the ray. The ray
/// parameter is clamped to the forward half, the segment parameter to [0, 1].
pub fn ray_segment_closest(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3) -> (Vec3, f32) {
    let ab = b - a;
    let w = origin - a;
    let dd = direction.dot(direction);
    let da = direction.dot(ab);
    let aa = ab.dot(ab);
    let dw = direction.dot(w);
    let aw = ab.dot(w);

    if aa < PARALLEL_EPSILON {
        let t = (-dw / dd).max(0.0);
        return (a, (origin + direction * t).distance(a));
    }

    let denom = dd * aa - da * da;
    let s = if denom > PARALLEL_EPSILON {
        ((dd * aw - da * dw) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let t = ((s * da - dw) / dd).max(0.0);
    let s = ((t * da + aw) / aa).clamp(0.0, 1.0);

    let on_segment = a + ab * s;
    let on_ray = origin + direction * t;
    (on_segment, on_ray.distance(on_segment))
}

/// Ray-triangle intersection using Möller–Trumbore, two-sided.
pub fn ray_triangle_hit_t(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = direction.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > PARALLEL_EPSILON).then_some(t)
}
