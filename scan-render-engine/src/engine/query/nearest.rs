use bevy::prelude::*;

use super::InteractionMode;
use super::ray::{ray_aabb_hit_t, ray_point_distance, ray_segment_closest, ray_triangle_hit_t};
use crate::engine::primitive::{AssembledPrimitive, PrimitiveId, ScenePrimitive};

/// Nearest intersection found by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    pub target: PrimitiveId,
    /// Euclidean distance from the ray origin to `point`.
    pub distance: f32,
}

/// Nearest hit among `targets`, or `None`.
///
/// Points and line segments count as hit within `threshold` of the ray,
/// triangles only on exact intersection. Each candidate's bounds, inflated by
/// `threshold`, are slab-tested first and skipped when they cannot beat the
/// current best.
pub fn query_nearest<'a>(
    ray: Ray3d,
    targets: impl IntoIterator<Item = &'a ScenePrimitive>,
    threshold: f32,
) -> Option<Hit> {
    let origin = ray.origin;
    let direction = *ray.direction;
    let mut best: Option<Hit> = None;

    for target in targets {
        let Some(bounds) = target.primitive.bounds() else {
            continue;
        };
        let inflated = bounds.inflate(threshold);
        let Some(entry) = ray_aabb_hit_t(origin, direction, inflated.min, inflated.max) else {
            continue;
        };
        if best.is_some_and(|hit| entry > hit.distance) {
            continue;
        }

        if let Some((point, distance)) = intersect(origin, direction, &target.primitive, threshold) {
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(Hit {
                    point,
                    target: target.id,
                    distance,
                });
            }
        }
    }

    best
}

/// Primitives of `primitives` that a query in `mode` should consider.
pub fn select_targets<'a>(
    primitives: impl IntoIterator<Item = &'a ScenePrimitive>,
    mode: InteractionMode,
) -> impl Iterator<Item = &'a ScenePrimitive> {
    primitives
        .into_iter()
        .filter(move |p| mode.accepts(&p.primitive))
}

fn intersect(
    origin: Vec3,
    direction: Vec3,
    primitive: &AssembledPrimitive,
    threshold: f32,
) -> Option<(Vec3, f32)> {
    match primitive {
        AssembledPrimitive::PointSet(set) => nearest_of(
            set.positions
                .iter()
                .filter_map(|&p| point_hit(origin, direction, p, threshold)),
        ),
        // A single node has no segment, only its vertex.
        AssembledPrimitive::LineStrip(strip) if strip.positions.len() == 1 => {
            point_hit(origin, direction, strip.positions[0], threshold)
        }
        AssembledPrimitive::LineStrip(strip) => nearest_of(
            strip
                .positions
                .windows(2)
                .filter_map(|w| segment_hit(origin, direction, w[0], w[1], threshold)),
        ),
        AssembledPrimitive::Wireframe(wire) => nearest_of(
            wire.edges
                .iter()
                .filter_map(|[a, b]| segment_hit(origin, direction, *a, *b, threshold)),
        ),
        AssembledPrimitive::TriangleMesh(mesh) => {
            nearest_of(mesh.triangles().filter_map(|[v0, v1, v2]| {
                let t = ray_triangle_hit_t(origin, direction, v0, v1, v2)?;
                Some((origin + direction * t, t))
            }))
        }
    }
}

fn point_hit(origin: Vec3, direction: Vec3, p: Vec3, threshold: f32) -> Option<(Vec3, f32)> {
    let (_, off_ray) = ray_point_distance(origin, direction, p)?;
    (off_ray <= threshold).then(|| (p, origin.distance(p)))
}

fn segment_hit(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, threshold: f32) -> Option<(Vec3, f32)> {
    let (point, off_ray) = ray_segment_closest(origin, direction, a, b);
    if off_ray > threshold || (point - origin).dot(direction) < 0.0 {
        return None;
    }
    Some((point, origin.distance(point)))
}

fn nearest_of(candidates: impl Iterator<Item = (Vec3, f32)>) -> Option<(Vec3, f32)> {
    candidates.min_by(|a, b| a.1.total_cmp(&b.1))
}
