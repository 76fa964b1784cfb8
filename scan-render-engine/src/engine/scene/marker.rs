use bevy::prelude::*;

use crate::engine::config::{EngineConfig, MarkerSettings};
use crate::engine::input::PointerHits;

/// Follows the nearest hit, hidden when nothing is hit.
#[derive(Component)]
pub struct PrimaryMarker;

/// One sphere of the fading trail ring.
#[derive(Component)]
pub struct TrailMarker {
    pub slot: usize,
}

/// Ring cursor for the trail: which slot is reused next and when.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MarkerTrail {
    len: usize,
    next: usize,
    since_last: f32,
}

impl MarkerTrail {
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            next: 0,
            since_last: 0.0,
        }
    }

    /// Advance by `dt`. Returns the slot to move to the hit point, if the
    /// spawn interval has elapsed and there is a hit.
    pub fn advance(&mut self, dt: f32, hit: Option<Vec3>, interval: f32) -> Option<usize> {
        let mut placed = None;
        if self.since_last > interval && hit.is_some() {
            placed = Some(self.next);
            self.next = (self.next + 1) % self.len;
            self.since_last = 0.0;
        }
        self.since_last += dt;
        placed
    }
}

impl Default for MarkerTrail {
    fn default() -> Self {
        Self::new(MarkerSettings::default().trail_length)
    }
}

pub fn decay_scale(scale: f32, settings: &MarkerSettings) -> f32 {
    (scale * settings.decay).clamp(settings.min_scale, settings.max_scale)
}

pub fn spawn_markers(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<EngineConfig>,
) {
    let settings = &config.marker;
    let sphere = meshes.add(Sphere::new(settings.radius).mesh().uv(10, 10));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 0.0),
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(sphere.clone()),
        MeshMaterial3d(material.clone()),
        Transform::IDENTITY,
        Visibility::Hidden,
        PrimaryMarker,
    ));

    for slot in 0..settings.trail_length {
        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_scale(Vec3::splat(settings.min_scale)),
            Visibility::Hidden,
            TrailMarker { slot },
        ));
    }

    commands.insert_resource(MarkerTrail::new(settings.trail_length));
}

pub fn update_primary_marker(
    hits: Res<PointerHits>,
    mut markers: Query<(&mut Transform, &mut Visibility), With<PrimaryMarker>>,
) {
    let nearest = hits.nearest();

    for (mut transform, mut visibility) in &mut markers {
        match nearest {
            Some(hit) => {
                transform.translation = hit.point;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Drop a marker at the hit every spawn interval and fade all of them.
/// Frozen while no device is tracked.
pub fn update_marker_trail(
    time: Res<Time>,
    hits: Res<PointerHits>,
    config: Res<EngineConfig>,
    mut trail: ResMut<MarkerTrail>,
    mut markers: Query<(&TrailMarker, &mut Transform, &mut Visibility), Without<PrimaryMarker>>,
) {
    if !hits.any_tracked() {
        return;
    }

    let settings = &config.marker;
    let hit = hits.nearest().map(|h| h.point);
    let placed = trail.advance(time.delta_secs(), hit, settings.spawn_interval);

    for (marker, mut transform, mut visibility) in &mut markers {
        if let (Some(slot), Some(point)) = (placed, hit) {
            if marker.slot == slot {
                transform.translation = point;
                transform.scale = Vec3::ONE;
                *visibility = Visibility::Visible;
            }
        }
        transform.scale = Vec3::splat(decay_scale(transform.scale.x, settings));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_waits_for_interval_and_a_hit() {
        let mut trail = MarkerTrail::new(3);
        let hit = Some(Vec3::ONE);

        assert_eq!(trail.advance(0.01, hit, 0.02), None);
        assert_eq!(trail.advance(0.015, None, 0.02), None);
        assert_eq!(trail.advance(0.01, hit, 0.02), Some(0));
        // timer restarts after a placement
        assert_eq!(trail.advance(0.01, hit, 0.02), None);
    }

    #[test]
    fn trail_wraps_around_the_ring() {
        let mut trail = MarkerTrail::new(2);
        let slots: Vec<_> = (0..8)
            .filter_map(|_| trail.advance(0.05, Some(Vec3::ZERO), 0.02))
            .collect();

        assert_eq!(slots, vec![0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn decay_is_clamped() {
        let settings = MarkerSettings::default();
        assert_eq!(decay_scale(1.0, &settings), 0.98);
        assert_eq!(decay_scale(0.01, &settings), 0.01);
        assert_eq!(decay_scale(5.0, &settings), 1.0);
    }
}
