use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::pointer::{PointerConnected, PointerDevice, PointerDisconnected, Tracked};

/// Pointer driven by the mouse cursor through the main camera.
#[derive(Component, Debug, Default)]
#[require(PointerDevice, Transform, Visibility)]
pub struct DesktopPointer;

/// Pose whose -Z axis runs along `ray`.
pub fn pose_from_ray(ray: Ray3d) -> Transform {
    Transform::from_translation(ray.origin)
        .with_rotation(Quat::from_rotation_arc(Vec3::NEG_Z, *ray.direction))
}

/// Follow the cursor. Leaving the window disconnects, entering reconnects.
pub fn drive_desktop_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut pointers: Query<(Entity, &mut Transform, Has<Tracked>), With<DesktopPointer>>,
    mut connected: EventWriter<PointerConnected>,
    mut disconnected: EventWriter<PointerDisconnected>,
) {
    let (Ok(window), Ok((camera, camera_transform))) = (windows.single(), cameras.single()) else {
        return;
    };

    let ray = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor).ok());

    for (entity, mut transform, tracked) in &mut pointers {
        match ray {
            Some(ray) => {
                *transform = pose_from_ray(ray);
                if !tracked {
                    connected.write(PointerConnected(entity));
                }
            }
            None if tracked => {
                disconnected.write(PointerDisconnected(entity));
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::pointer::pointer_ray;

    #[test]
    fn pose_round_trips_through_pointer_ray() {
        let ray = Ray3d::new(Vec3::new(0.0, 1.6, 3.0), Dir3::new(Vec3::new(0.3, -0.2, -1.0)).unwrap());
        let back = pointer_ray(&GlobalTransform::from(pose_from_ray(ray)));

        assert!(back.origin.abs_diff_eq(ray.origin, 1e-5));
        assert!(back.direction.abs_diff_eq(*ray.direction, 1e-5));
    }
}
