use bevy::prelude::*;
use constants::animation::ROTATION_RATE;

use super::targets::{
    MotionTarget, PanelState, ParticleState, RotationTarget, resolve_panel_target,
    resolve_particle_target,
};
use crate::engine::camera::orbit_camera::SceneCamera;
use crate::engine::interaction::selection::SceneMode;
use crate::engine::scene::particles::TreeParticle;
use crate::engine::scene::photos::PhotoPanel;

/// Step a live transform one tick toward its target. Fixed per-tick factors,
/// not scaled by frame time.
pub fn advance(transform: &mut Transform, target: &MotionTarget, camera_position: Vec3) {
    transform.translation = transform.translation.lerp(target.position, target.rate);

    transform.rotation = match target.rotation {
        RotationTarget::Slerp(rotation) => transform.rotation.slerp(rotation, ROTATION_RATE),
        RotationTarget::Spin(step) => {
            (transform.rotation * Quat::from_euler(EulerRot::XYZ, step.x, step.y, step.z))
                .normalize()
        }
        RotationTarget::FaceCamera => {
            // Local +Z is the picture side.
            let away = transform.translation - camera_position;
            if away.length_squared() > f32::EPSILON {
                Transform::IDENTITY.looking_to(away, Vec3::Y).rotation
            } else {
                transform.rotation
            }
        }
    };

    let current = transform.scale.x;
    transform.scale = Vec3::splat(current + (target.scale - current) * target.scale_rate);
}

pub fn animate_particles(
    mode: Res<SceneMode>,
    time: Res<Time>,
    mut particles: Query<(&TreeParticle, &mut Transform)>,
) {
    let state = ParticleState::from_mode(&mode);
    let elapsed = time.elapsed_secs();

    for (particle, mut transform) in &mut particles {
        let target = resolve_particle_target(particle, state, elapsed);
        advance(&mut transform, &target, Vec3::ZERO);
    }
}

pub fn animate_photo_panels(
    mode: Res<SceneMode>,
    cameras: Query<&Transform, (With<SceneCamera>, Without<PhotoPanel>)>,
    mut panels: Query<(&PhotoPanel, &mut Transform), Without<SceneCamera>>,
) {
    let formation = ParticleState::from_mode(&mode);
    let camera_position = cameras
        .single()
        .map(|camera| camera.translation)
        .unwrap_or(Vec3::Z);

    for (panel, mut transform) in &mut panels {
        let state = PanelState::for_panel(&mode, panel);
        let target = resolve_panel_target(panel, formation, state);
        advance(&mut transform, &target, camera_position);
    }
}
