use std::f32::consts::{FRAC_PI_2, PI};

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::interaction::{
    CAMERA_FOV_DEGREES, CAMERA_MAX_RADIUS, CAMERA_MIN_RADIUS, CAMERA_START_POSITION,
    POLAR_EPSILON,
};

use crate::engine::assets::scene_settings::CameraSettings;
use crate::engine::tracking::slot::HandTracking;

/// Marks the camera the orbit rig drives and the hit tester casts from.
#[derive(Component)]
pub struct SceneCamera;

/// Spherical orbit around a fixed target, steered by the hand cursor.
/// Angles follow the y-up convention: polar from +Y, azimuth from +Z toward +X.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub coupling: CameraSettings,
}

impl OrbitCamera {
    pub fn new(coupling: CameraSettings) -> Self {
        Self::from_position(Vec3::from_array(CAMERA_START_POSITION), Vec3::ZERO, coupling)
    }

    pub fn from_position(position: Vec3, target: Vec3, coupling: CameraSettings) -> Self {
        let offset = position - target;
        let radius = offset.length().clamp(CAMERA_MIN_RADIUS, CAMERA_MAX_RADIUS);
        let polar = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos();
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: clamp_polar(polar),
            coupling,
        }
    }

    /// Ease the orbit one tick toward the angles the cursor asks for. The
    /// azimuth only follows outside the central deadzone so a resting hand
    /// does not drift the view; the polar angle always follows.
    pub fn couple(&mut self, cursor: Vec2) {
        let c = self.coupling;

        let dx = cursor.x - 0.5;
        if dx.abs() > c.deadzone {
            let target = dx * c.amplification * PI;
            self.azimuth += (target - self.azimuth) * c.smoothing;
        }

        let target = FRAC_PI_2 - (cursor.y - 0.5) * c.polar_amplitude;
        self.polar = clamp_polar(self.polar + (target - self.polar) * c.smoothing);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius - delta).clamp(CAMERA_MIN_RADIUS, CAMERA_MAX_RADIUS);
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

fn clamp_polar(polar: f32) -> f32 {
    polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON)
}

pub fn spawn_scene_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        orbit.transform(),
        SceneCamera,
    ));
}

/// Cursor steers the orbit; an absent hand leaves it where it is.
pub fn couple_camera_to_cursor(tracking: Res<HandTracking>, mut orbit: ResMut<OrbitCamera>) {
    if tracking.sample.is_present {
        orbit.couple(tracking.sample.cursor);
    }
}

pub fn zoom_with_wheel(mut scroll_events: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if scroll_accum.abs() > f32::EPSILON {
        let step = orbit.radius * 0.1;
        orbit.zoom(scroll_accum * step);
    }
}

pub fn sync_camera_transform(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    for mut transform in &mut cameras {
        *transform = orbit.transform();
    }
}
