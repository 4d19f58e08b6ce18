use bevy::prelude::*;
use constants::animation::{
    EXPLODED_SPIN, LIGHT_PULSE_AMPLITUDE, LIGHT_PULSE_BASE, LIGHT_PULSE_FREQUENCY,
    PHOTO_HOVERED_SCALE, PHOTO_SCALE, PHOTO_ZOOMED_SCALE, POSITION_RATE, SCALE_RATE, STAR_SPIN,
    ZOOM_POSITION_RATE,
};
use constants::interaction::ZOOM_ANCHOR;

use crate::engine::interaction::selection::SceneMode;
use crate::engine::scene::particles::{ParticleKind, TreeParticle};
use crate::engine::scene::photos::PhotoPanel;

/// Tree-wide formation, shared by particles and unzoomed panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    Formed,
    Exploded,
}

impl ParticleState {
    pub fn from_mode(mode: &SceneMode) -> Self {
        if mode.is_formed {
            Self::Formed
        } else {
            Self::Exploded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Normal,
    Hovered,
    Zoomed,
}

impl PanelState {
    /// Zoom takes precedence over hover.
    pub fn for_panel(mode: &SceneMode, panel: &PhotoPanel) -> Self {
        if mode.is_zoomed(&panel.id) {
            Self::Zoomed
        } else if mode.is_hovered(&panel.id) {
            Self::Hovered
        } else {
            Self::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationTarget {
    /// Ease toward a fixed orientation.
    Slerp(Quat),
    /// Add these local X, Y, Z angles every tick; never settles.
    Spin(Vec3),
    /// Look straight at the camera.
    FaceCamera,
}

/// Where one entity is heading this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTarget {
    pub position: Vec3,
    pub rotation: RotationTarget,
    pub scale: f32,
    /// Position approach factor per tick.
    pub rate: f32,
    /// Scale approach factor per tick; 1.0 snaps.
    pub scale_rate: f32,
}

fn exploded_spin() -> RotationTarget {
    RotationTarget::Spin(Vec3::new(EXPLODED_SPIN, EXPLODED_SPIN, 0.0))
}

/// Uniform scale of a tree light at `elapsed_secs`, phase-shifted by id.
pub fn light_pulse(id: u32, elapsed_secs: f32) -> f32 {
    LIGHT_PULSE_BASE + (elapsed_secs * LIGHT_PULSE_FREQUENCY + id as f32).sin() * LIGHT_PULSE_AMPLITUDE
}

pub fn resolve_particle_target(
    particle: &TreeParticle,
    state: ParticleState,
    elapsed_secs: f32,
) -> MotionTarget {
    let position = match state {
        ParticleState::Formed => particle.formed,
        ParticleState::Exploded => particle.exploded,
    };

    let rotation = match (particle.kind, state) {
        (ParticleKind::Star, _) => RotationTarget::Spin(Vec3::new(0.0, STAR_SPIN, 0.0)),
        (_, ParticleState::Formed) => RotationTarget::Slerp(particle.formed_rotation),
        (_, ParticleState::Exploded) => exploded_spin(),
    };

    let scale = match particle.kind {
        ParticleKind::Light => light_pulse(particle.id, elapsed_secs),
        _ => particle.scale,
    };

    MotionTarget {
        position,
        rotation,
        scale,
        rate: POSITION_RATE,
        scale_rate: 1.0,
    }
}

pub fn resolve_panel_target(
    panel: &PhotoPanel,
    formation: ParticleState,
    state: PanelState,
) -> MotionTarget {
    if state == PanelState::Zoomed {
        return MotionTarget {
            position: Vec3::from_array(ZOOM_ANCHOR),
            rotation: RotationTarget::FaceCamera,
            scale: PHOTO_ZOOMED_SCALE,
            rate: ZOOM_POSITION_RATE,
            scale_rate: SCALE_RATE,
        };
    }

    let (position, rotation) = match formation {
        ParticleState::Formed => (panel.formed, RotationTarget::Slerp(panel.formed_rotation)),
        ParticleState::Exploded => (panel.exploded, exploded_spin()),
    };

    MotionTarget {
        position,
        rotation,
        scale: if state == PanelState::Hovered {
            PHOTO_HOVERED_SCALE
        } else {
            PHOTO_SCALE
        },
        rate: POSITION_RATE,
        scale_rate: SCALE_RATE,
    }
}
