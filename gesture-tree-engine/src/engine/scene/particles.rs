//! Tree particle generation.
//!
//! Particles sit on a golden-angle spiral that widens toward the base, each
//! with a random scatter position used when the tree is exploded.

use std::f32::consts::PI;

use bevy::prelude::*;
use constants::colours;
use constants::tree::{
    BASE_RADIUS, LAYER_WAVE_AMPLITUDE, LEAF_RADIUS_OFFSET, LEAF_SCALE, LEAF_SHARE,
    LIGHT_RADIUS_OFFSET, LIGHT_SCALE, ORNAMENT_RADIUS_OFFSET, ORNAMENT_SCALE, ORNAMENT_SHARE,
    PARTICLE_SCATTER_HALF_EXTENT, PARTICLE_SPAN_Y, PARTICLE_TOP_Y, RADIUS_EXPONENT,
    SPIRAL_TIGHTNESS,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Leaf,
    Ornament,
    Light,
    Star,
}

/// Immutable per-particle targets. Only the entity `Transform` moves.
#[derive(Component, Debug, Clone)]
pub struct TreeParticle {
    pub id: u32,
    pub kind: ParticleKind,
    pub formed: Vec3,
    pub exploded: Vec3,
    pub formed_rotation: Quat,
    pub scale: f32,
}

/// One generated particle, before it becomes an entity.
#[derive(Debug, Clone)]
pub struct ParticleSeed {
    pub particle: TreeParticle,
    pub colour: Color,
}

/// Rotation turning local +Z away from the trunk axis.
pub fn outward_rotation(position: Vec3) -> Quat {
    Quat::from_rotation_y(position.x.atan2(position.z))
}

fn sample_range<R: Rng>(rng: &mut R, (min, span): (f32, f32)) -> f32 {
    min + rng.gen_range(0.0..1.0) * span
}

fn scatter<R: Rng>(rng: &mut R, half_extent: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
    )
}

/// Build `count` particles, top of the tree first.
pub fn generate_tree<R: Rng>(count: usize, rng: &mut R) -> Vec<ParticleSeed> {
    let golden_angle = PI * (3.0 - 5.0_f32.sqrt());

    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let angle = i as f32 * golden_angle;
            let y = PARTICLE_TOP_Y - t * PARTICLE_SPAN_Y;
            let spiral_radius = t.powf(RADIUS_EXPONENT) * BASE_RADIUS;
            let layer_wave = (t * SPIRAL_TIGHTNESS).sin() * LAYER_WAVE_AMPLITUDE * t;

            let roll: f32 = rng.gen_range(0.0..1.0);
            let kind = if roll < LEAF_SHARE {
                ParticleKind::Leaf
            } else if roll < ORNAMENT_SHARE {
                ParticleKind::Ornament
            } else {
                ParticleKind::Light
            };

            let offset = match kind {
                ParticleKind::Leaf => sample_range(rng, LEAF_RADIUS_OFFSET),
                ParticleKind::Ornament => sample_range(rng, ORNAMENT_RADIUS_OFFSET),
                _ => sample_range(rng, LIGHT_RADIUS_OFFSET),
            };
            let r = (spiral_radius + layer_wave + offset).max(0.0);
            let formed = Vec3::new(r * angle.cos(), y, r * angle.sin());
            let exploded = scatter(rng, PARTICLE_SCATTER_HALF_EXTENT);

            let jitter = Quat::from_euler(
                EulerRot::XYZ,
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
            );

            let (scale, colour) = match kind {
                ParticleKind::Leaf => (sample_range(rng, LEAF_SCALE), colours::LEAF),
                ParticleKind::Ornament => {
                    let colour = if rng.gen_bool(0.5) {
                        colours::GOLD
                    } else {
                        colours::RED
                    };
                    (sample_range(rng, ORNAMENT_SCALE), colour)
                }
                _ => {
                    let colour = colours::LIGHTS[rng.gen_range(0..colours::LIGHTS.len())];
                    (LIGHT_SCALE, colour)
                }
            };

            ParticleSeed {
                particle: TreeParticle {
                    id: i as u32,
                    kind,
                    formed,
                    exploded,
                    formed_rotation: outward_rotation(formed) * jitter,
                    scale,
                },
                colour,
            }
        })
        .collect()
}
