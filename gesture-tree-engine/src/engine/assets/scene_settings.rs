use bevy::prelude::*;
use constants::interaction::{
    AZIMUTH_AMPLIFICATION, AZIMUTH_AMPLIFICATION_RANGE, AZIMUTH_DEADZONE, CAMERA_SMOOTHING,
    POLAR_AMPLITUDE,
};
use constants::path::{REPLAY_RATE_HZ, REPLAY_RATE_RANGE_HZ};
use constants::tree::PARTICLE_COUNT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("particle_count must be greater than zero")]
    EmptyTree,

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
}

/// Cursor to camera coupling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Azimuth gain: target = (x - 0.5) * amplification * PI. Clamped to [2, 4].
    pub amplification: f32,
    pub polar_amplitude: f32,
    /// Per-tick approach factor toward the cursor target.
    pub smoothing: f32,
    pub deadzone: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            amplification: AZIMUTH_AMPLIFICATION,
            polar_amplitude: POLAR_AMPLITUDE,
            smoothing: CAMERA_SMOOTHING,
            deadzone: AZIMUTH_DEADZONE,
        }
    }
}

/// Where hand landmarks come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackingSource {
    /// No tracking; the scene runs untouched.
    None,
    /// The host page runs the hand tracker and pushes landmarks over RPC.
    Page,
    /// A recorded session replayed from disk.
    Replay {
        path: String,
        #[serde(default = "default_replay_rate")]
        rate_hz: f32,
        #[serde(default = "default_looped")]
        looped: bool,
    },
}

fn default_replay_rate() -> f32 {
    REPLAY_RATE_HZ
}

fn default_looped() -> bool {
    true
}

impl Default for TrackingSource {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Page
        } else {
            Self::None
        }
    }
}

/// Runtime scene configuration, loaded from `scene.settings.json`. Every
/// field is optional in the file and falls back to the compiled defaults.
#[derive(Asset, Resource, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub particle_count: usize,
    /// Fixed seed for reproducible trees; random when absent.
    pub seed: Option<u64>,
    pub camera: CameraSettings,
    pub tracking: TrackingSource,
    /// Photos to hang on the tree at startup, as asset paths.
    pub photos: Vec<String>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: None,
            camera: CameraSettings::default(),
            tracking: TrackingSource::default(),
            photos: Vec::new(),
        }
    }
}

impl SceneSettings {
    /// Reject unusable values and clamp the tunable ones into range.
    pub fn validated(mut self) -> Result<Self, SettingsError> {
        if self.particle_count == 0 {
            return Err(SettingsError::EmptyTree);
        }

        let camera = &mut self.camera;
        for (field, value) in [
            ("camera.amplification", camera.amplification),
            ("camera.polar_amplitude", camera.polar_amplitude),
            ("camera.smoothing", camera.smoothing),
            ("camera.deadzone", camera.deadzone),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field, value });
            }
        }

        let (min, max) = AZIMUTH_AMPLIFICATION_RANGE;
        camera.amplification = camera.amplification.clamp(min, max);
        camera.smoothing = camera.smoothing.clamp(0.0, 1.0);
        camera.deadzone = camera.deadzone.clamp(0.0, 0.5);

        if let TrackingSource::Replay { rate_hz, .. } = &mut self.tracking {
            if !rate_hz.is_finite() {
                return Err(SettingsError::NonFinite {
                    field: "tracking.rate_hz",
                    value: *rate_hz,
                });
            }
            let (min, max) = REPLAY_RATE_RANGE_HZ;
            *rate_hz = rate_hz.clamp(min, max);
        }
        Ok(self)
    }
}
