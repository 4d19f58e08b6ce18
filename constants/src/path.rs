/// Runtime scene settings, relative to the asset root.
pub const SETTINGS_PATH: &str = "scene.settings.json";

/// Extensions routed to the settings JSON loader.
pub const SETTINGS_EXTENSIONS: &[&str] = &["settings.json"];

/// Default replay pacing when a recording gives no usable rate.
pub const REPLAY_RATE_HZ: f32 = 30.0;

/// Accepted replay pacing; anything outside is clamped.
pub const REPLAY_RATE_RANGE_HZ: (f32, f32) = (1.0, 240.0);
