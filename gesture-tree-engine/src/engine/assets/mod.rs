//! Runtime-loadable assets.

/// Scene settings asset: tree size, seed, camera coupling, tracking source
/// and startup photos, with validation.
pub mod scene_settings;
