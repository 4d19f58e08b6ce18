use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::SETTINGS_PATH;

use crate::engine::assets::scene_settings::SceneSettings;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<SceneSettings>>,
}

// Start the loading process
pub fn start_loading(mut settings_loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    settings_loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Validate loaded settings, or fall back to defaults when the file was
/// missing or rejected. The flag reports whether the fallback was taken.
pub fn resolve_settings(loaded: Option<SceneSettings>) -> (SceneSettings, bool) {
    let Some(settings) = loaded else {
        warn!("No scene settings found, using defaults");
        return (SceneSettings::default(), true);
    };

    match settings.validated() {
        Ok(settings) => (settings, false),
        Err(error) => {
            warn!("Invalid scene settings ({}), using defaults", error);
            (SceneSettings::default(), true)
        }
    }
}

// Install settings and camera rig once the file resolves either way
pub fn load_settings_system(
    mut loading_progress: ResMut<LoadingProgress>,
    settings_loader: Res<SettingsLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<SceneSettings>>,
) {
    if loading_progress.settings_loaded {
        return;
    }

    let Some(ref handle) = settings_loader.handle else {
        return;
    };

    let loaded = match settings_assets.get(handle) {
        Some(settings) => Some(settings.clone()),
        None => match asset_server.get_load_state(handle) {
            Some(LoadState::Failed(error)) => {
                warn!("Failed to load {}: {}", SETTINGS_PATH, error);
                None
            }
            _ => return,
        },
    };

    let (settings, used_fallback) = resolve_settings(loaded);
    println!(
        "✓ Scene settings loaded ({} particles, {} photos)",
        settings.particle_count,
        settings.photos.len()
    );

    commands.insert_resource(OrbitCamera::new(settings.camera));
    commands.insert_resource(settings);
    loading_progress.settings_loaded = true;
    loading_progress.used_fallback_settings = used_fallback;
}
