use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub settings_loaded: bool,
    pub used_fallback_settings: bool,
}
