use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Marker for the native frame rate overlay.
#[derive(Component)]
pub struct FpsText;

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.settings_loaded {
        println!("→ Settings ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn stays_loading_until_settings_resolve() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );

        app.update();
        app.update();
        assert_eq!(*app.world().resource::<State<AppState>>(), AppState::Loading);

        app.world_mut().resource_mut::<LoadingProgress>().settings_loaded = true;
        app.update();
        app.update();
        assert_eq!(*app.world().resource::<State<AppState>>(), AppState::Running);
    }
}
