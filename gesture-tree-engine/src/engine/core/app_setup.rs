// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::colours::BACKGROUND;
use constants::path::SETTINGS_EXTENSIONS;

// Crate engine modules
use crate::engine::animation::{
    highlight::highlight_hovered_panels,
    motion::{animate_particles, animate_photo_panels},
};
use crate::engine::assets::scene_settings::SceneSettings;
use crate::engine::camera::orbit_camera::{
    couple_camera_to_cursor, spawn_scene_camera, sync_camera_transform, zoom_with_wheel,
};
use crate::engine::core::app_state::{AppState, FpsText, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::interaction::{
    hit_test::{PhotoClicked, PhotoHovered, PointerState, hit_test_pointer},
    selection::{SceneMode, apply_gesture_to_mode, apply_photo_clicks},
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::settings_loader::{SettingsLoader, load_settings_system, start_loading};
use crate::engine::scene::photos::AddPhotoRequest;
use crate::engine::scene::spawn::{spawn_requested_photos, spawn_scene};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::tracking::slot::{HandTracking, TrackingSlot, snapshot_tracking_slot};
use crate::engine::tracking::start_tracking;

// Web RPC modules
use crate::rpc::web_rpc::{RpcSet, WebRpcPlugin};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers SceneSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneSettings>::new(SETTINGS_EXTENSIONS))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(BACKGROUND));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<SettingsLoader>()
        .init_resource::<TrackingSlot>()
        .init_resource::<HandTracking>()
        .init_resource::<SceneMode>()
        .init_resource::<PointerState>()
        .add_event::<PhotoHovered>()
        .add_event::<PhotoClicked>()
        .add_event::<AddPhotoRequest>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (load_settings_system, transition_to_running)
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (spawn_scene, spawn_scene_camera, start_tracking),
        );

    // One tick: read input, update mode and camera, pick, then move entities.
    let runtime_systems = (
        snapshot_tracking_slot,
        apply_gesture_to_mode,
        couple_camera_to_cursor,
        zoom_with_wheel,
        sync_camera_transform,
        hit_test_pointer,
        apply_photo_clicks,
        spawn_requested_photos,
        animate_particles,
        animate_photo_panels,
        highlight_hovered_panels,
    )
        .chain();

    app.add_systems(
        Update,
        (runtime_systems, fps_notification_system)
            .after(RpcSet::Inbound)
            .before(RpcSet::Outbound)
            .run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    println!("=== GESTURE TREE ===");
    spawn_lighting(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0.84, 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
