//! Hand tracking input.
//!
//! Landmark providers feed a capture loop that classifies each detection and
//! publishes the newest sample into a shared slot. Render systems read a
//! per-tick snapshot of that slot and never wait on the provider.

use bevy::prelude::*;

use crate::engine::assets::scene_settings::{SceneSettings, TrackingSource};

/// Gesture classification and cursor extraction from one landmark frame.
pub mod classifier;

pub mod error;

/// Validated 21-point hand frames and anatomical landmark indices.
pub mod landmarks;

/// Landmark source abstraction and the always-failing fallback provider.
pub mod provider;

/// Recorded-session playback for native builds.
pub mod replay;

/// Capture loop lifecycle: thread ownership, scoped provider close and stop.
pub mod session;

/// Latest-value tracking slot and the per-tick snapshot resource.
pub mod slot;

use provider::{LandmarkProvider, UnavailableProvider};
use replay::ReplayProvider;
use session::TrackingSession;
use slot::TrackingSlot;

/// Build the provider for a configured source. `None` means samples arrive
/// from outside the engine (the host page) and no capture loop is needed.
pub fn provider_for(source: &TrackingSource) -> Option<Box<dyn LandmarkProvider>> {
    match source {
        TrackingSource::None => Some(Box::new(UnavailableProvider::new(
            "no tracking source configured",
        ))),
        TrackingSource::Page if cfg!(target_arch = "wasm32") => None,
        TrackingSource::Page => Some(Box::new(UnavailableProvider::new(
            "page tracking needs the browser build",
        ))),
        TrackingSource::Replay { .. } if cfg!(target_arch = "wasm32") => Some(Box::new(
            UnavailableProvider::new("replay needs filesystem access"),
        )),
        TrackingSource::Replay {
            path,
            rate_hz,
            looped,
        } => Some(Box::new(ReplayProvider::new(path, *rate_hz, *looped))),
    }
}

/// Start the capture loop for the loaded settings.
pub fn start_tracking(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    slot: Res<TrackingSlot>,
) {
    let session = match provider_for(&settings.tracking) {
        Some(provider) => {
            info!("Starting hand tracking from '{}'", provider.name());
            TrackingSession::start(provider, slot.clone())
        }
        None => {
            info!("Waiting for hand landmarks from the host page");
            TrackingSession::idle()
        }
    };
    commands.insert_resource(session);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_map_to_providers() {
        let none = provider_for(&TrackingSource::None).unwrap();
        assert_eq!(none.name(), "unavailable");

        let replay = provider_for(&TrackingSource::Replay {
            path: "hand.json".into(),
            rate_hz: 30.0,
            looped: false,
        })
        .unwrap();
        assert_eq!(replay.name(), "replay");

        // Native builds have no page to listen to.
        assert!(provider_for(&TrackingSource::Page).is_some());
    }
}
