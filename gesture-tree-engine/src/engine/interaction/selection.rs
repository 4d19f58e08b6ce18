use bevy::prelude::*;
use serde::Serialize;

use super::hit_test::PhotoClicked;
use crate::engine::scene::photos::PhotoId;
use crate::engine::tracking::classifier::Gesture;
use crate::engine::tracking::slot::HandTracking;

/// Process-wide scene mode. Written by gestures and clicks, read by the
/// transform engine and the hit tester.
#[derive(Resource, Debug, Clone, PartialEq, Serialize)]
pub struct SceneMode {
    pub is_formed: bool,
    pub hovered: Option<PhotoId>,
    pub zoomed: Option<PhotoId>,
}

impl Default for SceneMode {
    fn default() -> Self {
        Self {
            is_formed: true,
            hovered: None,
            zoomed: None,
        }
    }
}

impl SceneMode {
    /// Fist and thumbs-up gather the tree, an open hand scatters it. Other
    /// gestures leave the mode alone. Returns true when the mode flipped.
    pub fn apply_gesture(&mut self, gesture: Gesture) -> bool {
        let formed = match gesture {
            Gesture::Fist | Gesture::ThumbUp => true,
            Gesture::Open => false,
            Gesture::None | Gesture::Pinch => return false,
        };
        let flipped = self.is_formed != formed;
        self.is_formed = formed;
        flipped
    }

    /// Clicking the zoomed photo or empty space clears the zoom; clicking any
    /// other photo zooms it.
    pub fn toggle_zoom(&mut self, clicked: &str) {
        let same = self.zoomed.as_ref().is_some_and(|id| id.as_str() == clicked);
        self.zoomed = if same || clicked.is_empty() {
            None
        } else {
            Some(PhotoId(clicked.to_string()))
        };
    }

    pub fn is_zoomed(&self, id: &PhotoId) -> bool {
        self.zoomed.as_ref() == Some(id)
    }

    pub fn is_hovered(&self, id: &PhotoId) -> bool {
        self.hovered.as_ref() == Some(id)
    }
}

pub fn apply_gesture_to_mode(tracking: Res<HandTracking>, mut mode: ResMut<SceneMode>) {
    if !tracking.sample.is_present {
        return;
    }

    // Only flag the resource changed on an actual flip.
    if mode
        .bypass_change_detection()
        .apply_gesture(tracking.sample.gesture)
    {
        mode.set_changed();
        info!(
            "Tree {}",
            if mode.is_formed { "formed" } else { "exploded" }
        );
    }
}

pub fn apply_photo_clicks(mut clicks: EventReader<PhotoClicked>, mut mode: ResMut<SceneMode>) {
    for PhotoClicked(id) in clicks.read() {
        mode.toggle_zoom(id);
        debug!("Photo click '{}' -> zoomed {:?}", id, mode.zoomed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gestures_drive_formation() {
        let mut mode = SceneMode::default();
        assert!(mode.apply_gesture(Gesture::Open));
        assert!(!mode.is_formed);
        assert!(!mode.apply_gesture(Gesture::Pinch));
        assert!(!mode.apply_gesture(Gesture::None));
        assert!(!mode.is_formed);
        assert!(mode.apply_gesture(Gesture::ThumbUp));
        assert!(mode.is_formed);
        assert!(!mode.apply_gesture(Gesture::Fist));
    }

    #[test]
    fn zoom_toggle_law() {
        let mut mode = SceneMode::default();

        mode.toggle_zoom("a");
        assert_eq!(mode.zoomed, Some(PhotoId("a".into())));

        mode.toggle_zoom("b");
        assert_eq!(mode.zoomed, Some(PhotoId("b".into())));

        mode.toggle_zoom("b");
        assert_eq!(mode.zoomed, None);

        mode.toggle_zoom("a");
        mode.toggle_zoom("");
        assert_eq!(mode.zoomed, None);

        mode.toggle_zoom("");
        assert_eq!(mode.zoomed, None);
    }

    #[test]
    fn clicks_are_applied_in_order() {
        let mut app = App::new();
        app.init_resource::<SceneMode>()
            .add_event::<PhotoClicked>()
            .add_systems(Update, apply_photo_clicks);

        app.world_mut().send_event(PhotoClicked("a".into()));
        app.world_mut().send_event(PhotoClicked("c".into()));
        app.update();

        let mode = app.world().resource::<SceneMode>();
        assert_eq!(mode.zoomed, Some(PhotoId("c".into())));
    }

    #[test]
    fn absent_hand_keeps_the_mode() {
        let mut app = App::new();
        let mut tracking = HandTracking::default();
        tracking.sample.gesture = Gesture::Open;
        app.init_resource::<SceneMode>()
            .insert_resource(tracking)
            .add_systems(Update, apply_gesture_to_mode);

        app.update();
        assert!(app.world().resource::<SceneMode>().is_formed);

        app.world_mut().resource_mut::<HandTracking>().sample.is_present = true;
        app.update();
        assert!(!app.world().resource::<SceneMode>().is_formed);
    }
}
