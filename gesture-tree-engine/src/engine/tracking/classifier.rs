//! Hand pose classification.
//!
//! Maps one landmark frame to a discrete gesture and a mirrored cursor. Pure:
//! the same frame always yields the same output.
//!
//! The thumb test compares absolute distances from the wrist and is not
//! normalised for hand orientation, so a fist held sideways can read as a
//! thumbs-up. Known accuracy caveat, kept as is.

use bevy::prelude::*;
use constants::gesture::{FINGER_EXTENSION_RATIO, OPEN_FINGER_COUNT, PINCH_DISTANCE};
use serde::{Deserialize, Serialize};

use super::landmarks::{FINGERS, INDEX_TIP, LandmarkFrame, THUMB_MCP, THUMB_TIP, WRIST};
use super::slot::TrackingSample;

/// Discrete hand pose used as a command signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gesture {
    #[default]
    None,
    Fist,
    Open,
    ThumbUp,
    Pinch,
}

/// Classify a hand frame. First match wins: pinch, thumbs-up, fist, open.
pub fn classify(frame: &LandmarkFrame) -> Gesture {
    if frame.planar_distance(THUMB_TIP, INDEX_TIP) < PINCH_DISTANCE {
        return Gesture::Pinch;
    }

    let extended = extended_finger_count(frame);
    let thumb_extended = is_thumb_extended(frame);

    if thumb_extended && extended == 0 {
        Gesture::ThumbUp
    } else if extended == 0 {
        Gesture::Fist
    } else if extended >= OPEN_FINGER_COUNT {
        Gesture::Open
    } else {
        Gesture::None
    }
}

/// Index fingertip, x mirrored to undo the selfie-view camera feed.
pub fn cursor(frame: &LandmarkFrame) -> Vec2 {
    let tip = frame.point(INDEX_TIP);
    Vec2::new(1.0 - tip.x, tip.y)
}

fn extended_finger_count(frame: &LandmarkFrame) -> usize {
    FINGERS
        .iter()
        .filter(|(tip, pip)| {
            frame.planar_distance(WRIST, *tip)
                > frame.planar_distance(WRIST, *pip) * FINGER_EXTENSION_RATIO
        })
        .count()
}

fn is_thumb_extended(frame: &LandmarkFrame) -> bool {
    frame.planar_distance(WRIST, THUMB_TIP) > frame.planar_distance(WRIST, THUMB_MCP)
}

/// Turn one provider detection into the sample consumers see. Missing or
/// malformed hands become an absent sample for this tick only.
pub fn sample_from_points(points: Option<&[[f32; 3]]>) -> TrackingSample {
    let Some(points) = points else {
        return TrackingSample::absent();
    };

    match LandmarkFrame::from_points(points) {
        Ok(frame) => TrackingSample::from_frame(&frame),
        Err(error) => {
            debug!("Skipping tracking sample: {}", error);
            TrackingSample::absent()
        }
    }
}

impl TrackingSample {
    pub fn from_frame(frame: &LandmarkFrame) -> Self {
        Self {
            gesture: classify(frame),
            cursor: cursor(frame),
            is_present: true,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::tracking::landmarks::{
        INDEX_PIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP,
    };

    /// Upright hand with the wrist at the bottom of the image. Extended
    /// fingertips sit twice as far from the wrist as their PIP joints,
    /// curled ones sit closer.
    pub(crate) fn hand(fingers: [bool; 4], thumb_extended: bool, pinch: bool) -> LandmarkFrame {
        let mut points = vec![[0.5, 0.9, 0.0]; 21];
        let columns = [0.40, 0.47, 0.54, 0.61];
        let joints = [
            (INDEX_TIP, INDEX_PIP),
            (MIDDLE_TIP, MIDDLE_PIP),
            (RING_TIP, RING_PIP),
            (PINKY_TIP, PINKY_PIP),
        ];
        for ((tip, pip), (x, extended)) in joints.iter().zip(columns.iter().zip(fingers)) {
            points[*pip] = [*x, 0.7, 0.0];
            points[*tip] = if extended { [*x, 0.5, 0.0] } else { [*x, 0.75, 0.0] };
        }

        points[THUMB_MCP] = [0.35, 0.8, 0.0];
        points[THUMB_TIP] = if thumb_extended {
            [0.2, 0.7, 0.0]
        } else {
            [0.45, 0.85, 0.0]
        };
        if pinch {
            let index = points[INDEX_TIP];
            points[THUMB_TIP] = [index[0] + 0.01, index[1] + 0.01, 0.0];
        }

        LandmarkFrame::from_points(&points).unwrap()
    }

    #[test]
    fn pinch_overrides_every_finger_state() {
        for mask in 0..16u8 {
            let fingers = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0];
            for thumb in [true, false] {
                assert_eq!(classify(&hand(fingers, thumb, true)), Gesture::Pinch);
            }
        }
    }

    #[test]
    fn thumb_decides_between_thumb_up_and_fist() {
        let curled = [false; 4];
        assert_eq!(classify(&hand(curled, true, false)), Gesture::ThumbUp);
        assert_eq!(classify(&hand(curled, false, false)), Gesture::Fist);
    }

    #[test]
    fn four_extended_fingers_is_open_regardless_of_thumb() {
        assert_eq!(classify(&hand([true; 4], true, false)), Gesture::Open);
        assert_eq!(classify(&hand([true; 4], false, false)), Gesture::Open);
    }

    #[test]
    fn partial_hands_are_unclassified() {
        assert_eq!(
            classify(&hand([true, true, false, false], false, false)),
            Gesture::None
        );
        assert_eq!(
            classify(&hand([true, false, false, false], true, false)),
            Gesture::None
        );
    }

    #[test]
    fn classification_is_repeatable() {
        let frame = hand([true, false, true, false], true, false);
        assert_eq!(classify(&frame), classify(&frame));
    }

    #[test]
    fn cursor_mirrors_index_tip() {
        let frame = hand([true; 4], false, false);
        let tip = frame.point(INDEX_TIP);
        let c = cursor(&frame);
        assert!((c.x - (1.0 - tip.x)).abs() < 1e-6);
        assert!((c.y - tip.y).abs() < 1e-6);
    }

    #[test]
    fn missing_or_malformed_hands_are_absent() {
        let absent = sample_from_points(None);
        assert!(!absent.is_present);
        assert_eq!(absent.gesture, Gesture::None);

        let short = vec![[0.5, 0.5, 0.0]; 12];
        assert!(!sample_from_points(Some(&short)).is_present);
    }

    #[test]
    fn present_sample_carries_gesture_and_cursor() {
        let frame = hand([false; 4], false, false);
        let sample = TrackingSample::from_frame(&frame);
        assert!(sample.is_present);
        assert_eq!(sample.gesture, Gesture::Fist);
        assert_eq!(sample.cursor, cursor(&frame));
    }
}
