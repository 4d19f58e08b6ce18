/// Thumb tip to index tip distance (normalised image units) below which the
/// hand counts as pinching
pub const PINCH_DISTANCE: f32 = 0.05;

/// A finger is extended when its tip is this much further from the wrist
/// than its PIP joint
pub const FINGER_EXTENSION_RATIO: f32 = 1.2;

/// Number of extended fingers (thumb excluded) that makes an open hand
pub const OPEN_FINGER_COUNT: usize = 4;

/// Number of landmarks in one hand frame
pub const HAND_LANDMARK_COUNT: usize = 21;
