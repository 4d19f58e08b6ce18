/// Per-tick lerp factor toward the position target. Applied once per rendered
/// frame, so perceived speed follows the display refresh rate.
pub const POSITION_RATE: f32 = 0.05;

/// Per-tick lerp factor for a zoomed photo flying to its anchor
pub const ZOOM_POSITION_RATE: f32 = 0.1;

/// Per-tick slerp factor toward a formed orientation
pub const ROTATION_RATE: f32 = 0.1;

/// Per-tick lerp factor for photo scale changes
pub const SCALE_RATE: f32 = 0.1;

/// Free spin per tick (radians about local X and Y) while exploded
pub const EXPLODED_SPIN: f32 = 0.005;

/// Constant spin of the star about Y per tick
pub const STAR_SPIN: f32 = 0.02;

/// Light pulse: scale = base + sin(elapsed * frequency + id) * amplitude
pub const LIGHT_PULSE_BASE: f32 = 0.7;
pub const LIGHT_PULSE_AMPLITUDE: f32 = 0.2;
pub const LIGHT_PULSE_FREQUENCY: f32 = 5.0;

/// Photo scale targets per state
pub const PHOTO_SCALE: f32 = 1.0;
pub const PHOTO_HOVERED_SCALE: f32 = 1.2;
pub const PHOTO_ZOOMED_SCALE: f32 = 3.0;
