/// Horizontal cursor distance from centre before the camera starts orbiting
pub const AZIMUTH_DEADZONE: f32 = 0.1;

/// Cursor-to-azimuth amplification, as a multiple of pi per unit offset
pub const AZIMUTH_AMPLIFICATION: f32 = 2.0;
pub const AZIMUTH_AMPLIFICATION_RANGE: (f32, f32) = (2.0, 4.0);

/// Polar swing (radians) per unit of vertical cursor offset
pub const POLAR_AMPLITUDE: f32 = 1.0;

/// Fraction of the remaining angle covered per tick
pub const CAMERA_SMOOTHING: f32 = 0.02;

/// Keeps the orbit camera off the poles
pub const POLAR_EPSILON: f32 = 1.0e-3;

/// Initial camera placement and lens
pub const CAMERA_START_POSITION: [f32; 3] = [0.0, 5.0, 35.0];
pub const CAMERA_FOV_DEGREES: f32 = 45.0;

/// Orbit distance limits for wheel zoom
pub const CAMERA_MIN_RADIUS: f32 = 10.0;
pub const CAMERA_MAX_RADIUS: f32 = 50.0;

/// Invisible hit box around a photo frame (width, height, depth)
pub const PHOTO_HIT_BOX: [f32; 3] = [2.5, 3.0, 0.2];

/// Visible frame and picture sizes
pub const PHOTO_FRAME_SIZE: [f32; 3] = [2.2, 2.6, 0.05];
pub const PHOTO_PICTURE_SIZE: f32 = 1.8;

/// World-space anchor in front of the tree that a zoomed photo flies to
pub const ZOOM_ANCHOR: [f32; 3] = [0.0, 2.0, 10.0];
