/// Number of particles that make up the tree body
pub const PARTICLE_COUNT: usize = 2500;

/// Height of the tree span used for photo placement
pub const TREE_HEIGHT: f32 = 25.0;

/// Radius of the tree at its base
pub const BASE_RADIUS: f32 = 8.0;

/// Frequency of the layered wave along the tree height
pub const SPIRAL_TIGHTNESS: f32 = 25.0;

/// Amplitude of the layered wave, scaled by depth down the tree
pub const LAYER_WAVE_AMPLITUDE: f32 = 0.8;

/// Particle y at the top (t = 0) and the span down to the bottom (t = 1)
pub const PARTICLE_TOP_Y: f32 = 10.0;
pub const PARTICLE_SPAN_Y: f32 = 20.0;

/// Exponent shaping radius growth from tip to base
pub const RADIUS_EXPONENT: f32 = 0.9;

/// Half extent of the cube particles scatter into when exploded
pub const PARTICLE_SCATTER_HALF_EXTENT: f32 = 25.0;

/// Cumulative type thresholds for a uniform roll: below LEAF is a leaf,
/// below ORNAMENT an ornament, otherwise a light
pub const LEAF_SHARE: f32 = 0.7;
pub const ORNAMENT_SHARE: f32 = 0.9;

/// Radius offsets (min, span) pushing each type out from the tree surface
pub const LEAF_RADIUS_OFFSET: (f32, f32) = (0.0, 0.2);
pub const ORNAMENT_RADIUS_OFFSET: (f32, f32) = (0.4, 0.2);
pub const LIGHT_RADIUS_OFFSET: (f32, f32) = (0.25, 0.2);

/// Uniform scale ranges (min, span) per particle type
pub const LEAF_SCALE: (f32, f32) = (0.6, 0.4);
pub const ORNAMENT_SCALE: (f32, f32) = (1.2, 0.6);
pub const LIGHT_SCALE: f32 = 0.7;

/// Star topper placement
pub const STAR_FORMED_POSITION: [f32; 3] = [0.0, 11.0, 0.0];
pub const STAR_EXPLODED_POSITION: [f32; 3] = [0.0, 30.0, 0.0];
pub const STAR_OUTER_RADIUS: f32 = 1.5;
pub const STAR_DEPTH: f32 = 0.5;

/// Photo placement on the tree: radius is shrunk so frames sit inside the leaves
pub const PHOTO_RADIUS_FACTOR: f32 = 0.85;
pub const PHOTO_RADIUS_EXPONENT: f32 = 1.2;

/// Half extent of the cube photos scatter into when exploded
pub const PHOTO_SCATTER_HALF_EXTENT: f32 = 20.0;

/// Maximum absolute Z tilt applied to a hanging photo
pub const PHOTO_TILT_HALF_RANGE: f32 = 0.25;

/// Exploded placement reserved for the first photo of a session
pub const FIRST_PHOTO_EXPLODED_POSITION: [f32; 3] = [0.0, 0.0, 14.0];
