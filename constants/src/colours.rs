use bevy::color::Color;

/// Leaf green (#003318)
pub const LEAF: Color = Color::srgb(0.0, 0.2, 0.094);

/// Ornament gold (#FFD700)
pub const GOLD: Color = Color::srgb(1.0, 0.843, 0.0);

/// Ornament red (#8A0A0A)
pub const RED: Color = Color::srgb(0.541, 0.039, 0.039);

/// Fairy light palette: cyan, magenta, orange, white
pub const LIGHTS: [Color; 4] = [
    Color::srgb(0.0, 1.0, 1.0),
    Color::srgb(1.0, 0.0, 1.0),
    Color::srgb(1.0, 0.647, 0.0),
    Color::srgb(1.0, 1.0, 1.0),
];

/// Star topper gold
pub const STAR: Color = GOLD;

/// Emissive multiplier for lights and the star
pub const LIGHT_EMISSIVE_INTENSITY: f32 = 5.0;
pub const STAR_EMISSIVE_INTENSITY: f32 = 2.0;

/// Photo frame paper, plain and hovered
pub const FRAME: Color = Color::srgb(1.0, 1.0, 1.0);
pub const FRAME_HOVERED: Color = Color::srgb(1.0, 0.867, 0.867);
pub const FRAME_HOVERED_EMISSIVE: Color = Color::srgb(0.2, 0.0, 0.0);

/// Clear colour behind the scene (#02040A)
pub const BACKGROUND: Color = Color::srgb(0.008, 0.016, 0.039);
