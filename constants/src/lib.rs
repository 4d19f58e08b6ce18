//! Shared tuning values for the gesture tree scene.
//!
//! Everything here is a compile-time default. Values that users are expected
//! to tune at runtime are mirrored in the engine's settings asset.

pub mod animation;
pub mod colours;
pub mod gesture;
pub mod interaction;
pub mod path;
pub mod tree;
