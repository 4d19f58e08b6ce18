//! Scene content: the particle tree, its star and the photo panels.

pub mod error;

/// Golden-angle spiral tree generation.
pub mod particles;

/// Photo ids, panel targets and random placement.
pub mod photos;

/// Shared meshes and materials, entity spawning for tree and photos.
pub mod spawn;
