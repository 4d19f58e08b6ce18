//! Orbit camera for the tree scene.
//!
//! The hand cursor steers azimuth and polar angle around the trunk; the mouse
//! wheel adjusts the orbit radius within fixed bounds.

/// Orbit rig resource, cursor coupling and camera transform sync.
pub mod orbit_camera;
