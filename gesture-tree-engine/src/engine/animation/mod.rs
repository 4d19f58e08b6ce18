//! Transform engine.
//!
//! Every tick each particle and photo panel resolves its current state into a
//! single `MotionTarget` and its live `Transform` takes one fixed-fraction
//! step toward it. Nothing here is frame-rate compensated.

/// Hover tint on photo frames.
pub mod highlight;

/// Per-tick stepping of live transforms and the systems that drive it.
pub mod motion;

/// Entity states and the resolve functions mapping them to motion targets.
pub mod targets;
