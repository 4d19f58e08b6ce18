//! Startup loading for the tree scene.
//!
//! Reads the runtime scene settings before anything is spawned, falling back
//! to compiled defaults when the file is missing or invalid.

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Scene settings asset loading, validation and default fallback.
///
/// Installs the validated settings and the orbit camera built from them.
pub mod settings_loader;
