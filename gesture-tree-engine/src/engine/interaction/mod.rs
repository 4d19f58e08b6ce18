//! Pointer interaction driven by the hand cursor.
//!
//! ## Pipeline
//!
//! ```text
//! HandTracking (per-tick sample)
//!   └─> apply_gesture_to_mode    fist / thumbs-up / open flip SceneMode.is_formed
//!   └─> hit_test_pointer         cursor ray vs photo hit boxes -> hover, click edge
//!   └─> apply_photo_clicks       PhotoClicked -> SceneMode.zoomed toggle
//! ```
//!
//! Picking uses oriented bounding boxes cached on each photo root at spawn
//! time: the ray is moved into box-local space and tested with the slab
//! method, nearest positive hit wins.


/// Cursor to ray conversion and OBB intersection.
pub mod ray;

/// Scene mode resource and the gesture and click systems that mutate it.
pub mod selection;
