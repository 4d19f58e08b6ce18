//! JSON-RPC 2.0 bridge to the host page.
//!
//! The engine runs in an iframe. The page pushes hand landmarks and photos in
//! over `postMessage`; the engine answers requests and pushes hover, click,
//! tracking and frame rate notifications back out.
//!
//! ```text
//! Page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ hand_landmarks (no id) ─────────────> │ publish to tracking slot
//!        ├─ get_scene_state (id) ───────────────> │
//!        │ <──────────────────── Response (id) ───┤
//!        │ <──────── photo_hover / photo_click ───┤
//! ```
//!
//! Inbound messages are only applied once the scene is running; until then
//! they wait in the listener queue. Requests without an id are handled the
//! same way but never answered.
//!
//! Error codes follow JSON-RPC 2.0: `-32600` invalid request (landmarks sent
//! while a native capture loop owns the slot), `-32601` method not found,
//! `-32602` invalid params (including photos with only one placement target).
//!
//! ## Existing Methods
//!
//! ### Hand Tracking
//! - `hand_landmarks`: Publish one detection (21 `[x, y, z]` points, 63 flat
//!   numbers, or `null` for no hand)
//! - `tracking_unavailable`: Camera or model failed; hand stays absent
//!
//! ### Scene
//! - `add_photos`: Queue photos (`{photos: [{source, id?, formed?, exploded?, tilt?}]}`),
//!   returns the assigned ids
//! - `set_formed`: Gather or scatter the tree
//! - `get_scene_state`: Mode, hover, zoom, tracking status and photo count
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications Sent
//!
//! - `photo_hover`: `{id}` of the hovered photo, or `null`
//! - `photo_click`: `{id}` on pinch start, empty string over nothing
//! - `tracking_status`: `starting | active | unavailable | stopped` on change
//! - `fps_update`: Smoothed frame rate every half second

/// Message types, listener queue, method handlers and notification forwarding.
pub mod web_rpc;
