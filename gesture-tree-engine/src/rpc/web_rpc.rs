use std::collections::HashSet;

use bevy::diagnostic::DiagnosticsStore;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::AppState;
use crate::engine::interaction::hit_test::{PhotoClicked, PhotoHovered};
use crate::engine::interaction::selection::SceneMode;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::error::EntityConfigError;
use crate::engine::scene::photos::{AddPhotoRequest, PhotoId, PhotoPanel, RequestedPlacement};
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::engine::tracking::classifier::sample_from_points;
use crate::engine::tracking::landmarks::LandmarkFrame;
use crate::engine::tracking::session::TrackingSession;
use crate::engine::tracking::slot::{HandTracking, TrackingSample, TrackingSlot, TrackingStatus};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page
/// and Bevy. Handles both request-response patterns and notification
/// broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Inbound messages are applied before the scene tick, outbound ones are
/// flushed after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RpcSet {
    Inbound,
    Outbound,
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .configure_sets(Update, RpcSet::Inbound.before(RpcSet::Outbound))
            // Messages stay queued until the scene exists.
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(RpcSet::Inbound)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                (
                    (forward_photo_events, notify_tracking_status)
                        .run_if(in_state(AppState::Running)),
                    send_outgoing_messages,
                )
                    .chain()
                    .in_set(RpcSet::Outbound),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything RPC handlers may read or change in the running scene.
#[derive(SystemParam)]
struct SceneAccess<'w, 's> {
    mode: ResMut<'w, SceneMode>,
    tracking: Res<'w, HandTracking>,
    slot: Res<'w, TrackingSlot>,
    session: Option<Res<'w, TrackingSession>>,
    photo_requests: EventWriter<'w, AddPhotoRequest>,
    panels: Query<'w, 's, &'static PhotoPanel>,
    diagnostics: Res<'w, DiagnosticsStore>,
    progress: Res<'w, LoadingProgress>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut scene: SceneAccess,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &mut scene) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Dropping malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Apply one request. Notifications (no id) run the same handlers but get no
/// response.
fn handle_rpc_request(request: &RpcRequest, scene: &mut SceneAccess) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "hand_landmarks" => handle_hand_landmarks(&request.params, scene),
        "tracking_unavailable" => handle_tracking_unavailable(&request.params, scene),
        "add_photos" => handle_add_photos(&request.params, scene),
        "set_formed" => handle_set_formed(&request.params, scene),
        "get_scene_state" => Ok(scene_state(scene)),
        "get_fps" => Ok(serde_json::json!({
            "fps": smoothed_fps(&scene.diagnostics).unwrap_or(0.0)
        })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Landmarks either nested as 21 points or flattened to 63 numbers.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum LandmarkPayload {
    Nested(Vec<[f32; 3]>),
    Flat(Vec<f32>),
}

/// Parse a `hand_landmarks` payload into a sample. A null or missing hand is
/// an absent sample; a wrongly sized hand is skipped the same way.
fn parse_hand_landmarks(params: &serde_json::Value) -> Result<TrackingSample, RpcError> {
    #[derive(Deserialize)]
    struct HandLandmarksParams {
        landmarks: Option<LandmarkPayload>,
    }

    let parsed = serde_json::from_value::<HandLandmarksParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'landmarks' as points or null"))?;

    Ok(match parsed.landmarks {
        None => TrackingSample::absent(),
        Some(LandmarkPayload::Nested(points)) => sample_from_points(Some(&points)),
        Some(LandmarkPayload::Flat(values)) => match LandmarkFrame::from_flat(&values) {
            Ok(frame) => TrackingSample::from_frame(&frame),
            Err(error) => {
                debug!("Skipping tracking sample: {}", error);
                TrackingSample::absent()
            }
        },
    })
}

fn handle_hand_landmarks(
    params: &serde_json::Value,
    scene: &mut SceneAccess,
) -> Result<serde_json::Value, RpcError> {
    // The native capture loop is the slot's only writer while it runs.
    if scene.session.as_ref().is_some_and(|s| s.is_running()) {
        return Err(RpcError::invalid_request(
            "Hand tracking is driven by the local capture loop",
        ));
    }

    if scene.slot.status() == TrackingStatus::Unavailable {
        return Err(RpcError::invalid_request("Hand tracking was reported unavailable"));
    }

    let sample = parse_hand_landmarks(params)?;
    scene.slot.publish(sample);
    Ok(serde_json::json!({ "accepted": true }))
}

fn handle_tracking_unavailable(
    params: &serde_json::Value,
    scene: &mut SceneAccess,
) -> Result<serde_json::Value, RpcError> {
    let reason = params
        .get("reason")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("reported by page");
    warn!("Hand tracking unavailable: {}", reason);
    scene.slot.mark_unavailable();
    Ok(serde_json::json!({ "status": TrackingStatus::Unavailable }))
}

#[derive(Deserialize, Debug)]
struct PhotoEntry {
    id: Option<String>,
    source: String,
    #[serde(flatten)]
    placement: Option<RequestedPlacement>,
}

/// Parse and validate an `add_photos` batch. Ids are assigned up front so the
/// caller learns them from the response. Any invalid placement or repeated id
/// rejects the whole batch.
fn parse_add_photos(params: &serde_json::Value) -> Result<Vec<AddPhotoRequest>, RpcError> {
    #[derive(Deserialize)]
    struct AddPhotosParams {
        photos: Vec<PhotoEntry>,
    }

    let parsed = serde_json::from_value::<AddPhotosParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'photos' as a list of {source}"))?;

    let mut seen = HashSet::new();
    parsed
        .photos
        .into_iter()
        .map(|entry| {
            let id = entry.id.map(PhotoId).unwrap_or_else(PhotoId::generate);
            if !seen.insert(id.clone()) {
                let error = EntityConfigError::DuplicateId { id: id.0 };
                return Err(RpcError::invalid_params(&error.to_string()));
            }

            // Bare sources get random placement.
            let placement = entry
                .placement
                .filter(|p| p.formed.is_some() || p.exploded.is_some());

            if let Some(requested) = placement {
                PhotoPanel::new(
                    id.clone(),
                    requested.formed.map(Vec3::from_array),
                    requested.exploded.map(Vec3::from_array),
                    requested.tilt,
                )
                .map_err(|error| RpcError::invalid_params(&error.to_string()))?;
            }

            Ok(AddPhotoRequest {
                id: Some(id.0),
                source: entry.source,
                placement,
            })
        })
        .collect()
}

fn handle_add_photos(
    params: &serde_json::Value,
    scene: &mut SceneAccess,
) -> Result<serde_json::Value, RpcError> {
    let requests = parse_add_photos(params)?;
    let taken = requests.iter().filter_map(|r| r.id.as_deref()).find(|id| {
        scene.panels.iter().any(|panel| panel.id.as_str() == *id)
    });
    if let Some(id) = taken {
        let error = EntityConfigError::DuplicateId { id: id.to_string() };
        return Err(RpcError::invalid_params(&error.to_string()));
    }

    let ids: Vec<String> = requests.iter().filter_map(|r| r.id.clone()).collect();

    info!("Queued {} photos from RPC", requests.len());
    scene.photo_requests.write_batch(requests);

    Ok(serde_json::json!({ "ids": ids }))
}

fn handle_set_formed(
    params: &serde_json::Value,
    scene: &mut SceneAccess,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetFormedParams {
        formed: bool,
    }

    let parsed = serde_json::from_value::<SetFormedParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'formed' boolean"))?;

    if scene.mode.is_formed != parsed.formed {
        info!("Scene mode set over RPC: formed = {}", parsed.formed);
        scene.mode.is_formed = parsed.formed;
    }
    Ok(serde_json::json!({ "is_formed": scene.mode.is_formed }))
}

fn scene_state(scene: &SceneAccess) -> serde_json::Value {
    serde_json::json!({
        "mode": &*scene.mode,
        "tracking": {
            "status": scene.tracking.status,
            "sample": scene.tracking.sample,
        },
        "photo_count": scene.panels.iter().count(),
        "fallback_settings": scene.progress.used_fallback_settings,
    })
}

/// Forward hover and click events to the host page.
fn forward_photo_events(
    mut hovered: EventReader<PhotoHovered>,
    mut clicked: EventReader<PhotoClicked>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for PhotoHovered(id) in hovered.read() {
        rpc_interface.send_notification("photo_hover", serde_json::json!({ "id": id }));
    }
    for PhotoClicked(id) in clicked.read() {
        rpc_interface.send_notification("photo_click", serde_json::json!({ "id": id }));
    }
}

fn notify_tracking_status(
    tracking: Res<HandTracking>,
    mut last_status: Local<Option<TrackingStatus>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if *last_status == Some(tracking.status) {
        return;
    }
    *last_status = Some(tracking.status);
    rpc_interface.send_notification(
        "tracking_status",
        serde_json::json!({ "status": tracking.status }),
    );
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tracking::classifier::Gesture;
    use crate::engine::tracking::classifier::tests::hand;
    use bevy::ecs::event::Events;
    use serde_json::json;

    fn rpc_app() -> App {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<SceneMode>()
            .init_resource::<HandTracking>()
            .init_resource::<TrackingSlot>()
            .init_resource::<DiagnosticsStore>()
            .init_resource::<LoadingProgress>()
            .add_event::<AddPhotoRequest>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(Update, handle_rpc_messages);
        app
    }

    fn open_hand() -> Vec<[f32; 3]> {
        let frame = hand([true; 4], true, false);
        (0..21).map(|i| frame.point(i).to_array()).collect()
    }

    fn call(app: &mut App, request: serde_json::Value) -> Vec<RpcResponse> {
        app.world_mut().send_event(IncomingRpcMessage {
            content: request.to_string(),
        });
        app.update();
        std::mem::take(
            &mut app
                .world_mut()
                .resource_mut::<WebRpcInterface>()
                .outgoing_responses,
        )
    }

    #[test]
    fn flat_and_nested_landmarks_agree() {
        let points = open_hand();
        let flat: Vec<f32> = points.iter().flatten().copied().collect();

        let nested = parse_hand_landmarks(&json!({ "landmarks": points })).unwrap();
        let flattened = parse_hand_landmarks(&json!({ "landmarks": flat })).unwrap();

        assert!(nested.is_present);
        assert_eq!(nested.gesture, Gesture::Open);
        assert_eq!(nested, flattened);
    }

    #[test]
    fn null_or_short_landmarks_are_absent() {
        let absent = parse_hand_landmarks(&json!({ "landmarks": null })).unwrap();
        assert!(!absent.is_present);

        let short = parse_hand_landmarks(&json!({ "landmarks": [[0.1, 0.2, 0.0]] })).unwrap();
        assert!(!short.is_present);
        assert_eq!(short.gesture, Gesture::None);

        assert!(parse_hand_landmarks(&json!({ "landmarks": "palm" })).is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_absent() {
        let mut points: Vec<serde_json::Value> =
            open_hand().into_iter().map(|p| json!(p)).collect();
        points[8] = json!([1e39, 0.5, 0.0]);

        let sample = parse_hand_landmarks(&json!({ "landmarks": points })).unwrap();
        assert!(!sample.is_present);
        assert_eq!(sample.gesture, Gesture::None);
    }

    #[test]
    fn landmark_notification_publishes_without_response() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "hand_landmarks", "params": { "landmarks": open_hand() } }),
        );

        assert!(responses.is_empty());
        let slot = app.world().resource::<TrackingSlot>();
        assert!(slot.latest().is_present);
        assert_eq!(slot.status(), TrackingStatus::Active);
    }

    #[test]
    fn tracking_unavailable_sticks() {
        let mut app = rpc_app();
        call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "tracking_unavailable", "params": { "reason": "denied" } }),
        );
        let responses = call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "hand_landmarks", "params": { "landmarks": open_hand() }, "id": 2 }),
        );

        assert_eq!(responses[0].error.as_ref().unwrap().code, -32600);
        let slot = app.world().resource::<TrackingSlot>();
        assert_eq!(slot.status(), TrackingStatus::Unavailable);
        assert!(!slot.latest().is_present);

        // Notifications are dropped the same way.
        call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "hand_landmarks", "params": { "landmarks": open_hand() } }),
        );
        let tracking = app.world().resource::<TrackingSlot>();
        assert!(!tracking.latest().is_present);
    }

    #[test]
    fn add_photos_assigns_ids_and_queues_requests() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            json!({
                "jsonrpc": "2.0",
                "method": "add_photos",
                "params": { "photos": [
                    { "source": "photos/a.jpg" },
                    { "id": "family", "source": "photos/b.jpg", "formed": [1.0, 2.0, 3.0], "exploded": [0.0, 0.0, 9.0] }
                ] },
                "id": 7
            }),
        );

        assert_eq!(responses.len(), 1);
        let ids = responses[0].result.as_ref().unwrap()["ids"].as_array().unwrap().clone();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], json!("family"));

        let requests: Vec<AddPhotoRequest> = app
            .world_mut()
            .resource_mut::<Events<AddPhotoRequest>>()
            .drain()
            .collect();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].placement.is_none());
        assert_eq!(requests[1].placement.unwrap().formed, Some([1.0, 2.0, 3.0]));
    }

    #[test]
    fn add_photos_with_half_a_placement_is_rejected() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            json!({
                "jsonrpc": "2.0",
                "method": "add_photos",
                "params": { "photos": [ { "id": "lonely", "source": "x.png", "formed": [1.0, 0.0, 0.0] } ] },
                "id": 3
            }),
        );

        let error = responses[0].error.as_ref().unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("lonely"));
        assert!(
            app.world()
                .resource::<Events<AddPhotoRequest>>()
                .is_empty()
        );
    }

    #[test]
    fn add_photos_with_repeated_id_is_rejected() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            json!({
                "jsonrpc": "2.0",
                "method": "add_photos",
                "params": { "photos": [
                    { "id": "twin", "source": "a.png" },
                    { "id": "twin", "source": "b.png" }
                ] },
                "id": 4
            }),
        );

        let error = responses[0].error.as_ref().unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("twin"));
        assert!(
            app.world()
                .resource::<Events<AddPhotoRequest>>()
                .is_empty()
        );
    }

    #[test]
    fn add_photos_rejects_ids_already_in_the_scene() {
        let mut app = rpc_app();
        let panel = PhotoPanel::new(
            PhotoId("hung".into()),
            Some(Vec3::X),
            Some(Vec3::ZERO),
            0.0,
        )
        .unwrap();
        app.world_mut().spawn(panel);

        let responses = call(
            &mut app,
            json!({
                "jsonrpc": "2.0",
                "method": "add_photos",
                "params": { "photos": [ { "id": "hung", "source": "again.png" } ] },
                "id": 5
            }),
        );

        assert_eq!(responses[0].error.as_ref().unwrap().code, -32602);
        assert!(
            app.world()
                .resource::<Events<AddPhotoRequest>>()
                .is_empty()
        );
    }

    #[test]
    fn set_formed_and_scene_state() {
        let mut app = rpc_app();
        call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "set_formed", "params": { "formed": false } }),
        );
        assert!(!app.world().resource::<SceneMode>().is_formed);

        let responses = call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "get_scene_state", "params": {}, "id": "s" }),
        );
        let state = responses[0].result.as_ref().unwrap();
        assert_eq!(state["mode"]["is_formed"], json!(false));
        assert_eq!(state["tracking"]["status"], json!("starting"));
        assert_eq!(state["photo_count"], json!(0));
        assert_eq!(state["fallback_settings"], json!(false));
    }

    #[test]
    fn scene_state_reports_fallback_settings() {
        let mut app = rpc_app();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .used_fallback_settings = true;

        let responses = call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "get_scene_state", "params": {}, "id": 9 }),
        );
        let state = responses[0].result.as_ref().unwrap();
        assert_eq!(state["fallback_settings"], json!(true));
    }

    #[test]
    fn unknown_method_reports_not_found() {
        let mut app = rpc_app();
        let responses = call(
            &mut app,
            json!({ "jsonrpc": "2.0", "method": "decorate", "params": {}, "id": 1 }),
        );
        assert_eq!(responses[0].error.as_ref().unwrap().code, -32601);
    }

    #[test]
    fn hover_and_click_become_notifications() {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .add_event::<PhotoHovered>()
            .add_event::<PhotoClicked>()
            .add_systems(Update, forward_photo_events);

        app.world_mut()
            .send_event(PhotoHovered(Some(PhotoId("p".into()))));
        app.world_mut().send_event(PhotoClicked(String::new()));
        app.update();

        let sent = &app.world().resource::<WebRpcInterface>().outgoing_notifications;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, "photo_hover");
        assert_eq!(sent[0].params, json!({ "id": "p" }));
        assert_eq!(sent[1].method, "photo_click");
        assert_eq!(sent[1].params, json!({ "id": "" }));
    }

    #[test]
    fn tracking_status_is_sent_on_change_only() {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<HandTracking>()
            .add_systems(Update, notify_tracking_status);

        app.update();
        app.update();
        app.world_mut().resource_mut::<HandTracking>().status = TrackingStatus::Unavailable;
        app.update();

        let sent = &app.world().resource::<WebRpcInterface>().outgoing_notifications;
        let statuses: Vec<_> = sent.iter().map(|n| n.params["status"].clone()).collect();
        assert_eq!(statuses, vec![json!("starting"), json!("unavailable")]);
    }
}
