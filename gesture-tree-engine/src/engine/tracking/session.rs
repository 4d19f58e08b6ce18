use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(target_arch = "wasm32"))]
use std::thread::JoinHandle;

use bevy::prelude::*;

use super::classifier::sample_from_points;
use super::error::TrackingError;
use super::provider::{LandmarkProvider, ProviderEvent};
use super::slot::{TrackingSample, TrackingSlot};

/// Closes the provider when the session scope ends, whichever way it ends.
/// Created before `open` so a half-opened provider is released too.
struct ProviderGuard<'a> {
    provider: &'a mut dyn LandmarkProvider,
}

impl<'a> ProviderGuard<'a> {
    fn new(provider: &'a mut dyn LandmarkProvider) -> Self {
        Self { provider }
    }
}

impl Drop for ProviderGuard<'_> {
    fn drop(&mut self) {
        self.provider.close();
    }
}

/// Capture, classify, publish until the provider runs dry or `stop` is set.
pub fn run_session(
    provider: &mut dyn LandmarkProvider,
    slot: &TrackingSlot,
    stop: &AtomicBool,
) -> Result<(), TrackingError> {
    let mut guard = ProviderGuard::new(provider);
    guard.provider.open()?;

    while !stop.load(Ordering::Relaxed) {
        match guard.provider.next_event()? {
            ProviderEvent::Landmarks(points) => slot.publish(sample_from_points(Some(&points))),
            ProviderEvent::NoHand => slot.publish(TrackingSample::absent()),
            ProviderEvent::Idle => std::thread::yield_now(),
            ProviderEvent::Finished => break,
        }
    }

    Ok(())
}

fn settle_slot(name: &str, slot: &TrackingSlot, outcome: Result<(), TrackingError>) {
    match outcome {
        Ok(()) => {
            info!("Tracking session '{}' ended", name);
            slot.mark_stopped();
        }
        Err(error) => {
            warn!("Hand tracking disabled: {}", error);
            slot.mark_unavailable();
        }
    }
}

/// Owns the capture loop. Dropping the session stops it.
#[derive(Resource)]
pub struct TrackingSession {
    stop_flag: Arc<AtomicBool>,
    #[cfg(not(target_arch = "wasm32"))]
    handle: Option<JoinHandle<()>>,
}

impl TrackingSession {
    /// A session with no capture loop, e.g. when the host page feeds the slot.
    pub fn idle() -> Self {
        Self {
            stop_flag: Arc::new(AtomicBool::new(false)),
            #[cfg(not(target_arch = "wasm32"))]
            handle: None,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(mut provider: Box<dyn LandmarkProvider>, slot: TrackingSlot) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let thread_stop = stop_flag.clone();

        let spawned = std::thread::Builder::new()
            .name("hand-tracking".into())
            .spawn(move || {
                let name = provider.name().to_string();
                info!("Tracking session '{}' started", name);
                let outcome = run_session(provider.as_mut(), &slot, &thread_stop);
                settle_slot(&name, &slot, outcome);
            });

        match spawned {
            Ok(handle) => Self {
                stop_flag,
                handle: Some(handle),
            },
            Err(error) => {
                error!("Could not spawn tracking thread: {}", error);
                Self::idle()
            }
        }
    }

    /// No worker threads in the browser: only the open check runs here and
    /// live samples arrive over the RPC bridge.
    #[cfg(target_arch = "wasm32")]
    pub fn start(mut provider: Box<dyn LandmarkProvider>, slot: TrackingSlot) -> Self {
        let name = provider.name().to_string();
        let outcome = {
            let mut guard = ProviderGuard::new(provider.as_mut());
            guard.provider.open()
        };
        if outcome.is_err() {
            settle_slot(&name, &slot, outcome);
        }
        Self::idle()
    }

    pub fn is_running(&self) -> bool {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.handle.as_ref().is_some_and(|h| !h.is_finished())
        }
        #[cfg(target_arch = "wasm32")]
        {
            false
        }
    }

    /// Signal the loop and wait for it. Safe to call repeatedly or on a
    /// session that never started.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(handle) = self.handle.take() {
                if handle.join().is_err() {
                    error!("Tracking thread panicked");
                }
            }
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tracking::classifier::Gesture;
    use crate::engine::tracking::slot::TrackingStatus;
    use std::sync::atomic::AtomicUsize;
    use std::time::{Duration, Instant};

    #[derive(Default, Clone)]
    struct Counters {
        opened: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
    }

    /// Plays a fixed script, then idles until stopped.
    struct ScriptedProvider {
        counters: Counters,
        fail_open: bool,
        script: Vec<ProviderEvent>,
    }

    impl ScriptedProvider {
        fn new(counters: &Counters, script: Vec<ProviderEvent>) -> Self {
            Self {
                counters: counters.clone(),
                fail_open: false,
                script,
            }
        }
    }

    impl LandmarkProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn open(&mut self) -> Result<(), TrackingError> {
            self.counters.opened.fetch_add(1, Ordering::SeqCst);
            if self.fail_open {
                return Err(TrackingError::unavailable("camera permission denied"));
            }
            self.script.reverse();
            Ok(())
        }

        fn next_event(&mut self) -> Result<ProviderEvent, TrackingError> {
            match self.script.pop() {
                Some(event) => Ok(event),
                None => {
                    std::thread::sleep(Duration::from_millis(1));
                    Ok(ProviderEvent::Idle)
                }
            }
        }

        fn close(&mut self) {
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fist_points() -> Vec<[f32; 3]> {
        let mut points = vec![[0.5, 0.9, 0.0]; 21];
        for (tip, pip, x) in [(8, 6, 0.40), (12, 10, 0.47), (16, 14, 0.54), (20, 18, 0.61)] {
            points[pip] = [x, 0.7, 0.0];
            points[tip] = [x, 0.75, 0.0];
        }
        points[2] = [0.35, 0.8, 0.0];
        points[4] = [0.45, 0.85, 0.0];
        points
    }

    fn wait_until(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for tracking thread");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn failed_open_still_closes_and_degrades_to_absent() {
        let counters = Counters::default();
        let mut provider = ScriptedProvider::new(&counters, Vec::new());
        provider.fail_open = true;
        let slot = TrackingSlot::default();

        let outcome = run_session(&mut provider, &slot, &AtomicBool::new(false));
        assert!(matches!(
            outcome,
            Err(TrackingError::ProviderUnavailable { .. })
        ));
        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);

        settle_slot("scripted", &slot, outcome);
        assert_eq!(slot.status(), TrackingStatus::Unavailable);
        assert!(!slot.latest().is_present);
    }

    #[test]
    fn finished_source_ends_the_loop() {
        let counters = Counters::default();
        let mut provider = ScriptedProvider::new(
            &counters,
            vec![
                ProviderEvent::Landmarks(fist_points()),
                ProviderEvent::Finished,
            ],
        );
        let slot = TrackingSlot::default();

        run_session(&mut provider, &slot, &AtomicBool::new(false)).unwrap();
        assert_eq!(slot.latest().gesture, Gesture::Fist);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn malformed_frames_publish_absent_and_keep_running() {
        let counters = Counters::default();
        let mut provider = ScriptedProvider::new(
            &counters,
            vec![
                ProviderEvent::Landmarks(fist_points()),
                ProviderEvent::Landmarks(vec![[0.0; 3]; 5]),
                ProviderEvent::Finished,
            ],
        );
        let slot = TrackingSlot::default();

        run_session(&mut provider, &slot, &AtomicBool::new(false)).unwrap();
        assert!(!slot.latest().is_present);
        assert_eq!(slot.status(), TrackingStatus::Active);
    }

    #[test]
    fn threaded_session_publishes_and_stops_once() {
        let counters = Counters::default();
        let provider = ScriptedProvider::new(
            &counters,
            vec![ProviderEvent::NoHand, ProviderEvent::Landmarks(fist_points())],
        );
        let slot = TrackingSlot::default();

        let mut session = TrackingSession::start(Box::new(provider), slot.clone());
        wait_until(|| slot.latest().is_present);
        assert_eq!(slot.latest().gesture, Gesture::Fist);
        assert!(session.is_running());

        session.stop();
        session.stop();
        assert!(!session.is_running());
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
        assert_eq!(slot.status(), TrackingStatus::Stopped);
    }

    #[test]
    fn dropping_the_session_closes_the_provider() {
        let counters = Counters::default();
        let provider = ScriptedProvider::new(&counters, Vec::new());
        let session = TrackingSession::start(Box::new(provider), TrackingSlot::default());
        wait_until(|| counters.opened.load(Ordering::SeqCst) == 1);

        drop(session);
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stopping_an_idle_session_is_a_no_op() {
        let mut session = TrackingSession::idle();
        session.stop();
        session.stop();
        assert!(!session.is_running());
    }
}
