use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use constants::path::{REPLAY_RATE_HZ, REPLAY_RATE_RANGE_HZ};
use serde::Deserialize;

use super::error::TrackingError;
use super::provider::{LandmarkProvider, ProviderEvent};

/// Recorded tracking session. Each frame is either the 21 landmarks of the
/// detected hand or `null` when no hand was in view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Recording {
    pub frames: Vec<Option<Vec<[f32; 3]>>>,
}

impl Recording {
    pub fn parse(json: &str) -> Result<Self, TrackingError> {
        serde_json::from_str(json)
            .map_err(|e| TrackingError::unavailable(format!("invalid recording: {e}")))
    }
}

/// Plays a recorded session back at a fixed rate, standing in for a live
/// camera on native builds.
pub struct ReplayProvider {
    path: PathBuf,
    interval: Duration,
    looped: bool,
    recording: Option<Recording>,
    cursor: usize,
    next_due: Option<Instant>,
}

impl ReplayProvider {
    pub fn new(path: impl AsRef<Path>, rate_hz: f32, looped: bool) -> Self {
        let rate_hz = if rate_hz.is_finite() {
            rate_hz
        } else {
            REPLAY_RATE_HZ
        };
        let (min, max) = REPLAY_RATE_RANGE_HZ;
        let rate_hz = rate_hz.clamp(min, max);
        Self {
            path: path.as_ref().to_path_buf(),
            interval: Duration::from_secs_f32(1.0 / rate_hz),
            looped,
            recording: None,
            cursor: 0,
            next_due: None,
        }
    }

    fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        let due = self.next_due.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        self.next_due = Some(due.max(now) + self.interval);
    }
}

impl LandmarkProvider for ReplayProvider {
    fn name(&self) -> &str {
        "replay"
    }

    fn open(&mut self) -> Result<(), TrackingError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            TrackingError::unavailable(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let recording = Recording::parse(&json)?;
        if recording.frames.is_empty() {
            return Err(TrackingError::unavailable(format!(
                "recording {} has no frames",
                self.path.display()
            )));
        }

        self.recording = Some(recording);
        self.cursor = 0;
        self.next_due = None;
        Ok(())
    }

    fn next_event(&mut self) -> Result<ProviderEvent, TrackingError> {
        let Some(total) = self.recording.as_ref().map(|r| r.frames.len()) else {
            return Err(TrackingError::unavailable("replay read before open"));
        };

        if self.cursor >= total {
            if !self.looped {
                return Ok(ProviderEvent::Finished);
            }
            self.cursor = 0;
        }

        self.wait_for_next_frame();

        let frame = self
            .recording
            .as_ref()
            .and_then(|r| r.frames.get(self.cursor))
            .cloned()
            .flatten();
        self.cursor += 1;

        Ok(match frame {
            Some(points) => ProviderEvent::Landmarks(points),
            None => ProviderEvent::NoHand,
        })
    }

    fn close(&mut self) {
        self.recording = None;
        self.next_due = None;
    }
}
