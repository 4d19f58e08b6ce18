use super::error::TrackingError;

/// One step of a provider's capture loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    /// A detected hand, unvalidated.
    Landmarks(Vec<[f32; 3]>),
    /// Frame processed, no hand in view.
    NoHand,
    /// Nothing new yet; poll again.
    Idle,
    /// Source exhausted; the session ends.
    Finished,
}

/// Source of raw hand landmarks. Driven by the tracking session thread,
/// which guarantees `close` runs once for every successful or partial
/// `open`.
pub trait LandmarkProvider: Send {
    fn name(&self) -> &str;

    fn open(&mut self) -> Result<(), TrackingError>;

    /// Block for at most one frame interval and report what was captured.
    fn next_event(&mut self) -> Result<ProviderEvent, TrackingError>;

    fn close(&mut self);
}

/// Stand-in used when no capture source is configured or the platform has
/// none. Fails on open, so the scene runs with an absent hand.
#[derive(Debug, Clone)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl LandmarkProvider for UnavailableProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn open(&mut self) -> Result<(), TrackingError> {
        Err(TrackingError::unavailable(self.reason.clone()))
    }

    fn next_event(&mut self) -> Result<ProviderEvent, TrackingError> {
        Ok(ProviderEvent::Finished)
    }

    fn close(&mut self) {}
}
