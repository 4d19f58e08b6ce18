use thiserror::Error;

/// Failures on the hand tracking side. None of these stop the scene; they
/// only ever turn into an absent tracking sample.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Tracking library, camera or recording could not be used.
    #[error("hand tracking provider unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    /// A detection that does not carry the full 21-point hand.
    #[error("malformed landmark frame: expected 21 points, got {points}")]
    MalformedLandmarkFrame { points: usize },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },
}

impl TrackingError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            reason: reason.into(),
        }
    }
}
