use std::sync::{Arc, Mutex, PoisonError};

use bevy::prelude::*;
use serde::Serialize;

use super::classifier::Gesture;

/// Latest classifier output. Copied whole on every read and write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackingSample {
    pub gesture: Gesture,
    /// Normalised screen position, (0, 0) top left
    pub cursor: Vec2,
    pub is_present: bool,
}

impl TrackingSample {
    pub fn absent() -> Self {
        Self {
            gesture: Gesture::None,
            cursor: Vec2::splat(0.5),
            is_present: false,
        }
    }
}

impl Default for TrackingSample {
    fn default() -> Self {
        Self::absent()
    }
}

/// Availability of the hand tracking provider, surfaced to the page indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    #[default]
    Starting,
    Active,
    Unavailable,
    Stopped,
}

#[derive(Debug, Default)]
struct Published {
    sample: TrackingSample,
    status: TrackingStatus,
}

/// Single-value publish cell between the tracking producer and the render
/// tick. The producer is the only writer; each write replaces the previous
/// sample. The lock is only ever held for a copy, so readers never wait on
/// the provider.
#[derive(Resource, Clone, Default)]
pub struct TrackingSlot(Arc<Mutex<Published>>);

impl TrackingSlot {
    /// Replace the current sample. Ignored once the provider is unavailable.
    pub fn publish(&self, sample: TrackingSample) {
        let mut published = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if published.status == TrackingStatus::Unavailable {
            return;
        }
        published.sample = sample;
        if sample.is_present || published.status == TrackingStatus::Starting {
            published.status = TrackingStatus::Active;
        }
    }

    pub fn latest(&self) -> TrackingSample {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).sample
    }

    pub fn status(&self) -> TrackingStatus {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).status
    }

    /// Provider is gone for good: consumers see an absent hand from now on.
    pub fn mark_unavailable(&self) {
        self.settle(TrackingStatus::Unavailable);
    }

    /// Session ended normally.
    pub fn mark_stopped(&self) {
        self.settle(TrackingStatus::Stopped);
    }

    fn settle(&self, status: TrackingStatus) {
        let mut published = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        published.sample = TrackingSample::absent();
        if published.status != TrackingStatus::Unavailable {
            published.status = status;
        }
    }
}

/// Per-tick snapshot of the slot. Every consumer in a tick reads this copy so
/// they all agree on the same sample.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HandTracking {
    pub sample: TrackingSample,
    pub status: TrackingStatus,
}

pub fn snapshot_tracking_slot(slot: Res<TrackingSlot>, mut tracking: ResMut<HandTracking>) {
    tracking.sample = slot.latest();
    tracking.status = slot.status();
}
