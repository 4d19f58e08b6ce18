use bevy::prelude::*;
use constants::gesture::HAND_LANDMARK_COUNT;

use super::error::TrackingError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) pairs for index, middle, ring and pinky
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// ============================================================================
// FRAME
// ============================================================================

/// One tracked hand: 21 points with x, y normalised to the camera image and z
/// as relative depth. Only constructible with the full landmark set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkFrame {
    points: [Vec3; HAND_LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn from_points(points: &[[f32; 3]]) -> Result<Self, TrackingError> {
        if points.len() != HAND_LANDMARK_COUNT {
            return Err(TrackingError::MalformedLandmarkFrame {
                points: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.iter().all(|v| v.is_finite())) {
            return Err(TrackingError::NonFiniteLandmark { index });
        }

        let mut frame = [Vec3::ZERO; HAND_LANDMARK_COUNT];
        for (slot, point) in frame.iter_mut().zip(points) {
            *slot = Vec3::from_array(*point);
        }
        Ok(Self { points: frame })
    }

    /// Flat `x, y, z` triples as handed over by a typed array.
    pub fn from_flat(data: &[f32]) -> Result<Self, TrackingError> {
        if data.len() % 3 != 0 {
            return Err(TrackingError::MalformedLandmarkFrame {
                points: data.len() / 3,
            });
        }
        let points: Vec<[f32; 3]> = data
            .chunks_exact(3)
            .map(|xyz| [xyz[0], xyz[1], xyz[2]])
            .collect();
        Self::from_points(&points)
    }

    pub fn point(&self, index: usize) -> Vec3 {
        self.points[index]
    }

    /// Image-plane distance between two landmarks; depth is too noisy to use.
    pub fn planar_distance(&self, a: usize, b: usize) -> f32 {
        self.points[a].truncate().distance(self.points[b].truncate())
    }
}
