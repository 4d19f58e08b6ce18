//! Photo panels hung on the tree.
//!
//! Each panel gets a formed slot on the tree surface and an exploded slot in
//! the surrounding cloud when it is created. The first panel of a session is
//! always scattered to the same reserved spot in front of the tree.

use std::collections::HashSet;
use std::f32::consts::TAU;
use std::fmt;

use bevy::prelude::*;
use constants::tree::{
    BASE_RADIUS, FIRST_PHOTO_EXPLODED_POSITION, PHOTO_RADIUS_EXPONENT, PHOTO_RADIUS_FACTOR,
    PHOTO_SCATTER_HALF_EXTENT, PHOTO_TILT_HALF_RANGE, TREE_HEIGHT,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::EntityConfigError;
use super::particles::outward_rotation;

/// Opaque id shared with the surrounding page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub String);

impl PhotoId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Targets of one photo panel. The zoomed target is shared by all panels.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PhotoPanel {
    pub id: PhotoId,
    pub formed: Vec3,
    pub exploded: Vec3,
    /// Outward-facing with the panel's Z tilt already applied.
    pub formed_rotation: Quat,
}

impl PhotoPanel {
    /// Both targets are required; a panel never defaults to the origin.
    pub fn new(
        id: PhotoId,
        formed: Option<Vec3>,
        exploded: Option<Vec3>,
        tilt: f32,
    ) -> Result<Self, EntityConfigError> {
        let formed = require_target(&id, formed, "formed")?;
        let exploded = require_target(&id, exploded, "exploded")?;

        Ok(Self {
            formed_rotation: outward_rotation(formed) * Quat::from_rotation_z(tilt),
            id,
            formed,
            exploded,
        })
    }
}

fn require_target(
    id: &PhotoId,
    target: Option<Vec3>,
    name: &'static str,
) -> Result<Vec3, EntityConfigError> {
    let target = target.ok_or_else(|| EntityConfigError::MissingTarget {
        id: id.to_string(),
        target: name,
    })?;
    if !target.is_finite() {
        return Err(EntityConfigError::NonFiniteTarget {
            id: id.to_string(),
            target: name,
        });
    }
    Ok(target)
}

/// Caller-supplied placement. Either both targets are given or neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestedPlacement {
    pub formed: Option<[f32; 3]>,
    pub exploded: Option<[f32; 3]>,
    #[serde(default)]
    pub tilt: f32,
}

/// Ask the scene to hang a new photo.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AddPhotoRequest {
    pub id: Option<String>,
    /// Asset path or URL of the image.
    pub source: String,
    pub placement: Option<RequestedPlacement>,
}

impl AddPhotoRequest {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            placement: None,
        }
    }
}

/// Random placement for new panels. Remembers every id placed this session so
/// ids stay unique and the reserved first slot is handed out exactly once.
#[derive(Resource)]
pub struct PhotoPlacer {
    rng: StdRng,
    placed: HashSet<PhotoId>,
}

impl PhotoPlacer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            placed: HashSet::new(),
        }
    }

    #[cfg(test)]
    pub fn placed(&self) -> usize {
        self.placed.len()
    }

    /// Resolve a request into a validated panel.
    pub fn place(&mut self, request: &AddPhotoRequest) -> Result<PhotoPanel, EntityConfigError> {
        let id = request
            .id
            .clone()
            .map(PhotoId)
            .unwrap_or_else(PhotoId::generate);
        if self.placed.contains(&id) {
            return Err(EntityConfigError::DuplicateId { id: id.0 });
        }

        let panel = match request.placement {
            Some(requested) => PhotoPanel::new(
                id,
                requested.formed.map(Vec3::from_array),
                requested.exploded.map(Vec3::from_array),
                requested.tilt,
            )?,
            None => self.random_panel(id)?,
        };

        self.placed.insert(panel.id.clone());
        Ok(panel)
    }

    fn random_panel(&mut self, id: PhotoId) -> Result<PhotoPanel, EntityConfigError> {
        let rng = &mut self.rng;

        let t: f32 = rng.gen_range(0.0..1.0);
        let y = (1.0 - t) * TREE_HEIGHT - TREE_HEIGHT * 0.5;
        let r = t.powf(PHOTO_RADIUS_EXPONENT) * BASE_RADIUS * PHOTO_RADIUS_FACTOR;
        let angle = rng.gen_range(0.0..TAU);
        let formed = Vec3::new(angle.cos() * r, y, angle.sin() * r);

        let h = PHOTO_SCATTER_HALF_EXTENT;
        let scattered = Vec3::new(
            rng.gen_range(-h..h),
            rng.gen_range(-h..h),
            rng.gen_range(-h..h),
        );
        let exploded = if self.placed.is_empty() {
            Vec3::from_array(FIRST_PHOTO_EXPLODED_POSITION)
        } else {
            scattered
        };

        let tilt = rng.gen_range(-PHOTO_TILT_HALF_RANGE..PHOTO_TILT_HALF_RANGE);
        PhotoPanel::new(id, Some(formed), Some(exploded), tilt)
    }
}

impl Default for PhotoPlacer {
    fn default() -> Self {
        Self::new(None)
    }
}
