//! Celestial bodies as seen by the nomenclature catalog
//!
//! Bodies are owned by a [`BodyRegistry`] that lives outside the catalog.
//! Feature records only keep a [`BodyHandle`]: a slot index plus a
//! generation counter, so a removed body is detected instead of being kept
//! alive by the records pointing at it.

use std::path::Path;

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::core::error::{NomenclatureError, Result, ResultExt};

#[cfg(test)]
use mockall::automock;

/// Kilometers per astronomical unit
pub const AU_KM: f64 = 149_597_870.691;

/// Non-owning reference to a body in a [`BodyRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: usize,
    generation: u32,
}

impl BodyHandle {
    /// Build a handle from raw parts (for resolvers that are not a registry)
    pub fn from_raw(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Where a body is and how it is turned, at the current instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    /// Body center in the reference frame, in AU
    pub position: DVec3,
    /// Mean radius in kilometers
    pub radius_km: f64,
    /// Rotation from the body-fixed frame to the reference frame
    pub orientation: DQuat,
}

impl BodyPose {
    pub fn new(position: DVec3, radius_km: f64, orientation: DQuat) -> Self {
        Self {
            position,
            radius_km,
            orientation,
        }
    }

    /// Position of a planetographic surface point in the reference frame (AU)
    pub fn surface_point(&self, latitude_deg: f64, longitude_deg: f64) -> DVec3 {
        let local = surface_unit(latitude_deg, longitude_deg) * (self.radius_km / AU_KM);
        self.position + self.orientation * local
    }
}

/// Unit vector of a planetographic point in the body-fixed frame
pub fn surface_unit(latitude_deg: f64, longitude_deg: f64) -> DVec3 {
    let (sin_lat, cos_lat) = latitude_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = longitude_deg.to_radians().sin_cos();
    DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// A body that may carry surface nomenclature
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub english_name: String,
    pub pose: BodyPose,
}

impl CelestialBody {
    pub fn new(english_name: impl Into<String>, pose: BodyPose) -> Self {
        Self {
            english_name: english_name.into(),
            pose,
        }
    }
}

/// Resolves bodies by name and reports their current pose
///
/// Absence is a normal outcome for both calls.
#[cfg_attr(test, automock)]
pub trait BodyResolver {
    /// Find a body by its English name
    fn resolve(&self, english_name: &str) -> Option<BodyHandle>;

    /// Current pose of a body, `None` once the handle went stale
    fn pose(&self, handle: BodyHandle) -> Option<BodyPose>;
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<CelestialBody>,
}

/// Owner of the body set, addressed through generational handles
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    slots: Vec<Slot>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body, reusing a free slot when one exists
    pub fn insert(&mut self, body: CelestialBody) -> BodyHandle {
        if let Some(index) = self.slots.iter().position(|s| s.body.is_none()) {
            let slot = &mut self.slots[index];
            // Wraps after u32::MAX reuses of one slot
            slot.generation = slot.generation.wrapping_add(1);
            slot.body = Some(body);
            return BodyHandle::from_raw(index, slot.generation);
        }

        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyHandle::from_raw(self.slots.len() - 1, 0)
    }

    /// Remove a body; every handle to it becomes stale
    pub fn remove(&mut self, handle: BodyHandle) -> Option<CelestialBody> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.take()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&CelestialBody> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    /// Move or rotate a body; false if the handle is stale
    pub fn set_pose(&mut self, handle: BodyHandle, pose: BodyPose) -> bool {
        match self.slots.get_mut(handle.index) {
            Some(slot) if slot.generation == handle.generation => match slot.body.as_mut() {
                Some(body) => {
                    body.pose = pose;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// English names of all live bodies, in insertion order
    pub fn english_names(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter_map(|slot| slot.body.as_ref())
            .map(|body| body.english_name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.body.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a registry from a JSON array of body descriptions
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: Vec<BodySpec> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for spec in specs {
            registry.insert(spec.into_body()?);
        }
        Ok(registry)
    }

    /// Load a registry from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NomenclatureError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading bodies from {}", path.display()))
    }
}

impl BodyResolver for BodyRegistry {
    fn resolve(&self, english_name: &str) -> Option<BodyHandle> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.body
                .as_ref()
                .filter(|body| body.english_name == english_name)
                .map(|_| BodyHandle::from_raw(index, slot.generation))
        })
    }

    fn pose(&self, handle: BodyHandle) -> Option<BodyPose> {
        self.get(handle).map(|body| body.pose)
    }
}

/// On-disk description of a body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    /// Center in AU
    #[serde(default)]
    pub position: [f64; 3],
    pub radius_km: f64,
    /// Tilt of the rotation axis, in degrees
    #[serde(default)]
    pub obliquity_deg: f64,
    /// Rotation angle about the body's own axis, in degrees
    #[serde(default)]
    pub rotation_deg: f64,
}

impl BodySpec {
    fn into_body(self) -> Result<CelestialBody> {
        if !(self.radius_km.is_finite() && self.radius_km > 0.0) {
            return Err(NomenclatureError::invalid_config(format!(
                "body {} has invalid radius {}",
                self.name, self.radius_km
            )));
        }
        let orientation = DQuat::from_rotation_x(self.obliquity_deg.to_radians())
            * DQuat::from_rotation_z(self.rotation_deg.to_radians());
        let pose = BodyPose::new(DVec3::from_array(self.position), self.radius_km, orientation);
        Ok(CelestialBody::new(self.name, pose))
    }
}
