//! Core data structures: the feature record and the shared label color

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::body::{BodyHandle, BodyResolver};
use crate::core::error::NomenclatureError;
use crate::core::i18n::Translator;
use crate::core::parser::ParsedRecord;

/// RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Default label color for surface nomenclature
pub const DEFAULT_NOMENCLATURE_COLOR: Color = Color::new(0.1, 1.0, 0.1);

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        DEFAULT_NOMENCLATURE_COLOR
    }
}

impl FromStr for Color {
    type Err = NomenclatureError;

    /// Parse the settings form `"r,g,b"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NomenclatureError::InvalidColor {
            value: s.to_string(),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut rgb = [0.0f32; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| invalid())?;
        }
        Ok(Color::new(rgb[0], rgb[1], rgb[2]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// One named surface feature on one body
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Identifier from the source file (not guaranteed unique)
    pub id: String,
    /// Canonical name, used for identity comparisons
    pub english_name: String,
    /// Name in the active UI language
    pub localized_name: String,
    /// Lower-cased feature type token (crater, mons, ...)
    pub feature_type: String,
    /// Planetographic latitude in degrees
    pub latitude: f64,
    /// Planetographic longitude in degrees
    pub longitude: f64,
    /// Diameter in kilometers
    pub size: f64,
    /// Body the feature belongs to
    pub parent_body: BodyHandle,
    /// Cached position in the reference frame, refreshed every update pass
    pub position: DVec3,
    pub label_visible: bool,
    initialized: bool,
}

impl FeatureRecord {
    /// Create an uninitialized record; call [`FeatureRecord::initialize`] to
    /// derive its geometry
    pub fn new(parsed: ParsedRecord, parent_body: BodyHandle) -> Self {
        Self {
            id: parsed.id,
            localized_name: parsed.name.clone(),
            english_name: parsed.name,
            feature_type: parsed.feature_type.to_lowercase(),
            latitude: parsed.latitude,
            longitude: parsed.longitude,
            size: parsed.size,
            parent_body,
            position: DVec3::ZERO,
            label_visible: false,
            initialized: false,
        }
    }

    /// Derive the position from the parent body's pose
    ///
    /// Returns whether the record ended up initialized. A record whose body
    /// cannot be resolved stays uninitialized.
    pub fn initialize(&mut self, bodies: &dyn BodyResolver) -> bool {
        if let Some(pose) = bodies.pose(self.parent_body) {
            self.position = pose.surface_point(self.latitude, self.longitude);
            self.initialized = true;
        }
        self.initialized
    }

    /// Recompute the cached position of an initialized record
    ///
    /// A record whose body disappeared is demoted and never comes back.
    pub fn refresh_position(&mut self, bodies: &dyn BodyResolver) {
        if !self.initialized {
            return;
        }
        match bodies.pose(self.parent_body) {
            Some(pose) => self.position = pose.surface_point(self.latitude, self.longitude),
            None => self.initialized = false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Recompute the localized name from the English one
    pub fn translate_name(&mut self, translator: &dyn Translator) {
        self.localized_name = translator.translate(&self.english_name);
    }

    /// Name to show, localized or English
    pub fn name(&self, use_english: bool) -> &str {
        if use_english {
            &self.english_name
        } else {
            &self.localized_name
        }
    }
}
