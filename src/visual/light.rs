//! Light sources attached to entities

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Red, the default colour of an alerted spotlight
pub const ALERT_RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Spot light carried by an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// Light color
    pub color: Vec3,
    /// Intensity
    pub intensity: f32,
    /// Outer cone angle in degrees
    pub cone_degrees: f32,
}

impl SpotLight {
    #[must_use]
    pub fn new(color: Vec3, intensity: f32, cone_degrees: f32) -> Self {
        Self {
            color,
            intensity,
            cone_degrees,
        }
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 0.95, 0.8), 2.0, 45.0)
    }
}
