//! Surface materials

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Surface appearance of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color
    pub color: Vec3,
    /// Specular reflectivity (0.0 - 1.0)
    #[serde(default = "default_specular")]
    pub specular: f32,
    /// Emissive strength, used by alert materials to glow
    #[serde(default)]
    pub emissive: f32,
}

fn default_specular() -> f32 {
    0.5
}

impl Material {
    /// Create a new material with a color
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            specular: default_specular(),
            emissive: 0.0,
        }
    }

    /// Create a glowing material
    pub fn emissive(color: Vec3, strength: f32) -> Self {
        Self {
            emissive: strength,
            ..Self::new(color)
        }
    }

    /// Guard uniform
    pub fn guard() -> Self {
        Self::new(Vec3::new(0.2, 0.25, 0.6))
    }

    /// Red glow shown while a guard is pursuing
    pub fn alert() -> Self {
        Self::emissive(Vec3::new(0.9, 0.1, 0.1), 0.8)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::new(0.8, 0.8, 0.8))
    }
}
