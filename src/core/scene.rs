//! Level files
//!
//! Levels are authored as RON (Rusty Object Notation) or JSON. Every tuning
//! block is optional and falls back to the gameplay defaults.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::gameplay::{GuardConfig, KeyConfig, PlayerScript, PrisonerConfig};
use crate::visual::{Material, SpotLight};

fn default_version() -> u32 {
    1
}

fn body_radius() -> f32 {
    0.5
}

fn exit_radius() -> f32 {
    1.5
}

/// Where the player starts and how it moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub position: Vec3,
    #[serde(default)]
    pub script: PlayerScript,
    #[serde(default = "body_radius")]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardSpawn {
    pub position: Vec3,
    /// Initial facing, degrees about +Y (0 looks down -Z)
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub route: Vec<Vec3>,
    #[serde(default)]
    pub config: GuardConfig,
    #[serde(default = "Material::guard")]
    pub material: Material,
    #[serde(default = "Material::alert")]
    pub alert_material: Material,
    #[serde(default)]
    pub spotlight: SpotLight,
    #[serde(default = "body_radius")]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrisonerSpawn {
    pub position: Vec3,
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub config: PrisonerConfig,
    #[serde(default = "body_radius")]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeySpawn {
    pub position: Vec3,
    #[serde(default)]
    pub config: KeyConfig,
    #[serde(default = "body_radius")]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrierSpawn {
    pub position: Vec3,
    #[serde(default = "body_radius")]
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitSpawn {
    pub position: Vec3,
    #[serde(default = "exit_radius")]
    pub radius: f32,
}

/// A complete level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name
    pub name: String,
    /// Format version for compatibility
    #[serde(default = "default_version")]
    pub version: u32,
    pub player: PlayerSpawn,
    #[serde(default)]
    pub guards: Vec<GuardSpawn>,
    #[serde(default)]
    pub prisoners: Vec<PrisonerSpawn>,
    #[serde(default)]
    pub key: Option<KeySpawn>,
    #[serde(default)]
    pub barriers: Vec<BarrierSpawn>,
    #[serde(default)]
    pub exit: Option<ExitSpawn>,
}

impl Level {
    /// Create an empty level with the player at the origin
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: default_version(),
            player: PlayerSpawn {
                position: Vec3::ZERO,
                script: PlayerScript::default(),
                radius: body_radius(),
            },
            guards: Vec::new(),
            prisoners: Vec::new(),
            key: None,
            barriers: Vec::new(),
            exit: None,
        }
    }

    /// Built-in cell block: one guard walking a loop past the cells, a
    /// prisoner behind two bars, and the key on the far side of the yard.
    #[must_use]
    pub fn demo() -> Self {
        let mut level = Self::new("Cell Block A");
        level.player.position = Vec3::new(0.0, 0.0, 10.0);
        level.player.script = PlayerScript {
            waypoints: vec![
                Vec3::new(-10.0, 0.0, 10.0),
                Vec3::new(-10.0, 0.0, 0.0),
                Vec3::new(-10.0, 0.0, -25.0),
                Vec3::new(0.0, 0.0, -30.0),
            ],
            speed: 4.0,
        };
        level.guards.push(GuardSpawn {
            position: Vec3::new(12.0, 0.0, 5.0),
            yaw_degrees: 0.0,
            route: vec![
                Vec3::new(12.0, 0.0, 5.0),
                Vec3::new(12.0, 0.0, -20.0),
                Vec3::new(18.0, 0.0, -20.0),
                Vec3::new(18.0, 0.0, 5.0),
            ],
            config: GuardConfig::default(),
            material: Material::guard(),
            alert_material: Material::alert(),
            spotlight: SpotLight::default(),
            radius: body_radius(),
        });
        level.prisoners.push(PrisonerSpawn {
            position: Vec3::new(6.0, 0.0, -10.0),
            yaw_degrees: 90.0,
            config: PrisonerConfig::default(),
            radius: body_radius(),
        });
        level.key = Some(KeySpawn {
            position: Vec3::new(-10.0, 0.0, 0.0),
            config: KeyConfig::default(),
            radius: body_radius(),
        });
        level.barriers = vec![
            BarrierSpawn {
                position: Vec3::new(4.5, 0.0, -10.5),
                radius: 0.3,
            },
            BarrierSpawn {
                position: Vec3::new(4.5, 0.0, -9.5),
                radius: 0.3,
            },
        ];
        level.exit = Some(ExitSpawn {
            position: Vec3::new(0.0, 0.0, -30.0),
            radius: exit_radius(),
        });
        level
    }

    /// Load a level, picking the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, or does not describe a level
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::load_ron(path),
            Some("json") => Self::load_json(path),
            other => Err(SceneError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Save the level to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron_string)?;
        Ok(())
    }

    /// Load a level from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    /// Save the level to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load a level from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Errors that can occur while loading or saving levels
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),
    #[error("RON deserialization error: {0}")]
    RonDeserialize(#[from] ron::error::SpannedError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported level file extension {0:?}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_ron_fills_defaults() {
        let level: Level = ron::from_str(
            r#"(
                name: "Solitary",
                player: (position: (0.0, 0.0, 3.0)),
                guards: [(position: (1.0, 0.0, 1.0), route: [(1.0, 0.0, 1.0), (1.0, 0.0, -4.0)])],
                exit: Some((position: (0.0, 0.0, -9.0))),
            )"#,
        )
        .unwrap();

        assert_eq!(level.version, 1);
        assert_eq!(level.player.radius, 0.5);
        assert_eq!(level.guards[0].config, GuardConfig::default());
        assert_eq!(level.guards[0].route.len(), 2);
        assert_eq!(level.guards[0].material, Material::guard());
        assert_eq!(level.exit.as_ref().unwrap().radius, 1.5);
        assert!(level.key.is_none());
        assert!(level.prisoners.is_empty());
    }

    #[test]
    fn test_save_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let level = Level::demo();

        let ron_path = dir.path().join("block_a.ron");
        level.save_ron(&ron_path).unwrap();
        assert_eq!(Level::load(&ron_path).unwrap(), level);

        let json_path = dir.path().join("block_a.json");
        level.save_json(&json_path).unwrap();
        assert_eq!(Level::load(&json_path).unwrap(), level);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = Level::load("level.yaml").unwrap_err();
        assert!(matches!(err, SceneError::UnsupportedFormat(ext) if ext == "yaml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Level::load(dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }

    #[test]
    fn test_demo_level_is_complete() {
        let level = Level::demo();
        assert_eq!(level.guards.len(), 1);
        assert_eq!(level.prisoners.len(), 1);
        assert!(level.key.is_some());
        assert_eq!(level.barriers.len(), 2);
        assert!(level.exit.is_some());
    }
}
