//! Common ECS components

use glam::{EulerRot, Quat, Vec3};

/// Transform component for position and rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
}

impl Transform {
    /// Create a new transform at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Create a transform at `position` turned `yaw_degrees` about +Y
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self::from_position_rotation(position, Quat::from_rotation_y(yaw_degrees.to_radians()))
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Rotate by euler angles (in radians), applied in local space
    pub fn rotate_euler(&mut self, euler: Vec3) {
        self.rotation =
            (self.rotation * Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)).normalize();
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marks the entity controlled by the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Marks a barrier that is removed once the key is collected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Barrier;

/// Marks the level exit zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitZone;
