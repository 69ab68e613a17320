use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for one play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", &self.0.to_string()[..8])
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of the given full `size` centred on `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Grow the box outward by `radius` on X and Z. Y is left untouched.
    pub fn expanded_xz(&self, radius: f32) -> Self {
        let pad = Vec3::new(radius, 0.0, radius);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Inclusive containment test on the ground plane.
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Rectangular walkable area on the ground plane.
///
/// The default bounds are asymmetric: the player may back
/// further toward -Z than they may walk toward +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl WorldBounds {
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }

    pub fn clamp_z(&self, z: f32) -> f32 {
        z.clamp(self.min_z, self.max_z)
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Largest absolute extent on the X axis, used to size the minimap.
    pub fn half_width(&self) -> f32 {
        self.min_x.abs().max(self.max_x.abs())
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -18.0,
            max_x: 18.0,
            min_z: -25.0,
            max_z: 18.0,
        }
    }
}
