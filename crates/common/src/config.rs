//! Tunable constants for both demo scenes.
//!
//! Every field has a default matching the shipped layout, and every section
//! is `#[serde(default)]`, so a YAML file only needs to name what it changes.

use crate::types::{Aabb, WorldBounds};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration of the pickup-and-deliver minigame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Distance covered per tick while a movement key is held.
    pub movement_speed: f32,
    pub floor_level: f32,
    pub bounds: WorldBounds,
    /// Collision radius used to pad every obstacle on X and Z.
    pub player_radius: f32,
    pub player_spawn: Vec3,
    pub pickup_zone: Vec3,
    /// Visual radius of the pickup and delivery markers.
    pub zone_radius: f32,
    pub pickup_distance: f32,
    pub delivery_zone: Vec3,
    pub delivery_distance: f32,
    /// Package offset in the player's frame (x right, y up, z forward).
    pub carry_offset: Vec3,
    pub package_rest_lift: f32,
    pub placeholder_rest_lift: f32,
    pub delivered_lift: f32,
    /// Idle spin applied to the unattached package, radians per tick.
    pub package_spin: f32,
    pub desk_size: Vec3,
    pub desk_positions: Vec<Vec3>,
    pub camera: CameraConfig,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
    pub hud: HudConfig,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            movement_speed: 0.2,
            floor_level: 1.0,
            bounds: WorldBounds::default(),
            player_radius: 0.5,
            player_spawn: Vec3::new(0.0, 1.0, 0.0),
            pickup_zone: Vec3::new(16.0, 1.0, 16.0),
            zone_radius: 1.25,
            pickup_distance: 3.0,
            delivery_zone: Vec3::new(-16.0, 1.0, -18.0),
            delivery_distance: 5.0,
            carry_offset: Vec3::new(0.0, 1.2, 1.1),
            package_rest_lift: 0.45,
            placeholder_rest_lift: 0.6,
            delivered_lift: 0.6,
            package_spin: 0.01,
            desk_size: Vec3::new(2.4, 0.9, 1.2),
            desk_positions: vec![
                Vec3::new(5.0, 0.0, 0.0),
                Vec3::new(-5.0, 0.0, 3.0),
                Vec3::new(10.0, 0.0, -5.0),
                Vec3::new(-12.0, 0.0, -2.0),
                Vec3::new(3.0, 0.0, 10.0),
                Vec3::new(-8.0, 0.0, 12.0),
            ],
            camera: CameraConfig::default(),
            timing: TimingConfig::default(),
            audio: AudioConfig::default(),
            hud: HudConfig::default(),
        }
    }
}

impl MissionConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Desk bounding boxes in world space, lifted to sit on the floor.
    pub fn desk_boxes(&self) -> Vec<Aabb> {
        let lift = Vec3::new(0.0, self.floor_level + self.desk_size.y * 0.5, 0.0);
        self.desk_positions
            .iter()
            .map(|p| Aabb::from_center_size(*p + lift, self.desk_size))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("movement_speed", self.movement_speed)?;
        non_negative("player_radius", self.player_radius)?;
        positive("pickup_distance", self.pickup_distance)?;
        positive("delivery_distance", self.delivery_distance)?;
        if self.bounds.min_x > self.bounds.max_x || self.bounds.min_z > self.bounds.max_z {
            return Err(ConfigError::Invalid {
                field: "bounds",
                reason: "minimum exceeds maximum".into(),
            });
        }
        if !self
            .bounds
            .contains(self.player_spawn.x, self.player_spawn.z)
        {
            return Err(ConfigError::Invalid {
                field: "player_spawn",
                reason: "lies outside the world bounds".into(),
            });
        }
        self.camera.validate()?;
        self.timing.validate()?;
        self.audio.validate()?;
        self.hud.validate()
    }
}

/// Arc-rotate camera parameters. Angles are in degrees in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub alpha_deg: f32,
    pub beta_deg: f32,
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_beta_deg: f32,
    pub max_beta_deg: f32,
    /// Radians of orbit per pixel of pointer drag.
    pub orbit_sensitivity: f32,
    /// Fraction of the current radius removed per wheel unit.
    pub zoom_per_unit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha_deg: 180.0,
            beta_deg: 60.0,
            radius: 10.0,
            min_radius: 5.0,
            max_radius: 9.0,
            min_beta_deg: 45.0,
            max_beta_deg: 80.0,
            orbit_sensitivity: 0.001,
            zoom_per_unit: 0.01,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("camera.alpha_deg", self.alpha_deg)?;
        finite("camera.beta_deg", self.beta_deg)?;
        finite("camera.radius", self.radius)?;
        positive("camera.min_radius", self.min_radius)?;
        positive("camera.max_radius", self.max_radius)?;
        finite("camera.min_beta_deg", self.min_beta_deg)?;
        finite("camera.max_beta_deg", self.max_beta_deg)?;
        finite("camera.orbit_sensitivity", self.orbit_sensitivity)?;
        finite("camera.zoom_per_unit", self.zoom_per_unit)?;
        if !(self.min_radius <= self.max_radius) {
            return Err(ConfigError::Invalid {
                field: "camera.min_radius",
                reason: "exceeds camera.max_radius".into(),
            });
        }
        if !(self.min_beta_deg <= self.max_beta_deg) {
            return Err(ConfigError::Invalid {
                field: "camera.min_beta_deg",
                reason: "exceeds camera.max_beta_deg".into(),
            });
        }
        Ok(())
    }
}

/// Durations of the self-expiring effects, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub pickup_feedback_ms: u64,
    pub delivery_feedback_ms: u64,
    pub particle_burst_ms: u64,
    pub particle_capacity: u32,
    /// Emitter height above the delivery zone.
    pub particle_lift: f32,
    pub fade_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pickup_feedback_ms: 3500,
            delivery_feedback_ms: 4000,
            particle_burst_ms: 1200,
            particle_capacity: 150,
            particle_lift: 1.5,
            fade_interval_ms: 100,
        }
    }
}

impl TimingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "timing.fade_interval_ms",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub ambient_volume: f32,
    pub footsteps_volume: f32,
    pub pickup_volume: f32,
    pub success_volume: f32,
    pub fade_step: f32,
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit("audio.ambient_volume", self.ambient_volume)?;
        unit("audio.footsteps_volume", self.footsteps_volume)?;
        unit("audio.pickup_volume", self.pickup_volume)?;
        unit("audio.success_volume", self.success_volume)?;
        // The fade has to reach silence in a finite number of ticks.
        positive("audio.fade_step", self.fade_step)
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ambient_volume: 0.3,
            footsteps_volume: 0.5,
            pickup_volume: 0.6,
            success_volume: 0.7,
            fade_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudConfig {
    pub minimap_size_px: f32,
    /// Extra world units shown around the bounds on the minimap.
    pub minimap_margin: f32,
    pub heading_offset_px: f32,
    pub proximity_bar_px: f32,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            minimap_size_px: 300.0,
            minimap_margin: 10.0,
            heading_offset_px: 12.0,
            proximity_bar_px: 180.0,
        }
    }
}

impl HudConfig {
    /// Pixels per world unit on the minimap.
    pub fn minimap_scale(&self, bounds: &WorldBounds) -> f32 {
        self.minimap_size_px / (bounds.half_width() * 2.0 + self.minimap_margin)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("hud.minimap_size_px", self.minimap_size_px)?;
        positive("hud.proximity_bar_px", self.proximity_bar_px)
    }
}

/// Haunted forest showcase: a bird circling over the trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub flight_radius: f32,
    pub flight_height: f32,
    pub flight_speed: f32,
    /// Angle advanced per tick before `flight_speed` is applied.
    pub angular_step: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub light_lift: f32,
    pub bird_scale: f32,
    pub camera: CameraConfig,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            flight_radius: 8.0,
            flight_height: 3.0,
            flight_speed: 0.5,
            angular_step: 0.01,
            bob_amplitude: 0.5,
            bob_frequency: 3.0,
            light_lift: 2.0,
            bird_scale: 0.002,
            camera: CameraConfig {
                alpha_deg: -90.0,
                beta_deg: 60.0,
                radius: 30.0,
                min_radius: 15.0,
                max_radius: 50.0,
                min_beta_deg: 0.0,
                max_beta_deg: 180.0,
                ..CameraConfig::default()
            },
        }
    }
}

impl ForestConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("flight_radius", self.flight_radius)?;
        positive("flight_speed", self.flight_speed)?;
        finite("flight_height", self.flight_height)?;
        finite("angular_step", self.angular_step)?;
        non_negative("bob_amplitude", self.bob_amplitude)?;
        finite("bob_frequency", self.bob_frequency)?;
        finite("light_lift", self.light_lift)?;
        positive("bird_scale", self.bird_scale)?;
        self.camera.validate()
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite number, got {value}"),
        })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must lie in [0, 1], got {value}"),
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}
