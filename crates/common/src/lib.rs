//! Shared value types and the configuration layer.
//!
//! Everything here is plain data: no crate in the workspace owns a global,
//! so every subsystem receives the pieces it needs by reference.

pub mod config;
pub mod types;

pub use config::{
    AudioConfig, CameraConfig, ConfigError, ForestConfig, HudConfig, MissionConfig, TimingConfig,
};
pub use types::{Aabb, SessionId, Transform, WorldBounds};

pub fn crate_info() -> &'static str {
    "courier-common v0.1.0"
}
