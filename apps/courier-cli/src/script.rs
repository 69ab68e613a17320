//! Scripted input for headless runs.
//!
//! A script is a YAML list of steps, each a single-key map:
//!
//! ```yaml
//! steps:
//!   - key: { name: w, pressed: true }
//!   - wait: { frames: 30 }
//!   - orbit: { dx: 120, dy: 0 }
//!   - place: { x: 14, y: 1, z: 15 }
//! ```

use courier_common::MissionConfig;
use courier_input::Key;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("script has no steps")]
    Empty,
    #[error("step {index}: unknown key {name:?}")]
    UnknownKey { index: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Press or release a key by name.
    Key { name: String, pressed: bool },
    /// Press and release the interaction key.
    Interact,
    /// Simulate this many frames.
    Wait { frames: u32 },
    /// Pointer drag in pixels.
    Orbit { dx: f32, dy: f32 },
    Zoom { delta: f32 },
    /// Teleport the player.
    Place { x: f32, y: f32, z: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub name: String,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_yaml::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    pub fn to_yaml_string(&self) -> Result<String, ScriptError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        for (index, step) in self.steps.iter().enumerate() {
            if let Step::Key { name, .. } = step {
                if Key::from_name(name).is_none() {
                    return Err(ScriptError::UnknownKey {
                        index,
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Total frames the script simulates.
    pub fn frame_count(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Wait { frames } => u64::from(*frames),
                _ => 0,
            })
            .sum()
    }

    /// A full run: stroll, pick up the package, carry it to the delivery
    /// zone, deliver, then wait out the effects.
    pub fn full_run(config: &MissionConfig) -> Self {
        let near = |target: glam::Vec3, dx: f32, dz: f32| Step::Place {
            x: target.x + dx,
            y: config.floor_level,
            z: target.z + dz,
        };
        let key = |name: &str, pressed: bool| Step::Key {
            name: name.into(),
            pressed,
        };
        Self {
            name: "full-run".into(),
            steps: vec![
                Step::Wait { frames: 2 },
                key("w", true),
                Step::Wait { frames: 30 },
                key("w", false),
                Step::Orbit { dx: 300.0, dy: 40.0 },
                Step::Wait { frames: 5 },
                near(config.pickup_zone, -2.0, -1.0),
                Step::Wait { frames: 2 },
                Step::Interact,
                Step::Wait { frames: 30 },
                key("d", true),
                Step::Wait { frames: 20 },
                key("d", false),
                near(config.delivery_zone, 1.0, 1.0),
                Step::Wait { frames: 2 },
                Step::Interact,
                Step::Wait { frames: 300 },
            ],
        }
    }
}
