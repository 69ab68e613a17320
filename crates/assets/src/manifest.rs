use crate::{AssetError, ModelRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A model file the host engine should import for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub file: String,
    /// Uniform scale applied to every mesh in the file after import.
    pub scale: f32,
}

/// The model files the host imports for each role.
///
/// Stored as JSON so the web host can read the same file. Sound volumes are
/// not listed here; they come from `AudioConfig` in the mission config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub base_dir: String,
    pub models: BTreeMap<ModelRole, ModelEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let model = |file: &str, scale: f32| ModelEntry {
            file: file.into(),
            scale,
        };
        Self {
            base_dir: "assets".into(),
            models: BTreeMap::from([
                (ModelRole::Player, model("models/tecnico.glb", 0.2)),
                (ModelRole::Package, model("models/servidor.glb", 0.18)),
                (
                    ModelRole::Bird,
                    model("models/terror_bird_nhmw_-_optimized_obj.glb", 0.002),
                ),
            ]),
        }
    }
}

impl AssetManifest {
    pub fn model(&self, role: ModelRole) -> Result<&ModelEntry, AssetError> {
        self.models
            .get(&role)
            .ok_or(AssetError::MissingEntry(format!("{role:?}")))
    }

    /// Full path of a manifest-relative file.
    pub fn resolve(&self, file: &str) -> String {
        if self.base_dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.base_dir.trim_end_matches('/'), file)
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let manifest: Self = serde_json::from_reader(file)?;
        Ok(manifest)
    }
}
