//! Asset plumbing between the host engine and the session core.
//!
//! The host imports models and sounds asynchronously. The core never waits
//! for them: each asset sits in an [`AssetSlot`] that starts `Pending` and
//! becomes `Ready` exactly once, with a placeholder standing in when the
//! import fails.
//!
//! # Invariants
//! - Readers tolerate `Pending` indefinitely.
//! - A failed import is never fatal; it resolves to a placeholder.

mod manifest;

pub use manifest::{AssetManifest, ModelEntry};
use serde::{Deserialize, Serialize};

/// Which scene object a model file dresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelRole {
    Player,
    Package,
    Bird,
}

/// Sound effects and music the session can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoundCue {
    /// Looping background track, started on the first user gesture.
    Ambient,
    /// Looping walk sound, active while the player moves.
    Footsteps,
    /// One-shot beep on pickup.
    Pickup,
    /// One-shot fanfare on delivery.
    Success,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to load {file}: {reason}")]
    LoadFailed { file: String, reason: String },
    #[error("{0} contains no meshes")]
    Empty(String),
    #[error("manifest has no entry for {0}")]
    MissingEntry(String),
}

/// What the host reports once a model file has been imported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshSet {
    pub file: String,
    pub meshes: Vec<String>,
    pub animations: Vec<String>,
}

/// Simple fallback shape used when a model cannot be imported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placeholder {
    Capsule { radius: f32, height: f32 },
    Crate { size: f32 },
    /// No stand-in; the scene simply goes without the object.
    Omitted,
}

impl Placeholder {
    pub fn for_role(role: ModelRole) -> Self {
        match role {
            ModelRole::Player => Self::Capsule {
                radius: 0.4,
                height: 1.8,
            },
            ModelRole::Package => Self::Crate { size: 1.0 },
            ModelRole::Bird => Self::Omitted,
        }
    }
}

/// A model ready for the session to use.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub role: ModelRole,
    pub name: String,
    pub scale: f32,
    pub animations: Vec<String>,
    pub placeholder: Option<Placeholder>,
}

impl LoadedModel {
    pub fn placeholder(role: ModelRole) -> Self {
        Self {
            role,
            name: format!("{role:?}Placeholder").to_lowercase(),
            scale: 1.0,
            animations: Vec::new(),
            placeholder: Some(Placeholder::for_role(role)),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// The clip to loop while walking: the first one named like a walk,
    /// otherwise the first clip of any name.
    pub fn walk_animation(&self) -> Option<&str> {
        self.animations
            .iter()
            .find(|name| name.to_lowercase().contains("walk"))
            .or_else(|| self.animations.first())
            .map(String::as_str)
    }
}

/// Turn a host import result into a usable model, substituting the
/// role's placeholder on failure.
pub fn resolve_model(
    role: ModelRole,
    scale: f32,
    result: Result<MeshSet, AssetError>,
) -> LoadedModel {
    let set = match result {
        Ok(set) if set.meshes.is_empty() => {
            tracing::warn!(?role, file = %set.file, "model has no meshes, using placeholder");
            return LoadedModel::placeholder(role);
        }
        Ok(set) => set,
        Err(err) => {
            tracing::warn!(?role, %err, "model import failed, using placeholder");
            return LoadedModel::placeholder(role);
        }
    };
    tracing::info!(?role, file = %set.file, meshes = set.meshes.len(), "model ready");
    LoadedModel {
        role,
        name: set.meshes[0].clone(),
        scale,
        animations: set.animations,
        placeholder: None,
    }
}

/// A fire-once asset handle: `Pending` until the host reports completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssetSlot<T> {
    #[default]
    Pending,
    Ready(T),
}

impl<T> AssetSlot<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending => None,
        }
    }

    /// Fill the slot. Returns false and keeps the first value if the slot
    /// was already ready.
    pub fn fulfil(&mut self, value: T) -> bool {
        if self.is_ready() {
            return false;
        }
        *self = Self::Ready(value);
        true
    }
}

pub fn crate_info() -> &'static str {
    "courier-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_set(animations: &[&str]) -> MeshSet {
        MeshSet {
            file: "tecnico.glb".into(),
            meshes: vec!["__root__".into(), "body".into()],
            animations: animations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn slot_starts_pending() {
        let slot: AssetSlot<u32> = AssetSlot::default();
        assert!(!slot.is_ready());
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn slot_fills_once() {
        let mut slot = AssetSlot::Pending;
        assert!(slot.fulfil(1));
        assert!(!slot.fulfil(2));
        assert_eq!(slot.get(), Some(&1));
    }

    #[test]
    fn import_error_resolves_to_placeholder() {
        let err = AssetError::LoadFailed {
            file: "tecnico.glb".into(),
            reason: "404".into(),
        };
        let model = resolve_model(ModelRole::Player, 0.2, Err(err));
        assert!(model.is_placeholder());
        assert_eq!(
            model.placeholder,
            Some(Placeholder::Capsule {
                radius: 0.4,
                height: 1.8
            })
        );
        assert_eq!(model.walk_animation(), None);
    }

    #[test]
    fn empty_import_resolves_to_placeholder() {
        let set = MeshSet {
            file: "servidor.glb".into(),
            ..MeshSet::default()
        };
        let model = resolve_model(ModelRole::Package, 0.18, Ok(set));
        assert_eq!(model.placeholder, Some(Placeholder::Crate { size: 1.0 }));
    }

    #[test]
    fn successful_import_keeps_scale_and_root_name() {
        let model = resolve_model(ModelRole::Player, 0.2, Ok(mesh_set(&[])));
        assert!(!model.is_placeholder());
        assert_eq!(model.name, "__root__");
        assert_eq!(model.scale, 0.2);
    }

    #[test]
    fn walk_clip_preferred() {
        let model = resolve_model(ModelRole::Player, 0.2, Ok(mesh_set(&["Idle", "Armature|WALK"])));
        assert_eq!(model.walk_animation(), Some("Armature|WALK"));
    }

    #[test]
    fn first_clip_when_no_walk() {
        let model = resolve_model(ModelRole::Player, 0.2, Ok(mesh_set(&["Idle", "Wave"])));
        assert_eq!(model.walk_animation(), Some("Idle"));
    }

    #[test]
    fn scenery_has_no_stand_in() {
        assert_eq!(Placeholder::for_role(ModelRole::Bird), Placeholder::Omitted);
    }
}
