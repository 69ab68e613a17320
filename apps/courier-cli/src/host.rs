//! The pieces a real engine would provide: model imports and audio output.

use courier_assets::{AssetError, AssetManifest, LoadedModel, MeshSet, ModelRole, SoundCue};
use courier_kernel::{AudioError, AudioSink};
use std::collections::BTreeMap;
use std::path::Path;

/// Import a model the way a headless host can: the file must exist, and
/// its stem stands in for the mesh list. Anything else resolves to the
/// role's placeholder.
pub fn import_model(manifest: &AssetManifest, role: ModelRole) -> LoadedModel {
    let (scale, result) = match manifest.model(role) {
        Ok(entry) => (entry.scale, probe(&manifest.resolve(&entry.file))),
        Err(err) => (1.0, Err(err)),
    };
    courier_assets::resolve_model(role, scale, result)
}

fn probe(path: &str) -> Result<MeshSet, AssetError> {
    let p = Path::new(path);
    if !p.is_file() {
        return Err(AssetError::LoadFailed {
            file: path.to_string(),
            reason: "file not found".into(),
        });
    }
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();
    Ok(MeshSet {
        file: path.to_string(),
        meshes: vec![stem],
        animations: Vec::new(),
    })
}

/// Audio sink that logs instead of playing.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    muted: bool,
    playing: BTreeMap<SoundCue, f32>,
}

impl ConsoleSink {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    pub fn playing(&self) -> impl Iterator<Item = (&SoundCue, &f32)> {
        self.playing.iter()
    }
}

impl AudioSink for ConsoleSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        if self.muted {
            return Err(AudioError::Unavailable);
        }
        tracing::info!(?cue, volume, "sound started");
        self.playing.insert(cue, volume);
        Ok(())
    }

    fn stop(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        if self.playing.remove(&cue).is_some() {
            tracing::info!(?cue, "sound stopped");
        }
        Ok(())
    }

    fn set_volume(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
        match self.playing.get_mut(&cue) {
            Some(v) => {
                *v = volume;
                tracing::debug!(?cue, volume, "volume changed");
                Ok(())
            }
            None => Err(AudioError::Rejected {
                cue,
                reason: "not playing".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_placeholder() {
        let manifest = AssetManifest {
            base_dir: "/nonexistent".into(),
            ..AssetManifest::default()
        };
        let model = import_model(&manifest, ModelRole::Player);
        assert!(model.is_placeholder());
    }

    #[test]
    fn existing_file_is_imported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models/servidor.glb"), b"glTF").unwrap();
        let manifest = AssetManifest {
            base_dir: dir.path().to_string_lossy().into_owned(),
            ..AssetManifest::default()
        };
        let model = import_model(&manifest, ModelRole::Package);
        assert!(!model.is_placeholder());
        assert_eq!(model.name, "servidor");
        assert_eq!(model.scale, 0.18);
    }

    #[test]
    fn muted_sink_rejects_play() {
        let mut sink = ConsoleSink::new(true);
        assert!(matches!(
            sink.play(SoundCue::Ambient, 0.3),
            Err(AudioError::Unavailable)
        ));
        assert!(sink.set_volume(SoundCue::Ambient, 0.2).is_err());
    }

    #[test]
    fn sink_tracks_playing_sounds() {
        let mut sink = ConsoleSink::new(false);
        sink.play(SoundCue::Footsteps, 0.5).unwrap();
        sink.set_volume(SoundCue::Footsteps, 0.4).unwrap();
        assert_eq!(sink.playing().count(), 1);
        sink.stop(SoundCue::Footsteps).unwrap();
        assert_eq!(sink.playing().count(), 0);
    }
}
