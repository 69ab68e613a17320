//! Audio routing.
//!
//! The session only records which sounds should start or stop. A host
//! implements [`AudioSink`] and feeds it the event log with [`route_audio`].

use crate::session::MissionEvent;
use courier_assets::SoundCue;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("{cue:?} rejected: {reason}")]
    Rejected { cue: SoundCue, reason: String },
    #[error("audio output unavailable")]
    Unavailable,
}

/// Something that can actually make noise.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;
    fn stop(&mut self, cue: SoundCue) -> Result<(), AudioError>;
    fn set_volume(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError>;
}

/// Forward every sound-related event to `sink`.
///
/// A rejected request is logged and dropped. It is not retried, and the
/// remaining events are still delivered. Returns the cue of every failed
/// request, in order, so the host can report them back with
/// [`Session::on_sound_rejected`](crate::Session::on_sound_rejected).
pub fn route_audio(events: &[MissionEvent], sink: &mut impl AudioSink) -> Vec<SoundCue> {
    let mut rejected = Vec::new();
    for event in events {
        let (cue, result) = match event {
            MissionEvent::SoundStarted { cue, volume } => (*cue, sink.play(*cue, *volume)),
            MissionEvent::SoundStopped { cue } => (*cue, sink.stop(*cue)),
            MissionEvent::AmbientVolumeChanged { volume } => (
                SoundCue::Ambient,
                sink.set_volume(SoundCue::Ambient, *volume),
            ),
            _ => continue,
        };
        if let Err(err) = result {
            tracing::warn!(%err, "audio request failed");
            rejected.push(cue);
        }
    }
    rejected
}

/// Outcome of one fade tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    Lowered(f32),
    Stopped,
}

/// The looping background track and its fade-out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientTrack {
    volume: f32,
    playing: bool,
}

impl AmbientTrack {
    pub fn new(volume: f32) -> Self {
        Self {
            volume,
            playing: false,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start the track. Returns false if it was already playing.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.playing, true)
    }

    /// Mark the track silent without fading. Returns whether it was playing.
    pub fn halt(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }

    /// Lower the volume by `step` while it is still above `step`;
    /// otherwise stop the track.
    pub fn fade(&mut self, step: f32) -> FadeStep {
        if self.playing && self.volume > step {
            self.volume -= step;
            FadeStep::Lowered(self.volume)
        } else {
            self.playing = false;
            FadeStep::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        refuse: Option<SoundCue>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
            if self.refuse == Some(cue) {
                return Err(AudioError::Rejected {
                    cue,
                    reason: "autoplay blocked".into(),
                });
            }
            self.calls.push(format!("play {cue:?} {volume}"));
            Ok(())
        }

        fn stop(&mut self, cue: SoundCue) -> Result<(), AudioError> {
            self.calls.push(format!("stop {cue:?}"));
            Ok(())
        }

        fn set_volume(&mut self, cue: SoundCue, volume: f32) -> Result<(), AudioError> {
            self.calls.push(format!("volume {cue:?} {volume}"));
            Ok(())
        }
    }

    #[test]
    fn routes_only_sound_events() {
        let events = vec![
            MissionEvent::FeedbackCleared,
            MissionEvent::SoundStarted {
                cue: SoundCue::Pickup,
                volume: 0.5,
            },
            MissionEvent::WalkStopped,
            MissionEvent::SoundStopped {
                cue: SoundCue::Footsteps,
            },
            MissionEvent::AmbientVolumeChanged { volume: 0.25 },
        ];
        let mut sink = Recorder::default();
        assert!(route_audio(&events, &mut sink).is_empty());
        assert_eq!(
            sink.calls,
            vec!["play Pickup 0.5", "stop Footsteps", "volume Ambient 0.25"]
        );
    }

    #[test]
    fn rejection_is_reported_and_not_retried() {
        let events = vec![
            MissionEvent::SoundStarted {
                cue: SoundCue::Ambient,
                volume: 0.3,
            },
            MissionEvent::SoundStarted {
                cue: SoundCue::Success,
                volume: 0.7,
            },
        ];
        let mut sink = Recorder {
            refuse: Some(SoundCue::Ambient),
            ..Recorder::default()
        };
        assert_eq!(route_audio(&events, &mut sink), vec![SoundCue::Ambient]);
        assert_eq!(sink.calls, vec!["play Success 0.7"]);
    }

    #[test]
    fn start_is_idempotent() {
        let mut track = AmbientTrack::new(0.3);
        assert!(track.start());
        assert!(!track.start());
        assert!(track.is_playing());
    }

    #[test]
    fn fade_lowers_then_stops() {
        let mut track = AmbientTrack::new(0.3);
        track.start();
        let mut lowered = 0;
        loop {
            match track.fade(0.05) {
                FadeStep::Lowered(v) => {
                    assert!(v > 0.0);
                    lowered += 1;
                }
                FadeStep::Stopped => break,
            }
            assert!(lowered < 10, "fade never finished");
        }
        assert!((5..=6).contains(&lowered));
        assert!(!track.is_playing());
    }

    #[test]
    fn halted_track_reports_previous_state() {
        let mut track = AmbientTrack::new(0.3);
        assert!(!track.halt());
        track.start();
        assert!(track.halt());
        assert!(!track.is_playing());
        assert_eq!(track.volume(), 0.3);
    }

    #[test]
    fn fading_a_silent_track_stops_immediately() {
        let mut track = AmbientTrack::new(0.3);
        assert_eq!(track.fade(0.05), FadeStep::Stopped);
    }
}
