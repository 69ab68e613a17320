use courier_common::SessionId;
use courier_kernel::{GameState, MissionEvent, Session};
use serde::Serialize;
use std::collections::BTreeMap;

/// Session inspector for developer tooling.
///
/// Read-only queries against a session for debugging and scripted runs.
pub struct SessionInspector;

impl SessionInspector {
    /// Produce a summary of the session state.
    pub fn summary(session: &Session) -> SessionSummary {
        let p = session.player().position;
        let q = session.package().position();
        SessionSummary {
            id: session.id(),
            tick: session.tick(),
            state: session.state(),
            player_position: [p.x, p.y, p.z],
            yaw_degrees: session.player().yaw.to_degrees(),
            carrying: session.player().carrying,
            package_position: [q.x, q.y, q.z],
            walking: session.is_walking(),
            feedback: session.feedback().map(str::to_owned),
            pending_events: session.events().len(),
        }
    }

    /// Padded obstacle footprints as the collision filter sees them.
    pub fn obstacles(session: &Session) -> Vec<ObstacleInfo> {
        let radius = session.obstacles().player_radius();
        session
            .obstacles()
            .boxes()
            .iter()
            .map(|b| {
                let padded = b.expanded_xz(radius);
                ObstacleInfo {
                    min_xz: [padded.min.x, padded.min.z],
                    max_xz: [padded.max.x, padded.max.z],
                }
            })
            .collect()
    }

    /// Count events by variant name.
    pub fn tally(events: &[MissionEvent]) -> EventTally {
        let mut counts = BTreeMap::new();
        for event in events {
            *counts.entry(event_name(event)).or_insert(0) += 1;
        }
        EventTally { counts }
    }
}

fn event_name(event: &MissionEvent) -> &'static str {
    match event {
        MissionEvent::WalkStarted { .. } => "walk_started",
        MissionEvent::WalkStopped => "walk_stopped",
        MissionEvent::StateChanged { .. } => "state_changed",
        MissionEvent::PackagePickedUp { .. } => "package_picked_up",
        MissionEvent::PackageDelivered { .. } => "package_delivered",
        MissionEvent::SoundStarted { .. } => "sound_started",
        MissionEvent::SoundStopped { .. } => "sound_stopped",
        MissionEvent::AmbientVolumeChanged { .. } => "ambient_volume_changed",
        MissionEvent::FeedbackShown { .. } => "feedback_shown",
        MissionEvent::FeedbackCleared => "feedback_cleared",
        MissionEvent::ParticleBurstStarted { .. } => "particle_burst_started",
        MissionEvent::ParticleBurstEnded => "particle_burst_ended",
        MissionEvent::AssetReady { .. } => "asset_ready",
    }
}

/// Summary of session state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub tick: u64,
    pub state: GameState,
    pub player_position: [f32; 3],
    pub yaw_degrees: f32,
    pub carrying: bool,
    pub package_position: [f32; 3],
    pub walking: bool,
    pub feedback: Option<String>,
    pub pending_events: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [px, py, pz] = self.player_position;
        let [kx, ky, kz] = self.package_position;
        write!(
            f,
            "Session [{}]: tick={} state={:?} player=({:.2}, {:.2}, {:.2}) yaw={:.1} \
             carrying={} package=({:.2}, {:.2}, {:.2}) walking={} pending_events={}",
            self.id,
            self.tick,
            self.state,
            px,
            py,
            pz,
            self.yaw_degrees,
            self.carrying,
            kx,
            ky,
            kz,
            self.walking,
            self.pending_events
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleInfo {
    pub min_xz: [f32; 2],
    pub max_xz: [f32; 2],
}

/// Event counts keyed by variant name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventTally {
    pub counts: BTreeMap<&'static str, usize>,
}

impl EventTally {
    pub fn get(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

impl std::fmt::Display for EventTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .counts
            .iter()
            .map(|(name, n)| format!("{name}={n}"))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_assets::{LoadedModel, ModelRole};
    use courier_common::MissionConfig;
    use glam::Vec3;
    use std::time::Duration;

    fn ready_session() -> Session {
        let mut s = Session::new(MissionConfig::default());
        s.on_player_loaded(LoadedModel::placeholder(ModelRole::Player));
        s.on_package_loaded(LoadedModel::placeholder(ModelRole::Package));
        s
    }

    #[test]
    fn summary_fresh_session() {
        let s = Session::new(MissionConfig::default());
        let summary = SessionInspector::summary(&s);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.state, GameState::SeekingPackage);
        assert_eq!(summary.player_position, [0.0, 1.0, 0.0]);
        assert!(!summary.carrying);
        assert_eq!(summary.pending_events, 0);
    }

    #[test]
    fn summary_tracks_pickup() {
        let mut s = ready_session();
        s.place_player(Vec3::new(15.0, 1.0, 15.0));
        s.interact();
        s.step(Duration::from_millis(16));
        let summary = SessionInspector::summary(&s);
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.state, GameState::Delivering);
        assert!(summary.carrying);
        assert!(summary.feedback.is_some());
    }

    #[test]
    fn summary_display_and_json() {
        let s = Session::new(MissionConfig::default());
        let summary = SessionInspector::summary(&s);
        let text = format!("{summary}");
        assert!(text.contains("tick=0"));
        assert!(text.contains("state=SeekingPackage"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["state"], "SeekingPackage");
    }

    #[test]
    fn obstacles_are_padded() {
        let s = Session::new(MissionConfig::default());
        let boxes = SessionInspector::obstacles(&s);
        assert_eq!(boxes.len(), 6);
        // Desk at x=5 is 2.4 wide, padded by 0.5 on each side.
        let first = boxes[0];
        assert!((first.max_xz[0] - first.min_xz[0] - 3.4).abs() < 1e-5);
    }

    #[test]
    fn tally_counts_variants() {
        let mut s = ready_session();
        s.place_player(Vec3::new(15.0, 1.0, 15.0));
        s.interact();
        for _ in 0..3 {
            s.step(Duration::from_millis(16));
        }
        let tally = SessionInspector::tally(s.events());
        assert_eq!(tally.get("asset_ready"), 2);
        assert_eq!(tally.get("package_picked_up"), 1);
        assert_eq!(tally.get("package_delivered"), 0);
        assert!(format!("{tally}").contains("asset_ready=2"));
    }
}
