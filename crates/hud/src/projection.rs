use courier_common::HudConfig;
use courier_kernel::{GameState, Session};
use glam::Vec3;
use serde::Serialize;

pub const CONTROLS_TEXT: &str = "W A S D · Move\nE · Interact\nMouse · Rotate camera";

pub fn objective_text(state: GameState) -> &'static str {
    match state {
        GameState::SeekingPackage => "Find and pick up the server",
        GameState::Delivering => "Take the server to repair",
        GameState::Completed => "Mission complete!",
    }
}

pub fn package_status(carrying: bool) -> &'static str {
    if carrying { "Yes, carrying" } else { "No, pending" }
}

/// Colour tier of the proximity bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProximityBand {
    Near,
    Close,
    Far,
}

impl ProximityBand {
    pub fn from_value(value: f32) -> Self {
        if value > 0.7 {
            Self::Near
        } else if value > 0.4 {
            Self::Close
        } else {
            Self::Far
        }
    }
}

/// `1` at the target, falling linearly to `0` at twice the interaction
/// radius and staying there beyond it.
pub fn proximity_value(distance: f32, radius: f32) -> f32 {
    (1.0 - distance / (radius * 2.0)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Proximity {
    pub value: f32,
    pub band: ProximityBand,
    /// Filled width of the bar in whole pixels.
    pub bar_px: u32,
}

impl Proximity {
    /// The indicator for a target `distance` away, or `None` when it should
    /// be hidden (at or beyond twice the radius).
    pub fn measure(distance: f32, radius: f32, bar_max_px: f32) -> Option<Self> {
        if distance >= radius * 2.0 {
            return None;
        }
        let value = proximity_value(distance, radius);
        Some(Self {
            value,
            band: ProximityBand::from_value(value),
            bar_px: (value * bar_max_px).floor() as u32,
        })
    }
}

/// Minimap coordinates in pixels, relative to the map centre. `y` grows
/// downward, so world +Z points up on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    pub fn project(world: Vec3, scale: f32) -> Self {
        Self {
            x: world.x * scale,
            y: -world.z * scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Minimap {
    pub scale: f32,
    pub player: MapPoint,
    /// Dot offset from the player marker in the facing direction.
    pub heading: MapPoint,
    /// Shown only while the package is still to be picked up.
    pub pickup: Option<MapPoint>,
    /// Shown only while the package is being carried.
    pub delivery: Option<MapPoint>,
}

/// Everything the HUD shows for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudFrame {
    pub tick: u64,
    pub state: GameState,
    pub objective: &'static str,
    pub package_status: &'static str,
    pub proximity: Option<Proximity>,
    pub minimap: Minimap,
    pub feedback: Option<String>,
    pub controls: &'static str,
}

impl HudFrame {
    /// Project the session into HUD values. Returns `None` until the player
    /// model is ready, since there is nothing to anchor the HUD to.
    pub fn project(session: &Session, hud: &HudConfig) -> Option<Self> {
        if !session.player_model().is_ready() {
            return None;
        }
        let config = session.config();
        let player = session.player();
        let state = session.state();

        let proximity = match state {
            GameState::SeekingPackage => Proximity::measure(
                player.position.distance(session.package().position()),
                config.pickup_distance,
                hud.proximity_bar_px,
            ),
            GameState::Delivering => Proximity::measure(
                player.position.distance(config.delivery_zone),
                config.delivery_distance,
                hud.proximity_bar_px,
            ),
            GameState::Completed => None,
        };

        let scale = hud.minimap_scale(&config.bounds);
        let at = MapPoint::project(player.position, scale);
        let heading = MapPoint {
            x: at.x - player.yaw.sin() * hud.heading_offset_px,
            y: at.y + player.yaw.cos() * hud.heading_offset_px,
        };
        let minimap = Minimap {
            scale,
            player: at,
            heading,
            pickup: (state == GameState::SeekingPackage)
                .then(|| MapPoint::project(config.pickup_zone, scale)),
            delivery: (state == GameState::Delivering)
                .then(|| MapPoint::project(config.delivery_zone, scale)),
        };

        Some(Self {
            tick: session.tick(),
            state,
            objective: objective_text(state),
            package_status: package_status(player.carrying),
            proximity,
            minimap,
            feedback: session.feedback().map(str::to_owned),
            controls: CONTROLS_TEXT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_assets::{LoadedModel, ModelRole};
    use courier_common::MissionConfig;

    fn ready_session() -> Session {
        let mut s = Session::new(MissionConfig::default());
        s.on_player_loaded(LoadedModel::placeholder(ModelRole::Player));
        s.on_package_loaded(LoadedModel::placeholder(ModelRole::Package));
        s
    }

    #[test]
    fn objective_per_state() {
        assert_eq!(
            objective_text(GameState::SeekingPackage),
            "Find and pick up the server"
        );
        assert_eq!(objective_text(GameState::Delivering), "Take the server to repair");
        assert_eq!(objective_text(GameState::Completed), "Mission complete!");
    }

    #[test]
    fn proximity_endpoints_and_monotonic() {
        assert_eq!(proximity_value(0.0, 3.0), 1.0);
        assert_eq!(proximity_value(6.0, 3.0), 0.0);
        assert_eq!(proximity_value(60.0, 3.0), 0.0);
        let mut last = 1.0;
        for i in 0..=600 {
            let v = proximity_value(i as f32 * 0.01, 3.0);
            assert!(v <= last);
            last = v;
        }
    }

    #[test]
    fn proximity_hidden_at_twice_radius() {
        assert_eq!(Proximity::measure(6.0, 3.0, 180.0), None);
        assert!(Proximity::measure(5.99, 3.0, 180.0).is_some());
    }

    #[test]
    fn bands_use_strict_thresholds() {
        assert_eq!(ProximityBand::from_value(0.71), ProximityBand::Near);
        assert_eq!(ProximityBand::from_value(0.7), ProximityBand::Close);
        assert_eq!(ProximityBand::from_value(0.41), ProximityBand::Close);
        assert_eq!(ProximityBand::from_value(0.4), ProximityBand::Far);
        assert_eq!(ProximityBand::from_value(0.0), ProximityBand::Far);
    }

    #[test]
    fn bar_width_is_floored() {
        let p = Proximity::measure(3.0, 3.0, 180.0).unwrap();
        assert_eq!(p.bar_px, 90);
        assert_eq!(p.band, ProximityBand::Close);
        let p = Proximity::measure(0.0, 5.0, 180.0).unwrap();
        assert_eq!(p.bar_px, 180);
    }

    #[test]
    fn map_inverts_z() {
        let scale = HudConfig::default().minimap_scale(&MissionConfig::default().bounds);
        assert!((scale - 300.0 / 46.0).abs() < 1e-5);
        let p = MapPoint::project(Vec3::new(2.0, 7.0, 10.0), scale);
        assert!((p.x - 2.0 * scale).abs() < 1e-5);
        assert!((p.y + 10.0 * scale).abs() < 1e-5);
    }

    #[test]
    fn nothing_to_show_while_player_loads() {
        let s = Session::new(MissionConfig::default());
        assert!(HudFrame::project(&s, &HudConfig::default()).is_none());
    }

    #[test]
    fn markers_follow_mission_state() {
        let mut s = ready_session();
        let hud = HudConfig::default();
        let frame = HudFrame::project(&s, &hud).unwrap();
        assert!(frame.minimap.pickup.is_some());
        assert!(frame.minimap.delivery.is_none());
        assert_eq!(frame.package_status, "No, pending");
        assert!(frame.proximity.is_none());
        assert_eq!(frame.controls, CONTROLS_TEXT);

        s.place_player(Vec3::new(14.0, 1.0, 15.0));
        let frame = HudFrame::project(&s, &hud).unwrap();
        assert!(frame.proximity.is_some());

        s.interact();
        let frame = HudFrame::project(&s, &hud).unwrap();
        assert!(frame.minimap.pickup.is_none());
        assert!(frame.minimap.delivery.is_some());
        assert_eq!(frame.package_status, "Yes, carrying");
        assert_eq!(frame.objective, "Take the server to repair");
        assert!(frame.feedback.is_some());
    }

    #[test]
    fn heading_dot_sits_behind_yaw_zero() {
        let s = ready_session();
        let hud = HudConfig::default();
        let frame = HudFrame::project(&s, &hud).unwrap();
        // Player yaw is zero before the first frame.
        assert!((frame.minimap.heading.x - frame.minimap.player.x).abs() < 1e-5);
        assert!((frame.minimap.heading.y - frame.minimap.player.y - 12.0).abs() < 1e-5);
    }
}
