//! Mission State Machine.
//!
//! # Invariants
//! - The mission starts in `SeekingPackage`; `Completed` is absorbing.
//! - The package is attached exactly while the state is `Delivering`.
//! - At most one pickup and one delivery happen per session.

use courier_common::{MissionConfig, Transform};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Progress of the pickup-and-deliver run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    SeekingPackage,
    Delivering,
    Completed,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self == Self::Completed
    }
}

/// The controllable character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Player {
    pub position: Vec3,
    /// Derived every frame from the camera; never integrated from input.
    pub yaw: f32,
    pub carrying: bool,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            carrying: false,
        }
    }

    /// Map an offset in the player's frame (x right, y up, z forward) to
    /// world space.
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + self.rotation() * offset
    }

    /// Rotation taking local +Z to the facing direction and local +X to the
    /// player's right.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw + PI)
    }
}

/// The single package carried from the pickup zone to the delivery zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Package {
    pub transform: Transform,
    pub attached: bool,
}

impl Package {
    pub fn resting_at(position: Vec3) -> Self {
        Self {
            transform: Transform::at(position),
            attached: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Re-pin an attached package to its carry offset.
    pub fn follow(&mut self, player: &Player, carry_offset: Vec3) {
        debug_assert!(self.attached);
        self.transform.position = player.local_to_world(carry_offset);
        self.transform.rotation = player.rotation();
    }
}

/// A state change produced by a successful interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    PickedUp,
    Delivered,
}

/// Owns the [`GameState`] and applies interaction rules to it.
#[derive(Debug, Clone, Default)]
pub struct Mission {
    state: GameState,
}

impl Mission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Attempt a pickup or delivery.
    ///
    /// Returns the transition when the preconditions hold. Otherwise nothing
    /// changes and `None` comes back; that is not an error.
    pub fn interact(
        &mut self,
        player: &mut Player,
        package: &mut Package,
        config: &MissionConfig,
    ) -> Option<Transition> {
        match self.state {
            GameState::SeekingPackage => {
                if package.attached {
                    return None;
                }
                let distance = player.position.distance(package.position());
                if distance > config.pickup_distance {
                    tracing::trace!(distance, "pickup out of range");
                    return None;
                }
                package.attached = true;
                package.transform.rotation = Quat::IDENTITY;
                player.carrying = true;
                package.follow(player, config.carry_offset);
                self.state = GameState::Delivering;
                Some(Transition::PickedUp)
            }
            GameState::Delivering => {
                let distance = player.position.distance(config.delivery_zone);
                if distance > config.delivery_distance {
                    tracing::trace!(distance, "delivery out of range");
                    return None;
                }
                package.attached = false;
                player.carrying = false;
                package.transform.rotation = Quat::IDENTITY;
                package.transform.position =
                    config.delivery_zone + Vec3::new(0.0, config.delivered_lift, 0.0);
                self.state = GameState::Completed;
                Some(Transition::Delivered)
            }
            GameState::Completed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Mission, Player, Package, MissionConfig) {
        let config = MissionConfig::default();
        let player = Player::new(Vec3::new(0.0, 1.0, 0.0));
        let package = Package::resting_at(Vec3::new(16.0, 1.0, 16.0));
        (Mission::new(), player, package, config)
    }

    #[test]
    fn starts_seeking() {
        assert_eq!(Mission::new().state(), GameState::SeekingPackage);
        assert!(!GameState::SeekingPackage.is_terminal());
    }

    #[test]
    fn pickup_out_of_range_is_noop() {
        let (mut mission, mut player, mut package, config) = setup();
        player.position = Vec3::new(12.0, 1.0, 16.0);
        assert_eq!(mission.interact(&mut player, &mut package, &config), None);
        assert_eq!(mission.state(), GameState::SeekingPackage);
        assert!(!package.attached);
        assert!(!player.carrying);
    }

    #[test]
    fn pickup_at_exact_distance_succeeds() {
        let (mut mission, mut player, mut package, config) = setup();
        player.position = Vec3::new(13.0, 1.0, 16.0);
        assert_eq!(
            mission.interact(&mut player, &mut package, &config),
            Some(Transition::PickedUp)
        );
        assert_eq!(mission.state(), GameState::Delivering);
        assert!(package.attached && player.carrying);
    }

    #[test]
    fn pickup_resets_rotation_and_pins_offset() {
        let (mut mission, mut player, mut package, config) = setup();
        package.transform.rotation = Quat::from_rotation_y(1.3);
        player.position = Vec3::new(15.0, 1.0, 15.0);
        mission.interact(&mut player, &mut package, &config);
        assert!((package.position() - player.local_to_world(config.carry_offset)).length() < 1e-6);
        assert!((package.position().y - 2.2).abs() < 1e-6);
        assert_eq!(package.transform.rotation, player.rotation());
    }

    #[test]
    fn delivery_requires_range() {
        let (mut mission, mut player, mut package, config) = setup();
        player.position = Vec3::new(15.0, 1.0, 15.0);
        mission.interact(&mut player, &mut package, &config);

        player.position = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(mission.interact(&mut player, &mut package, &config), None);
        assert_eq!(mission.state(), GameState::Delivering);
        assert!(package.attached);

        player.position = Vec3::new(-16.0, 1.0, -18.0);
        assert_eq!(
            mission.interact(&mut player, &mut package, &config),
            Some(Transition::Delivered)
        );
        assert_eq!(mission.state(), GameState::Completed);
        assert!(!package.attached && !player.carrying);
        assert!((package.position() - Vec3::new(-16.0, 1.6, -18.0)).length() < 1e-5);
    }

    #[test]
    fn completed_is_absorbing() {
        let (mut mission, mut player, mut package, config) = setup();
        player.position = Vec3::new(15.0, 1.0, 15.0);
        mission.interact(&mut player, &mut package, &config);
        player.position = config.delivery_zone;
        mission.interact(&mut player, &mut package, &config);

        for pos in [config.delivery_zone, config.pickup_zone, Vec3::ZERO] {
            player.position = pos;
            assert_eq!(mission.interact(&mut player, &mut package, &config), None);
            assert_eq!(mission.state(), GameState::Completed);
        }
    }

    #[test]
    fn local_to_world_uses_facing() {
        use crate::movement::{forward_from_yaw, right_from_yaw};

        let mut player = Player::new(Vec3::new(1.0, 1.0, 1.0));
        // Forward is -Z at yaw 0.
        let p = player.local_to_world(Vec3::new(0.0, 1.0, 2.0));
        assert!((p - Vec3::new(1.0, 2.0, -1.0)).length() < 1e-5);

        for yaw in [0.4, -1.9, 3.0] {
            player.yaw = yaw;
            let fwd = forward_from_yaw(yaw);
            let right = right_from_yaw(yaw);
            let p = player.local_to_world(Vec3::new(1.0, 0.0, 1.0)) - player.position;
            assert!((p.x - (fwd.x + right.x)).abs() < 1e-5);
            assert!((p.z - (fwd.y + right.y)).abs() < 1e-5);
        }
    }
}
