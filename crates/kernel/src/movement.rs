//! Movement Integrator.
//!
//! The player's facing is not integrated from input. It is recomputed every
//! frame so the player looks straight away from the orbit camera, and that
//! facing is the basis the movement keys are expressed in: orbiting the
//! camera steers the player.

use crate::collision::ObstacleSet;
use courier_common::WorldBounds;
use courier_input::InputState;
use glam::{Vec2, Vec3};

/// Yaw that points the player directly away from the camera.
pub fn facing_from_camera(player: Vec3, camera: Vec3) -> f32 {
    let to_camera = camera - player;
    to_camera.x.atan2(to_camera.z)
}

/// Ground-plane direction the player faces for a given yaw.
pub fn forward_from_yaw(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.sin(), -yaw.cos())
}

/// Ground-plane direction to the player's right for a given yaw.
pub fn right_from_yaw(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.cos(), yaw.sin())
}

/// World-space displacement for one tick, or `None` when no key is held.
///
/// The `(lateral, forward)` intent is rotated into the yaw basis, then
/// normalised, so diagonal movement is no faster than straight movement.
pub fn movement_step(input: &InputState, yaw: f32, speed: f32) -> Option<Vec2> {
    let intent = input.axis();
    if intent == Vec2::ZERO {
        return None;
    }
    let world = right_from_yaw(yaw) * intent.x + forward_from_yaw(yaw) * intent.y;
    Some(world.normalize_or_zero() * speed)
}

/// Result of one collision-gated movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub position: Vec3,
    pub blocked_x: bool,
    pub blocked_z: bool,
}

/// Apply `step` to `position`, clamped to `bounds` and gated per axis.
///
/// X and Z are tested independently against the obstacles, each from the
/// current position, and only the axes that pass are applied. Pushing
/// diagonally into a wall therefore slides along it.
pub fn integrate(
    position: Vec3,
    step: Vec2,
    bounds: &WorldBounds,
    obstacles: &ObstacleSet,
) -> MoveOutcome {
    let next_x = bounds.clamp_x(position.x + step.x);
    let next_z = bounds.clamp_z(position.z + step.y);

    let blocked_x = obstacles.collides(next_x, position.z);
    let blocked_z = obstacles.collides(position.x, next_z);

    let mut out = position;
    if !blocked_x {
        out.x = next_x;
    }
    if !blocked_z {
        out.z = next_z;
    }
    MoveOutcome {
        position: out,
        blocked_x,
        blocked_z,
    }
}
