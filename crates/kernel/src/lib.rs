//! Mission kernel: the authoritative state of one pickup-and-deliver run.
//!
//! # Invariants
//! - All state mutations flow through [`Session`] methods and land in its
//!   event log.
//! - The player never leaves the world bounds and never ends a frame inside
//!   a padded obstacle it was not already in.
//! - A frame with no input and no pending timers changes nothing but the
//!   tick counter and the idle package's spin.

pub mod audio;
pub mod camera;
pub mod collision;
pub mod forest;
pub mod mission;
pub mod movement;
pub mod session;
pub mod timers;

pub use audio::{AmbientTrack, AudioError, AudioSink, FadeStep, route_audio};
pub use camera::OrbitCamera;
pub use collision::ObstacleSet;
pub use forest::{FlightPath, FlightSample, ForestScene};
pub use mission::{GameState, Mission, Package, Player, Transition};
pub use session::{DELIVERY_MESSAGE, MissionEvent, PICKUP_MESSAGE, Session};
pub use timers::{Scheduler, TimerKind};

pub fn crate_info() -> &'static str {
    "courier-kernel v0.1.0"
}
