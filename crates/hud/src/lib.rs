//! HUD projection: a pure read of the session into display values.
//!
//! # Invariants
//! - Projection never mutates the session.
//! - Proximity is hidden at or beyond twice the active interaction radius.

mod presenter;
mod projection;

pub use presenter::{Presenter, TextPresenter};
pub use projection::{
    CONTROLS_TEXT, HudFrame, MapPoint, Minimap, Proximity, ProximityBand, objective_text,
    package_status, proximity_value,
};

pub fn crate_info() -> &'static str {
    "courier-hud v0.1.0"
}
