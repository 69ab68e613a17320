//! Developer tooling: read-only session inspection.
//!
//! # Invariants
//! - Tools never mutate the session they inspect.

mod inspector;

pub use inspector::{EventTally, ObstacleInfo, SessionInspector, SessionSummary};

pub fn crate_info() -> &'static str {
    "courier-tools v0.1.0"
}
