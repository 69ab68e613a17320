use crate::projection::{HudFrame, ProximityBand};
use std::fmt::Write;

/// Turns a [`HudFrame`] into something a host can show.
///
/// Presenters only read the frame; game state is owned by the session.
pub trait Presenter {
    type Output;

    fn present(&self, frame: &HudFrame) -> Self::Output;
}

/// Plain-text HUD for terminals and logs.
#[derive(Debug, Default)]
pub struct TextPresenter {
    show_controls: bool,
}

impl TextPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controls(mut self, show: bool) -> Self {
        self.show_controls = show;
        self
    }
}

impl Presenter for TextPresenter {
    type Output = String;

    fn present(&self, frame: &HudFrame) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Tick {} ({:?}) ===", frame.tick, frame.state);
        let _ = writeln!(out, "Objective: {}", frame.objective);
        let _ = writeln!(out, "Server: {}", frame.package_status);

        if let Some(p) = &frame.proximity {
            let band = match p.band {
                ProximityBand::Near => "near",
                ProximityBand::Close => "close",
                ProximityBand::Far => "far",
            };
            let _ = writeln!(
                out,
                "Proximity: {:>3}% [{}] {}px",
                (p.value * 100.0).round() as u32,
                band,
                p.bar_px
            );
        }

        let m = &frame.minimap;
        let _ = write!(
            out,
            "Map: player=({:.1}, {:.1}) heading=({:.1}, {:.1})",
            m.player.x, m.player.y, m.heading.x, m.heading.y
        );
        if let Some(p) = m.pickup {
            let _ = write!(out, " pickup=({:.1}, {:.1})", p.x, p.y);
        }
        if let Some(d) = m.delivery {
            let _ = write!(out, " delivery=({:.1}, {:.1})", d.x, d.y);
        }
        out.push('\n');

        if let Some(text) = &frame.feedback {
            let _ = writeln!(out, ">> {text}");
        }
        if self.show_controls {
            for line in frame.controls.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        out
    }
}
