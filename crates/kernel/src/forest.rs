//! Haunted forest showcase: a bird circling above the trees with a light
//! following it.

use crate::camera::OrbitCamera;
use courier_assets::{AssetSlot, LoadedModel};
use courier_common::ForestConfig;
use glam::Vec3;
use serde::Serialize;
use std::f32::consts::FRAC_PI_2;

/// Where the bird and its light are after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightSample {
    pub position: Vec3,
    /// Heading tangent to the circle.
    pub yaw: f32,
    pub light_position: Vec3,
}

/// Circular flight with a vertical bob.
#[derive(Debug, Clone)]
pub struct FlightPath {
    angle: f32,
    step: f32,
    radius: f32,
    height: f32,
    bob_amplitude: f32,
    bob_frequency: f32,
    light_lift: f32,
}

impl FlightPath {
    pub fn new(config: &ForestConfig) -> Self {
        Self {
            angle: 0.0,
            step: config.angular_step * config.flight_speed,
            radius: config.flight_radius,
            height: config.flight_height,
            bob_amplitude: config.bob_amplitude,
            bob_frequency: config.bob_frequency,
            light_lift: config.light_lift,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self) -> FlightSample {
        self.angle += self.step;
        self.sample()
    }

    pub fn sample(&self) -> FlightSample {
        let a = self.angle;
        let position = Vec3::new(
            a.cos() * self.radius,
            self.height + (a * self.bob_frequency).sin() * self.bob_amplitude,
            a.sin() * self.radius,
        );
        FlightSample {
            position,
            yaw: -a + FRAC_PI_2,
            light_position: Vec3::new(position.x, self.height + self.light_lift, position.z),
        }
    }
}

/// The forest scene: one bird on a [`FlightPath`], viewed from a free
/// orbit camera.
#[derive(Debug)]
pub struct ForestScene {
    bird: AssetSlot<LoadedModel>,
    path: FlightPath,
    camera: OrbitCamera,
    animation_started: bool,
    ticks: u64,
}

impl ForestScene {
    pub fn new(config: &ForestConfig) -> Self {
        Self {
            bird: AssetSlot::Pending,
            path: FlightPath::new(config),
            camera: OrbitCamera::new(&config.camera, Vec3::ZERO),
            animation_started: false,
            ticks: 0,
        }
    }

    pub fn on_bird_loaded(&mut self, model: LoadedModel) {
        if !self.bird.fulfil(model) {
            tracing::warn!("bird model reported twice, keeping the first");
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame. The bird stays put until its model is ready, and
    /// for good when the import failed and nothing was substituted.
    pub fn tick(&mut self) -> Option<FlightSample> {
        self.ticks += 1;
        self.camera.clamp();
        let bird = self.bird.get().filter(|bird| !bird.is_placeholder())?;
        if !self.animation_started {
            self.animation_started = true;
            tracing::info!(
                clip = bird.animations.first().map(String::as_str),
                "bird animation started"
            );
        }
        Some(self.path.advance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_assets::{AssetError, MeshSet, ModelRole, resolve_model};

    fn bird() -> LoadedModel {
        let set = MeshSet {
            file: "terror_bird.glb".into(),
            meshes: vec!["body".into()],
            animations: vec!["Fly".into()],
        };
        resolve_model(ModelRole::Bird, 0.002, Ok(set))
    }

    #[test]
    fn pending_bird_does_not_move() {
        let mut scene = ForestScene::new(&ForestConfig::default());
        for _ in 0..5 {
            assert_eq!(scene.tick(), None);
        }
        assert_eq!(scene.path.angle(), 0.0);
        assert_eq!(scene.ticks(), 5);
    }

    #[test]
    fn ready_bird_circles() {
        let mut scene = ForestScene::new(&ForestConfig::default());
        scene.on_bird_loaded(bird());
        let first = scene.tick().unwrap();
        assert!((scene.path.angle() - 0.005).abs() < 1e-7);
        assert!((first.position.x - 0.005f32.cos() * 8.0).abs() < 1e-5);
        assert!((first.yaw - (FRAC_PI_2 - 0.005)).abs() < 1e-6);
    }

    #[test]
    fn failed_bird_import_never_flies() {
        let mut scene = ForestScene::new(&ForestConfig::default());
        scene.on_bird_loaded(resolve_model(
            ModelRole::Bird,
            0.002,
            Err(AssetError::LoadFailed {
                file: "terror_bird.glb".into(),
                reason: "404".into(),
            }),
        ));
        for _ in 0..10 {
            assert_eq!(scene.tick(), None);
        }
        assert_eq!(scene.path.angle(), 0.0);
        assert!(!scene.animation_started);
    }

    #[test]
    fn sample_stays_on_the_circle() {
        let mut path = FlightPath::new(&ForestConfig::default());
        for _ in 0..2000 {
            let s = path.advance();
            let r = Vec3::new(s.position.x, 0.0, s.position.z).length();
            assert!((r - 8.0).abs() < 1e-3);
            assert!(s.position.y >= 2.5 - 1e-5 && s.position.y <= 3.5 + 1e-5);
            assert_eq!(s.light_position.y, 5.0);
            assert_eq!(s.light_position.x, s.position.x);
        }
    }

    #[test]
    fn camera_limits_are_wide() {
        let mut scene = ForestScene::new(&ForestConfig::default());
        scene.camera_mut().zoom(-1000.0);
        scene.tick();
        assert_eq!(scene.camera().radius, 50.0);
    }
}
