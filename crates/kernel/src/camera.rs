use courier_common::CameraConfig;
use glam::Vec3;

/// Arc-rotate camera orbiting a target point.
///
/// `alpha` is the horizontal angle and `beta` the angle down from the
/// vertical, both in radians. The camera sits `radius` away from `target`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    min_radius: f32,
    max_radius: f32,
    min_beta: f32,
    max_beta: f32,
    zoom_per_unit: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig, target: Vec3) -> Self {
        Self {
            alpha: config.alpha_deg.to_radians(),
            beta: config.beta_deg.to_radians(),
            radius: config.radius,
            target,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            min_beta: config.min_beta_deg.to_radians(),
            max_beta: config.max_beta_deg.to_radians(),
            zoom_per_unit: config.zoom_per_unit,
        }
    }

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target
            + Vec3::new(
                self.radius * cos_a * sin_b,
                self.radius * cos_b,
                self.radius * sin_a * sin_b,
            )
    }

    pub fn orbit(&mut self, d_alpha: f32, d_beta: f32) {
        self.alpha += d_alpha;
        self.beta += d_beta;
    }

    /// Move the camera closer for positive `delta`, proportionally to the
    /// current radius.
    pub fn zoom(&mut self, delta: f32) {
        self.radius -= delta * self.zoom_per_unit * self.radius;
    }

    /// Pull radius and vertical angle back inside their limits.
    /// Never panics, even for NaN or inverted limits.
    pub fn clamp(&mut self) {
        self.radius = self.radius.max(self.min_radius).min(self.max_radius);
        self.beta = self.beta.max(self.min_beta).min(self.max_beta);
    }

    pub fn follow(&mut self, target: Vec3) {
        self.target = target;
    }
}
