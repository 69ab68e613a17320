use crate::audio::{AmbientTrack, FadeStep};
use crate::camera::OrbitCamera;
use crate::collision::ObstacleSet;
use crate::mission::{GameState, Mission, Package, Player, Transition};
use crate::movement::{facing_from_camera, integrate, movement_step};
use crate::timers::{Scheduler, TimerKind};
use courier_assets::{AssetSlot, LoadedModel, ModelRole, SoundCue};
use courier_common::{MissionConfig, SessionId};
use courier_input::{Action, InputAggregator};
use glam::{Quat, Vec3};
use serde::Serialize;
use std::time::Duration;

pub const PICKUP_MESSAGE: &str = "Server picked up! Take it to repair";
pub const DELIVERY_MESSAGE: &str = "Mission complete! Server delivered for repair";

/// A record of every observable change a session makes.
///
/// Presenters (HUD, audio, logs) drain these instead of polling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MissionEvent {
    /// Movement input became active. Carries the clip to loop.
    WalkStarted { animation: String },
    WalkStopped,
    StateChanged { from: GameState, to: GameState },
    PackagePickedUp { at: Vec3 },
    PackageDelivered { at: Vec3 },
    SoundStarted { cue: SoundCue, volume: f32 },
    SoundStopped { cue: SoundCue },
    AmbientVolumeChanged { volume: f32 },
    FeedbackShown { text: String, duration_ms: u64 },
    FeedbackCleared,
    ParticleBurstStarted {
        origin: Vec3,
        capacity: u32,
        lifetime_ms: u64,
    },
    ParticleBurstEnded,
    AssetReady { role: ModelRole, placeholder: bool },
}

/// The whole mutable state of one pickup-and-deliver run.
///
/// Every mutation goes through a method here, and every observable change
/// is appended to the event log.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    config: MissionConfig,
    tick: u64,
    player: Player,
    package: Package,
    obstacles: ObstacleSet,
    mission: Mission,
    camera: OrbitCamera,
    input: InputAggregator,
    player_model: AssetSlot<LoadedModel>,
    package_model: AssetSlot<LoadedModel>,
    scheduler: Scheduler,
    ambient: AmbientTrack,
    feedback: Option<String>,
    walking: bool,
    particles: bool,
    event_log: Vec<MissionEvent>,
}

impl Session {
    pub fn new(config: MissionConfig) -> Self {
        let player = Player::new(config.player_spawn);
        let package = Package::resting_at(
            config.pickup_zone + Vec3::new(0.0, config.package_rest_lift, 0.0),
        );
        let obstacles = ObstacleSet::new(config.desk_boxes(), config.player_radius);
        let camera = OrbitCamera::new(&config.camera, player.position);
        let input = InputAggregator::new(config.camera.orbit_sensitivity);
        let ambient = AmbientTrack::new(config.audio.ambient_volume);
        let id = SessionId::new();
        tracing::info!(session = %id, obstacles = obstacles.len(), "session created");
        Self {
            id,
            config,
            tick: 0,
            player,
            package,
            obstacles,
            mission: Mission::new(),
            camera,
            input,
            player_model: AssetSlot::Pending,
            package_model: AssetSlot::Pending,
            scheduler: Scheduler::new(),
            ambient,
            feedback: None,
            walking: false,
            particles: false,
            event_log: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.mission.state()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// The transient message currently on screen.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    pub fn is_particle_burst_active(&self) -> bool {
        self.particles
    }

    pub fn ambient(&self) -> &AmbientTrack {
        &self.ambient
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn player_model(&self) -> &AssetSlot<LoadedModel> {
        &self.player_model
    }

    pub fn package_model(&self) -> &AssetSlot<LoadedModel> {
        &self.package_model
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[MissionEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<MissionEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Apply a key event by name, e.g. `"w"` or `"ArrowUp"`.
    pub fn handle_key(&mut self, name: &str, pressed: bool) {
        let action = self.input.set_key(name, pressed);
        self.start_ambient_on_first_gesture();
        if let Some(Action::Interact) = action {
            self.interact();
        }
    }

    pub fn handle_pointer_drag(&mut self, dx: f32, dy: f32) {
        let action = self.input.pointer_drag(dx, dy);
        self.start_ambient_on_first_gesture();
        if let Some(Action::Orbit { d_alpha, d_beta }) = action {
            self.camera.orbit(d_alpha, d_beta);
        }
    }

    pub fn handle_wheel(&mut self, delta: f32) {
        if let Some(Action::Zoom(delta)) = self.input.wheel(delta) {
            self.camera.zoom(delta);
        }
    }

    /// Release every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Try to pick up or deliver the package.
    ///
    /// Ignored while either the player or the package is still loading.
    pub fn interact(&mut self) -> Option<Transition> {
        if !self.player_model.is_ready() || !self.package_model.is_ready() {
            tracing::debug!("interact ignored while assets load");
            return None;
        }
        let from = self.mission.state();
        let transition =
            self.mission
                .interact(&mut self.player, &mut self.package, &self.config)?;
        let to = self.mission.state();
        tracing::info!(?from, ?to, tick = self.tick, "mission advanced");
        self.event_log.push(MissionEvent::StateChanged { from, to });

        match transition {
            Transition::PickedUp => {
                self.event_log.push(MissionEvent::PackagePickedUp {
                    at: self.package.position(),
                });
                self.play(SoundCue::Pickup, self.config.audio.pickup_volume);
                self.show_feedback(PICKUP_MESSAGE, self.config.timing.pickup_feedback_ms);
            }
            Transition::Delivered => {
                self.event_log.push(MissionEvent::PackageDelivered {
                    at: self.package.position(),
                });
                self.play(SoundCue::Success, self.config.audio.success_volume);
                self.start_particle_burst();
                if self.ambient.is_playing() {
                    self.scheduler.schedule_repeating(
                        TimerKind::AmbientFade,
                        Duration::from_millis(self.config.timing.fade_interval_ms),
                    );
                }
                self.show_feedback(DELIVERY_MESSAGE, self.config.timing.delivery_feedback_ms);
            }
        }
        Some(transition)
    }

    /// Advance the session by one frame of length `dt`.
    pub fn step(&mut self, dt: Duration) {
        let _span =
            tracing::info_span!("session_step", session = %self.id, tick = self.tick).entered();

        for kind in self.scheduler.advance(dt) {
            self.on_timer(kind);
        }

        self.camera.clamp();

        if self.package_model.is_ready() && !self.package.attached {
            let spin = Quat::from_rotation_y(self.config.package_spin);
            self.package.transform.rotation = spin * self.package.transform.rotation;
        }

        if self.player_model.is_ready() {
            self.camera.follow(self.player.position);
            self.player.yaw = facing_from_camera(self.player.position, self.camera.position());
            self.update_walk();

            let input = self.input.state();
            if let Some(step) = movement_step(&input, self.player.yaw, self.config.movement_speed)
            {
                let outcome =
                    integrate(self.player.position, step, &self.config.bounds, &self.obstacles);
                if outcome.blocked_x || outcome.blocked_z {
                    tracing::trace!(
                        blocked_x = outcome.blocked_x,
                        blocked_z = outcome.blocked_z,
                        "movement blocked"
                    );
                }
                self.player.position = outcome.position;
            }

            if self.package.attached {
                self.package.follow(&self.player, self.config.carry_offset);
            }
        }

        self.tick += 1;
    }

    /// The host finished importing the player model.
    pub fn on_player_loaded(&mut self, model: LoadedModel) {
        let placeholder = model.is_placeholder();
        if !self.player_model.fulfil(model) {
            tracing::warn!("player model reported twice, keeping the first");
            return;
        }
        self.camera.follow(self.player.position);
        self.event_log.push(MissionEvent::AssetReady {
            role: ModelRole::Player,
            placeholder,
        });
    }

    /// The host finished importing the package model. The package settles
    /// on the pickup zone at the height that suits its shape.
    pub fn on_package_loaded(&mut self, model: LoadedModel) {
        let placeholder = model.is_placeholder();
        if !self.package_model.fulfil(model) {
            tracing::warn!("package model reported twice, keeping the first");
            return;
        }
        let lift = if placeholder {
            self.config.placeholder_rest_lift
        } else {
            self.config.package_rest_lift
        };
        self.package = Package::resting_at(self.config.pickup_zone + Vec3::new(0.0, lift, 0.0));
        self.event_log.push(MissionEvent::AssetReady {
            role: ModelRole::Package,
            placeholder,
        });
    }

    /// The host's audio output refused a request for `cue`.
    ///
    /// A refused ambient track is treated as silent, so no fade is scheduled
    /// for it and a pending fade is cancelled. Other cues are one-shots or
    /// restart with walking, so nothing is kept for them.
    pub fn on_sound_rejected(&mut self, cue: SoundCue) {
        if cue != SoundCue::Ambient {
            tracing::debug!(?cue, "sound rejected by host");
            return;
        }
        if self.ambient.halt() {
            tracing::warn!("ambient track rejected by host, treating it as silent");
        }
        self.scheduler.cancel(TimerKind::AmbientFade);
    }

    /// Teleport the player, e.g. from a scripted scenario. The position is
    /// clamped to the world bounds; obstacles are not checked.
    pub fn place_player(&mut self, position: Vec3) {
        let bounds = &self.config.bounds;
        self.player.position = Vec3::new(
            bounds.clamp_x(position.x),
            position.y,
            bounds.clamp_z(position.z),
        );
        self.camera.follow(self.player.position);
        if self.package.attached {
            self.package.follow(&self.player, self.config.carry_offset);
        }
    }

    fn on_timer(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::Feedback => {
                self.feedback = None;
                self.event_log.push(MissionEvent::FeedbackCleared);
            }
            TimerKind::ParticleBurst => {
                self.particles = false;
                self.event_log.push(MissionEvent::ParticleBurstEnded);
            }
            TimerKind::AmbientFade => match self.ambient.fade(self.config.audio.fade_step) {
                FadeStep::Lowered(volume) => {
                    self.event_log
                        .push(MissionEvent::AmbientVolumeChanged { volume });
                }
                FadeStep::Stopped => {
                    self.scheduler.cancel(TimerKind::AmbientFade);
                    tracing::debug!("ambient track faded out");
                    self.event_log.push(MissionEvent::SoundStopped {
                        cue: SoundCue::Ambient,
                    });
                }
            },
        }
    }

    /// Walking needs a clip to play: a model without animations never
    /// starts the walk cycle or its footsteps.
    fn update_walk(&mut self) {
        let Some(animation) = self
            .player_model
            .get()
            .and_then(LoadedModel::walk_animation)
            .map(str::to_owned)
        else {
            return;
        };
        let moving = self.input.state().is_moving();
        if moving == self.walking {
            return;
        }
        self.walking = moving;
        if moving {
            self.event_log.push(MissionEvent::WalkStarted { animation });
            self.play(SoundCue::Footsteps, self.config.audio.footsteps_volume);
        } else {
            self.event_log.push(MissionEvent::WalkStopped);
            self.event_log.push(MissionEvent::SoundStopped {
                cue: SoundCue::Footsteps,
            });
        }
    }

    fn start_ambient_on_first_gesture(&mut self) {
        if self.input.take_first_gesture() && self.ambient.start() {
            self.play(SoundCue::Ambient, self.ambient.volume());
        }
    }

    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.event_log.push(MissionEvent::SoundStarted { cue, volume });
    }

    /// Replace the on-screen message. Any earlier expiry is cancelled so it
    /// cannot clear the new text early.
    fn show_feedback(&mut self, text: &str, duration_ms: u64) {
        self.feedback = Some(text.to_owned());
        self.scheduler
            .schedule(TimerKind::Feedback, Duration::from_millis(duration_ms));
        self.event_log.push(MissionEvent::FeedbackShown {
            text: text.to_owned(),
            duration_ms,
        });
    }

    fn start_particle_burst(&mut self) {
        let timing = &self.config.timing;
        let origin = self.config.delivery_zone + Vec3::new(0.0, timing.particle_lift, 0.0);
        let event = MissionEvent::ParticleBurstStarted {
            origin,
            capacity: timing.particle_capacity,
            lifetime_ms: timing.particle_burst_ms,
        };
        self.scheduler.schedule(
            TimerKind::ParticleBurst,
            Duration::from_millis(timing.particle_burst_ms),
        );
        self.particles = true;
        self.event_log.push(event);
    }
}
