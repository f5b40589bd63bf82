//! Navigation state machine.
//!
//! Owns the camera and the lateral intent, folds every input channel into
//! them, and integrates one step per rendered frame from `tick`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::config::NavigationConfig;
use crate::error::Result;
use crate::gallery::{Exhibit, Gallery, LateralBounds};
use crate::math::approach;
use crate::traits::{InteractionEvent, OrbitPrimitive};

use super::context_guard::{ContextEvent, ContextLossGuard, ContextSignal, RenderStatus};
use super::input::{Direction, InputEvent, InputNormalizer, Normalized, OrbitInput};
use super::orbit::OrbitControls;
use super::press::PressDriver;
use super::timer::{Countdown, Throttled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavState {
    Idle,
    UserRotating,
    AutoScrolling,
    JoystickActive,
}

/// Discrete navigation requests from buttons, lists and shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum NavCommand {
    Step { direction: Direction },
    Home,
    Jump { index: usize },
}

/// What the user is currently asking the camera to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationIntent {
    pub target_lateral: f32,
    /// x = azimuth, y = polar; decays once the stick is released
    pub joystick_rotation: Vec2,
    pub is_scrolling: bool,
    pub is_user_rotating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Context lost; nothing was integrated
    Suspended,
    /// Camera did not change this frame
    Settled,
    Moved,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationStats {
    pub frames: u64,
    pub moves: u64,
    pub dropped_commands: u64,
}

pub struct NavigationController<O: OrbitPrimitive = OrbitControls> {
    config: NavigationConfig,
    gallery: Gallery,
    normalizer: InputNormalizer,
    orbit: O,
    camera: CameraState,
    intent: NavigationIntent,
    /// Stick vector while the joystick is held; re-asserted every frame
    held_joystick: Option<Vec2>,
    scroll_debounce: Countdown,
    press: PressDriver,
    command_throttle: Throttled,
    guard: ContextLossGuard,
    signal: Option<ContextSignal>,
    state: NavState,
    stats: NavigationStats,
}

impl NavigationController<OrbitControls> {
    /// Controller with the default orbit primitive
    pub fn new(config: NavigationConfig, exhibits: &[Exhibit]) -> Result<Self> {
        let orbit = OrbitControls::new(&config);
        Self::with_orbit(config, exhibits, orbit)
    }
}

impl<O: OrbitPrimitive> NavigationController<O> {
    pub fn with_orbit(config: NavigationConfig, exhibits: &[Exhibit], orbit: O) -> Result<Self> {
        config.validate()?;
        let gallery = Gallery::new(exhibits, config.spacing, config.edge_margin)?;

        let camera = CameraState::new(config.home_position, config.home_look_at);
        let target_lateral = gallery.bounds().clamp(config.home_position.x);

        log::info!(
            "navigation ready: {} exhibits, lateral range [{}, {}]",
            gallery.len(),
            gallery.bounds().min,
            gallery.bounds().max
        );

        Ok(Self {
            normalizer: InputNormalizer::new(&config),
            scroll_debounce: Countdown::new(config.move_debounce),
            press: PressDriver::new(config.press_interval),
            command_throttle: Throttled::new(config.min_command_interval),
            gallery,
            orbit,
            camera,
            intent: NavigationIntent {
                target_lateral,
                joystick_rotation: Vec2::ZERO,
                is_scrolling: false,
                is_user_rotating: false,
            },
            held_joystick: None,
            guard: ContextLossGuard::new(),
            signal: None,
            state: NavState::Idle,
            stats: NavigationStats::default(),
            config,
        })
    }

    // === Input ===

    /// Fold one raw event into the intent. The returned value tells the host
    /// whether to suppress the event's default action.
    pub fn handle_input(&mut self, event: &InputEvent) -> Normalized {
        let normalized = self.normalizer.normalize(event);

        // Releases still go through while paused so nothing stays held
        let is_release = matches!(
            normalized,
            Normalized::RotationRelease
                | Normalized::StopMoving(_)
                | Normalized::Orbit(OrbitInput::DragEnd)
        );
        if self.guard.is_suspended() && !is_release {
            log::trace!("input ignored while paused: {:?}", event);
            return Normalized::Ignored;
        }

        match normalized {
            Normalized::Lateral { delta, debounce } => {
                self.shift_target(delta);
                self.mark_scrolling(debounce);
            }
            Normalized::Rotation(vector) => {
                self.held_joystick = Some(vector);
                self.intent.joystick_rotation = vector;
                self.mark_scrolling(self.config.move_debounce);
            }
            Normalized::RotationRelease => {
                self.held_joystick = None;
            }
            Normalized::Orbit(input) => {
                if let Some(interaction) = self.orbit.handle_input(input) {
                    self.on_interaction(interaction);
                }
            }
            Normalized::StartMoving(direction) => {
                self.start_moving(direction);
            }
            Normalized::StopMoving(cause) => {
                if self.stop_moving() {
                    log::debug!("continuous move stopped by {:?}", cause);
                }
            }
            Normalized::Home => {
                self.command(NavCommand::Home);
            }
            Normalized::Jump(index) => {
                self.command(NavCommand::Jump { index });
            }
            Normalized::Ignored => {}
        }

        normalized
    }

    fn on_interaction(&mut self, interaction: InteractionEvent) {
        match interaction {
            InteractionEvent::Start => {
                self.intent.is_user_rotating = true;
                log::debug!("orbit interaction started");
            }
            // Inertia may keep rotating; `tick` reads the orbit's own flag
            InteractionEvent::End => log::debug!("orbit interaction ended"),
        }
    }

    /// Run a discrete command unless it arrives too soon after the last one
    pub fn command(&mut self, command: NavCommand) -> bool {
        if self.guard.is_suspended() {
            return false;
        }
        if !self.command_throttle.try_fire() {
            self.stats.dropped_commands += 1;
            log::debug!("dropped duplicate command {:?}", command);
            return false;
        }

        match command {
            NavCommand::Step { direction } => self.move_by(direction),
            NavCommand::Home => self.reset_to_home(),
            NavCommand::Jump { index } => self.jump_to(index).is_some(),
        }
    }

    // === Programmatic motion ===

    /// Step one `move_step` along the walk axis, nudging the camera part of
    /// the way at once and leaving the rest to the per-frame blend
    pub fn move_by(&mut self, direction: Direction) -> bool {
        if self.guard.is_suspended() {
            log::debug!("move ignored while paused");
            return false;
        }

        self.shift_target(direction.sign() * self.config.move_step);
        let remaining = self.intent.target_lateral - self.camera.lateral();
        self.camera.shift_lateral(remaining * self.config.nudge_fraction);
        self.mark_scrolling(self.config.move_debounce);
        self.stats.moves += 1;
        true
    }

    /// Snap straight back to the home view, cancelling everything in flight
    pub fn reset_to_home(&mut self) -> bool {
        if self.guard.is_suspended() {
            return false;
        }

        self.cancel_motion();
        self.intent.target_lateral = self.home_lateral();
        self.camera = CameraState::new(self.config.home_position, self.config.home_look_at);
        self.set_state(NavState::Idle);
        true
    }

    /// Snap in front of focal target `index`; out-of-range indices are
    /// clamped. Returns the index actually used.
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        if self.guard.is_suspended() {
            return None;
        }

        let clamped = self.gallery.clamp_index(index);
        if clamped != index {
            log::debug!("jump index {} clamped to {}", index, clamped);
        }
        let lateral = self.gallery.target(clamped).lateral;
        let anchor = Vec3::new(lateral, 0.0, 0.0);

        self.cancel_motion();
        self.intent.target_lateral = self.gallery.bounds().clamp(lateral);
        self.camera = CameraState::new(
            anchor + self.config.focus_eye_offset,
            anchor + self.config.focus_look_offset,
        );
        self.set_state(NavState::Idle);
        Some(clamped)
    }

    pub fn jump_to_id(&mut self, id: &str) -> Option<usize> {
        match self.gallery.index_of(id) {
            Some(index) => self.jump_to(index),
            None => {
                log::warn!("no exhibit with id {:?}", id);
                None
            }
        }
    }

    // === Continuous press ===

    /// Begin repeating `move_by(direction)` until `stop_moving`
    pub fn start_moving(&mut self, direction: Direction) -> bool {
        if self.guard.is_suspended() {
            return false;
        }
        if !self.press.start(direction) {
            return false;
        }
        log::debug!("continuous move {:?} started", direction);
        self.move_by(direction)
    }

    pub fn stop_moving(&mut self) -> bool {
        self.press.stop()
    }

    // === Context loss ===

    /// Route GPU device-lost notifications through a thread-safe signal
    pub fn attach_context_signal(&mut self, signal: ContextSignal) {
        self.signal = Some(signal);
    }

    pub fn on_context_lost(&mut self) {
        if self.guard.on_lost() {
            self.press.stop();
        }
    }

    pub fn on_context_restored(&mut self) {
        self.guard.on_restored();
    }

    fn apply_context_event(&mut self, event: ContextEvent) {
        match event {
            ContextEvent::Lost => self.on_context_lost(),
            ContextEvent::Restored => self.on_context_restored(),
        }
    }

    // === Frame integration ===

    /// Integrate one rendered frame
    pub fn tick(&mut self, delta_time: f32) -> FrameOutcome {
        if let Some(event) = self.signal.as_ref().and_then(ContextSignal::take) {
            self.apply_context_event(event);
        }
        if self.guard.is_suspended() {
            return FrameOutcome::Suspended;
        }

        let dt = if delta_time.is_finite() {
            delta_time.clamp(0.0, self.config.max_frame_delta)
        } else {
            0.0
        };
        self.stats.frames += 1;
        self.command_throttle.advance(dt);

        if self.scroll_debounce.tick(dt) {
            self.intent.is_scrolling = false;
        }
        if let Some((direction, fires)) = self.press.tick(dt) {
            for _ in 0..fires {
                self.move_by(direction);
            }
        }

        let before = self.camera;
        let frame_lateral = self.camera.lateral();

        self.orbit.update(&mut self.camera, dt);
        self.intent.is_user_rotating = self.orbit.is_rotating();
        if let Some(held) = self.held_joystick {
            self.intent.joystick_rotation = held;
        }

        let state = self.integrate(frame_lateral);
        self.set_state(state);

        if self.camera == before {
            FrameOutcome::Settled
        } else {
            FrameOutcome::Moved
        }
    }

    fn integrate(&mut self, frame_lateral: f32) -> NavState {
        if self.intent.joystick_rotation.length() > self.config.joystick_epsilon {
            self.apply_joystick(frame_lateral);
            self.intent.joystick_rotation *= self.config.joystick_decay;
            return NavState::JoystickActive;
        }
        self.intent.joystick_rotation = Vec2::ZERO;

        if self.intent.is_user_rotating && !self.intent.is_scrolling {
            // Free rotation must never walk the camera along the gallery
            let drift = self.intent.target_lateral - self.camera.lateral();
            self.camera.shift_lateral(drift);
            return NavState::UserRotating;
        }

        self.blend_lateral();
        if self.intent.is_scrolling {
            NavState::AutoScrolling
        } else {
            NavState::Idle
        }
    }

    /// Turn the view by the stick vector without moving along the walk axis
    fn apply_joystick(&mut self, frame_lateral: f32) {
        let mut spherical = self.camera.spherical();
        if spherical.radius <= f32::EPSILON {
            return;
        }

        let rotation = self.intent.joystick_rotation * self.config.joystick_speed;
        spherical.azimuth -= rotation.x;
        spherical.polar -= rotation.y;
        self.camera
            .set_spherical(spherical.with_polar_clamped(self.config.min_polar, self.config.max_polar));

        let drift = self.camera.lateral() - frame_lateral;
        self.camera.shift_lateral(-drift);
    }

    fn blend_lateral(&mut self) {
        let remaining = self.intent.target_lateral - self.camera.lateral();
        if remaining.abs() <= self.config.settle_threshold {
            return;
        }

        let factor = if self.intent.is_scrolling {
            self.config.scroll_lerp
        } else {
            self.config.idle_lerp
        };
        let lateral = self.camera.lateral();
        let next = approach(lateral, self.intent.target_lateral, factor);
        self.camera.shift_lateral(next - lateral);
    }

    // === Helpers ===

    fn shift_target(&mut self, delta: f32) {
        let bounds = self.gallery.bounds();
        self.intent.target_lateral = bounds.clamp(self.intent.target_lateral + delta);
    }

    fn mark_scrolling(&mut self, debounce: f32) {
        self.intent.is_scrolling = true;
        self.scroll_debounce.restart(debounce);
    }

    fn cancel_motion(&mut self) {
        self.scroll_debounce.cancel();
        self.press.stop();
        self.orbit.reset();
        self.held_joystick = None;
        self.intent.joystick_rotation = Vec2::ZERO;
        self.intent.is_scrolling = false;
        self.intent.is_user_rotating = false;
    }

    fn home_lateral(&self) -> f32 {
        self.gallery.bounds().clamp(self.config.home_position.x)
    }

    fn set_state(&mut self, state: NavState) {
        if state != self.state {
            log::debug!("navigation {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    // === Read-only views ===

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn intent(&self) -> &NavigationIntent {
        &self.intent
    }

    pub fn target_lateral(&self) -> f32 {
        self.intent.target_lateral
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn bounds(&self) -> LateralBounds {
        self.gallery.bounds()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn stats(&self) -> NavigationStats {
        self.stats
    }

    /// Exhibit nearest the camera
    pub fn current_index(&self) -> usize {
        self.gallery.nearest_index(self.camera.lateral())
    }

    /// Lateral travel still in progress; UI may disable buttons meanwhile
    pub fn is_transitioning(&self) -> bool {
        self.intent.is_scrolling
            || self.press.is_moving()
            || (self.intent.target_lateral - self.camera.lateral()).abs()
                > self.config.settle_threshold
    }

    pub fn is_rotating(&self) -> bool {
        self.intent.is_user_rotating
            || self.intent.joystick_rotation.length() > self.config.joystick_epsilon
    }

    pub fn is_moving(&self) -> bool {
        self.press.is_moving()
    }

    pub fn render_status(&self) -> RenderStatus {
        self.guard.status()
    }

    pub fn is_paused(&self) -> bool {
        self.guard.is_suspended()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.guard.notice()
    }

    /// Orbit tuning (viewport size, speeds); the camera stays out of reach
    pub fn orbit_mut(&mut self) -> &mut O {
        &mut self.orbit
    }
}

impl<O: OrbitPrimitive> Drop for NavigationController<O> {
    fn drop(&mut self) {
        if self.press.stop() {
            log::debug!("continuous move cancelled on teardown");
        }
        self.scroll_debounce.cancel();
    }
}
