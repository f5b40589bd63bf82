//! Default orbit primitive.
//!
//! Rotates the camera around its look-at point on drag, zooms on
//! ctrl-wheel and pans on shift-wheel. Rotation is damped: each drag delta
//! is spread over following frames instead of applied at once.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::camera::CameraState;
use crate::config::NavigationConfig;
use crate::core::input::OrbitInput;
use crate::traits::{InteractionEvent, OrbitPrimitive};

const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;
/// Inertia below this many radians per frame counts as stopped
const REST_VELOCITY: f32 = 1e-4;
const ZOOM_PER_UNIT: f32 = 0.002;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping: f32,

    viewport_height: f32,
    dragging: bool,
    last_pointer: Option<Vec2>,
    /// Pointer travel since the last update, in pixels
    pending_drag: Vec2,
    pending_zoom: f32,
    pending_pan: Vec2,
    /// Azimuth/polar still to be applied, in radians
    velocity: Vec2,
}

impl OrbitControls {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            min_polar: config.min_polar,
            max_polar: config.max_polar,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            pan_speed: config.pan_speed,
            damping: config.damping,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            dragging: false,
            last_pointer: None,
            pending_drag: Vec2::ZERO,
            pending_zoom: 0.0,
            pending_pan: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    /// Pixel-to-radian scaling follows the viewport height
    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn apply_rotation(&mut self, camera: &mut CameraState) {
        // A full viewport-height drag turns the camera once around
        let impulse = self.pending_drag * (TAU / self.viewport_height) * self.rotate_speed;
        self.pending_drag = Vec2::ZERO;
        self.velocity += impulse;

        if self.velocity.length() <= REST_VELOCITY {
            self.velocity = Vec2::ZERO;
            return;
        }

        let step = self.velocity * self.damping;
        self.velocity *= 1.0 - self.damping;

        let mut spherical = camera.spherical();
        if spherical.radius <= f32::EPSILON {
            return;
        }
        spherical.azimuth -= step.x;
        spherical.polar -= step.y;
        camera.set_spherical(spherical.with_polar_clamped(self.min_polar, self.max_polar));
    }

    fn apply_zoom(&mut self, camera: &mut CameraState) {
        if self.pending_zoom == 0.0 {
            return;
        }
        let mut spherical = camera.spherical();
        spherical.radius *= (self.pending_zoom * ZOOM_PER_UNIT * self.zoom_speed).exp();
        self.pending_zoom = 0.0;
        camera.set_spherical(spherical.with_radius_clamped(self.min_distance, self.max_distance));
    }

    fn apply_pan(&mut self, camera: &mut CameraState) {
        if self.pending_pan == Vec2::ZERO {
            return;
        }
        let right = camera.right();
        let up = right.cross(camera.forward()).normalize_or_zero();
        let scale = self.pan_speed * camera.distance() / self.viewport_height;
        let shift = (right * -self.pending_pan.x + up * self.pending_pan.y) * scale;
        self.pending_pan = Vec2::ZERO;

        camera.position += shift;
        camera.look_at += shift;
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(&NavigationConfig::default())
    }
}

impl OrbitPrimitive for OrbitControls {
    fn handle_input(&mut self, input: OrbitInput) -> Option<InteractionEvent> {
        match input {
            OrbitInput::DragStart(position) => {
                self.last_pointer = Some(position);
                if self.dragging {
                    return None;
                }
                self.dragging = true;
                Some(InteractionEvent::Start)
            }
            OrbitInput::DragMove(position) => {
                if self.dragging {
                    if let Some(last) = self.last_pointer {
                        self.pending_drag += position - last;
                    }
                    self.last_pointer = Some(position);
                }
                None
            }
            OrbitInput::DragEnd => {
                self.last_pointer = None;
                if !self.dragging {
                    return None;
                }
                self.dragging = false;
                Some(InteractionEvent::End)
            }
            OrbitInput::Zoom(delta) => {
                self.pending_zoom += delta;
                None
            }
            OrbitInput::Pan(delta) => {
                self.pending_pan += delta;
                None
            }
        }
    }

    fn update(&mut self, camera: &mut CameraState, _delta_time: f32) {
        self.apply_rotation(camera);
        self.apply_zoom(camera);
        self.apply_pan(camera);
    }

    fn is_rotating(&self) -> bool {
        self.dragging || self.velocity.length() > REST_VELOCITY
    }

    fn reset(&mut self) {
        self.dragging = false;
        self.last_pointer = None;
        self.pending_drag = Vec2::ZERO;
        self.pending_zoom = 0.0;
        self.pending_pan = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }
}
