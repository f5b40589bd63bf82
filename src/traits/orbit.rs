use crate::camera::CameraState;
use crate::core::input::OrbitInput;

/// Boundary of a user-driven orbit interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    Start,
    End,
}

/// Orbit primitive - drag-to-rotate, zoom and pan around the look-at point
///
/// Gestures are only queued by `handle_input`; the camera is written in
/// `update`, which the navigation controller calls from its own tick so it
/// stays the single writer of camera state.
pub trait OrbitPrimitive {
    /// Queue a gesture, reporting when it starts or ends an interaction
    fn handle_input(&mut self, input: OrbitInput) -> Option<InteractionEvent>;

    /// Apply queued gestures and any inertia to the camera
    fn update(&mut self, camera: &mut CameraState, delta_time: f32);

    /// Drag in progress, or inertia still turning the camera
    fn is_rotating(&self) -> bool;

    /// Drop queued gestures, inertia and any drag in progress
    fn reset(&mut self);
}
