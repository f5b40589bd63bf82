use glam::{Mat4, Vec3};

use crate::math::Spherical;

/// Camera eye and look-at point.
///
/// The navigation controller is the only writer; everything else reads a
/// copy through `NavigationController::camera`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    /// Coordinate along the gallery's walk axis
    pub fn lateral(&self) -> f32 {
        self.position.x
    }

    /// Translate eye and look-at together along the walk axis
    pub fn shift_lateral(&mut self, delta: f32) {
        self.position.x += delta;
        self.look_at.x += delta;
    }

    pub fn offset(&self) -> Vec3 {
        self.position - self.look_at
    }

    pub fn spherical(&self) -> Spherical {
        Spherical::from_offset(self.offset())
    }

    pub fn set_spherical(&mut self, spherical: Spherical) {
        self.position = self.look_at + spherical.to_offset();
    }

    pub fn distance(&self) -> f32 {
        self.offset().length()
    }

    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}
