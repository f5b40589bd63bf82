use glam::Vec3;

/// Offset from a look-at point expressed as radius, azimuth and polar angle.
///
/// Azimuth is measured around +Y starting at +Z; polar is measured down
/// from +Y, so `polar = PI / 2` lies on the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
}

impl Spherical {
    pub fn new(radius: f32, azimuth: f32, polar: f32) -> Self {
        Self {
            radius,
            azimuth,
            polar,
        }
    }

    /// Decompose an offset; a zero offset maps to a zero radius on the +Y pole
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self::new(0.0, 0.0, 0.0);
        }

        let azimuth = offset.x.atan2(offset.z);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        Self::new(radius, azimuth, polar)
    }

    pub fn to_offset(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }

    pub fn with_polar_clamped(mut self, min: f32, max: f32) -> Self {
        self.polar = self.polar.clamp(min, max);
        self
    }

    pub fn with_radius_clamped(mut self, min: f32, max: f32) -> Self {
        self.radius = self.radius.clamp(min, max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    #[test]
    fn offset_along_z_has_zero_azimuth_on_horizon() {
        let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 5.0));
        assert!((s.radius - 5.0).abs() < EPS);
        assert!(s.azimuth.abs() < EPS);
        assert!((s.polar - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn offset_along_x_has_quarter_turn_azimuth() {
        let s = Spherical::from_offset(Vec3::new(3.0, 0.0, 0.0));
        assert!((s.azimuth - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn reconstructs_original_offset() {
        let offset = Vec3::new(1.5, 2.0, -3.0);
        let rebuilt = Spherical::from_offset(offset).to_offset();
        assert!((rebuilt - offset).length() < 1e-4);
    }

    #[test]
    fn zero_offset_is_degenerate_not_nan() {
        let s = Spherical::from_offset(Vec3::ZERO);
        assert_eq!(s.radius, 0.0);
        assert!(!s.polar.is_nan());
        assert_eq!(s.to_offset(), Vec3::ZERO);
    }

    #[test]
    fn polar_clamp_keeps_camera_off_the_pole() {
        let s = Spherical::new(4.0, 0.0, 0.01).with_polar_clamped(PI / 6.0, PI / 2.2);
        assert!((s.polar - PI / 6.0).abs() < EPS);

        let s = Spherical::new(4.0, 0.0, PI).with_polar_clamped(PI / 6.0, PI / 2.2);
        assert!((s.polar - PI / 2.2).abs() < EPS);
    }
}
