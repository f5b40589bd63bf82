mod spherical;

pub use spherical::Spherical;

/// One exponential-smoothing step: `value + (target - value) * factor`
pub fn approach(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_moves_by_factor_of_remaining() {
        assert_eq!(approach(0.0, 10.0, 0.1), 1.0);
        assert_eq!(approach(10.0, 10.0, 0.5), 10.0);
        assert_eq!(approach(4.0, 0.0, 0.25), 3.0);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..200 {
            value = approach(value, 8.0, 0.1);
            assert!(value <= 8.0);
        }
        assert!((8.0 - value).abs() < 1e-3);
    }
}
