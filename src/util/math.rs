//! Trigonometric helpers shared by the geometry and rotation code.

/// Round-off tolerance, in pixels, absorbed before rounding extents up.
pub(crate) const EXTENT_EPS: f64 = 1e-9;

/// Computes sine and cosine for an angle in degrees.
///
/// Exact multiples of 90 degrees return exact values so quarter turns map
/// pixel centers onto pixel centers.
pub(crate) fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    let turns = angle_deg / 90.0;
    if turns.fract() == 0.0 && turns.is_finite() {
        return match (turns as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        };
    }
    angle_deg.to_radians().sin_cos()
}

/// Half of `excess`, rounded up to whole pixels and clamped at zero.
pub(crate) fn half_ceil(excess: f64) -> usize {
    let half = excess / 2.0 - EXTENT_EPS;
    if half <= 0.0 {
        0
    } else {
        half.ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{half_ceil, sin_cos_deg};

    #[test]
    fn sin_cos_deg_is_exact_on_quadrants() {
        assert_eq!(sin_cos_deg(0.0), (0.0, 1.0));
        assert_eq!(sin_cos_deg(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_deg(-90.0), (-1.0, 0.0));
        assert_eq!(sin_cos_deg(180.0), (0.0, -1.0));
        assert_eq!(sin_cos_deg(-180.0), (0.0, -1.0));
        assert_eq!(sin_cos_deg(450.0), (1.0, 0.0));
    }

    #[test]
    fn sin_cos_deg_matches_libm_elsewhere() {
        let (sin, cos) = sin_cos_deg(30.0);
        assert!((sin - 0.5).abs() < 1e-12);
        assert!((cos - 3.0f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn half_ceil_absorbs_round_off() {
        assert_eq!(half_ceil(-3.0), 0);
        assert_eq!(half_ceil(1e-12), 0);
        assert_eq!(half_ceil(0.2), 1);
        assert_eq!(half_ceil(2.0), 1);
        assert_eq!(half_ceil(2.0 + 1e-6), 2);
    }
}
