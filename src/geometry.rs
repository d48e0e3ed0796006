//! Rotated bounding boxes and the padding that keeps rotations unclipped.
//!
//! A `w x h` rectangle rotated by `phi` about its center has the axis-aligned
//! extent
//!
//! ```text
//! diag  = sqrt(w^2 + h^2)
//! phi0  = atan(h / w)
//! w_new = diag * max(|cos(phi - phi0)|, |cos(phi + phi0)|)
//! h_new = diag * max(|sin(phi - phi0)|, |sin(phi + phi0)|)
//! ```
//!
//! which is the tight bound traced by the two diagonals. Padding each side by
//! half the excess lets a rotation about the padded center keep every source
//! pixel, and cropping the original window back out undoes the padding.

use crate::util::math::{half_ceil, EXTENT_EPS};
use crate::util::{RotrajError, RotrajResult};

/// How padding is distributed over the two axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaddingMode {
    /// One amount on all four sides, sized for the worse axis.
    #[default]
    Uniform,
    /// Independent horizontal and vertical amounts.
    PerAxis,
}

/// Pixels added on each side of an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Padding {
    /// No padding.
    pub const ZERO: Padding = Padding {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// The same amount on every side.
    pub fn uniform(pad: usize) -> Self {
        Self {
            left: pad,
            top: pad,
            right: pad,
            bottom: pad,
        }
    }

    /// Symmetric horizontal and vertical amounts.
    pub fn symmetric(pad_x: usize, pad_y: usize) -> Self {
        Self {
            left: pad_x,
            top: pad_y,
            right: pad_x,
            bottom: pad_y,
        }
    }

    /// Padding that keeps a `width x height` image unclipped when rotated by
    /// `angle_deg` about its center.
    pub fn for_angle(width: usize, height: usize, angle_deg: f64, mode: PaddingMode) -> Self {
        let (w_new, h_new) = rotated_bounds(width, height, angle_deg);
        let excess_w = w_new - width as f64;
        let excess_h = h_new - height as f64;
        match mode {
            PaddingMode::Uniform => Self::uniform(half_ceil(excess_w.max(excess_h))),
            PaddingMode::PerAxis => Self::symmetric(half_ceil(excess_w), half_ceil(excess_h)),
        }
    }

    /// Returns true when no side is padded.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Size of a `width x height` image after padding.
    pub fn padded_size(&self, width: usize, height: usize) -> RotrajResult<(usize, usize)> {
        let out_width = width
            .checked_add(self.left)
            .and_then(|v| v.checked_add(self.right));
        let out_height = height
            .checked_add(self.top)
            .and_then(|v| v.checked_add(self.bottom));
        match (out_width, out_height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(RotrajError::InvalidDimensions { width, height }),
        }
    }

    /// Returns true if the padded canvas holds the rotated bounding box of a
    /// `width x height` image at `angle_deg`, i.e. cropping the original
    /// window after rotation loses no source pixel.
    pub fn covers_rotation(&self, width: usize, height: usize, angle_deg: f64) -> bool {
        let (w_new, h_new) = rotated_bounds(width, height, angle_deg);
        let half_w = (w_new - width as f64) / 2.0 - EXTENT_EPS;
        let half_h = (h_new - height as f64) / 2.0 - EXTENT_EPS;
        half_w <= self.left.min(self.right) as f64 && half_h <= self.top.min(self.bottom) as f64
    }
}

/// Width and height of the axis-aligned bounding box of a `width x height`
/// rectangle rotated by `angle_deg` about its center.
pub fn rotated_bounds(width: usize, height: usize, angle_deg: f64) -> (f64, f64) {
    let w = width as f64;
    let h = height as f64;
    let diag = w.hypot(h);
    let phi = angle_deg.to_radians();
    let phi0 = (h / w).atan();
    let w_new = diag * (phi - phi0).cos().abs().max((phi + phi0).cos().abs());
    let h_new = diag * (phi - phi0).sin().abs().max((phi + phi0).sin().abs());
    (w_new, h_new)
}

#[cfg(test)]
mod tests {
    use super::{rotated_bounds, Padding, PaddingMode};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bounds_at_zero_and_quarter_turns() {
        let (w, h) = rotated_bounds(6, 2, 0.0);
        assert!(close(w, 6.0) && close(h, 2.0));
        let (w, h) = rotated_bounds(6, 2, 90.0);
        assert!(close(w, 2.0) && close(h, 6.0));
        let (w, h) = rotated_bounds(6, 2, -180.0);
        assert!(close(w, 6.0) && close(h, 2.0));
    }

    #[test]
    fn bounds_match_sum_of_projections() {
        for &angle in &[10.0, 33.0, 45.0, 100.0, 135.0, -60.0] {
            let (w, h) = rotated_bounds(7, 3, angle);
            let (sin, cos) = f64::to_radians(angle).sin_cos();
            let expected_w = 7.0 * cos.abs() + 3.0 * sin.abs();
            let expected_h = 7.0 * sin.abs() + 3.0 * cos.abs();
            assert!(close(w, expected_w), "angle {angle}: {w} vs {expected_w}");
            assert!(close(h, expected_h), "angle {angle}: {h} vs {expected_h}");
        }
    }

    #[test]
    fn uniform_padding_uses_worse_axis() {
        assert_eq!(Padding::for_angle(4, 4, 0.0, PaddingMode::Uniform), Padding::ZERO);
        assert_eq!(Padding::for_angle(4, 4, 90.0, PaddingMode::Uniform), Padding::ZERO);
        assert_eq!(
            Padding::for_angle(4, 4, 45.0, PaddingMode::Uniform),
            Padding::uniform(1)
        );
        assert_eq!(
            Padding::for_angle(6, 2, 90.0, PaddingMode::Uniform),
            Padding::uniform(2)
        );
    }

    #[test]
    fn per_axis_padding_is_tighter() {
        let padding = Padding::for_angle(6, 2, 90.0, PaddingMode::PerAxis);
        assert_eq!(padding, Padding::symmetric(0, 2));
        assert!(padding.covers_rotation(6, 2, 90.0));
    }

    #[test]
    fn padding_covers_every_angle() {
        for mode in [PaddingMode::Uniform, PaddingMode::PerAxis] {
            for step in 0..72 {
                let angle = -180.0 + step as f64 * 5.0;
                let padding = Padding::for_angle(9, 4, angle, mode);
                assert!(padding.covers_rotation(9, 4, angle), "{mode:?} {angle}");
            }
        }
        assert!(!Padding::ZERO.covers_rotation(9, 4, 30.0));
    }

    #[test]
    fn padded_size_adds_both_sides() {
        let padding = Padding::symmetric(2, 3);
        assert_eq!(padding.padded_size(5, 4).unwrap(), (9, 10));
        assert!(Padding::uniform(usize::MAX).padded_size(1, 1).is_err());
    }
}
