//! Rotation about the image center with selectable resampling.
//!
//! Rotation is performed about `cx = (w - 1) / 2`, `cy = (h - 1) / 2` in
//! pixel-center coordinates. Positive angles turn the content
//! counter-clockwise as displayed (y axis pointing down). Each destination
//! pixel is mapped back into the source with the inverse rotation
//!
//! ```text
//! src_x =  cos(a) * dx - sin(a) * dy + cx
//! src_y =  sin(a) * dx + cos(a) * dy + cy
//! ```
//!
//! Samples that land outside the source take the fill value; neighbours of
//! in-bounds samples are clamped to the image. Results are rounded to the
//! nearest integer and clamped to `[0, 255]`.

use crate::fill::ResolvedFill;
use crate::image::{ImageView, OwnedImage, MAX_CHANNELS};
use crate::util::math::sin_cos_deg;
use crate::util::{RotrajError, RotrajResult};

/// Resampling filter used by [`rotate_u8`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Closest source pixel.
    Nearest,
    /// 2x2 linear blend.
    Bilinear,
    /// 4x4 Catmull-Rom cubic.
    #[default]
    Bicubic,
}

const BOUNDS_EPS: f64 = 1e-6;

/// Rotates `src` by `angle_deg` degrees, keeping its size.
///
/// Quarter turns use exact sine and cosine, so for 90 degree multiples of a
/// square image every destination pixel reads exactly one source pixel.
pub fn rotate_u8(
    src: ImageView<'_, u8>,
    angle_deg: f64,
    fill: &ResolvedFill,
    interpolation: Interpolation,
) -> RotrajResult<OwnedImage> {
    let channels = src.channels();
    if fill.channels() != channels {
        return Err(RotrajError::FillMismatch {
            fill_len: fill.channels(),
            channels,
        });
    }
    let width = src.width();
    let height = src.height();
    let mut out = OwnedImage::filled(width, height, fill.as_slice())?;

    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    let cx = (width as f64 - 1.0) * 0.5;
    let cy = (height as f64 - 1.0) * 0.5;
    let max_x = width as f64 - 1.0;
    let max_y = height as f64 - 1.0;
    let sampler = Sampler { src };

    let dst = out.data_mut();
    for y in 0..height {
        let dy = y as f64 - cy;
        for x in 0..width {
            let dx = x as f64 - cx;
            let src_x = cos_a * dx - sin_a * dy + cx;
            let src_y = sin_a * dx + cos_a * dy + cy;
            if !src_x.is_finite()
                || !src_y.is_finite()
                || src_x < -BOUNDS_EPS
                || src_y < -BOUNDS_EPS
                || src_x > max_x + BOUNDS_EPS
                || src_y > max_y + BOUNDS_EPS
            {
                continue;
            }
            let src_x = src_x.clamp(0.0, max_x);
            let src_y = src_y.clamp(0.0, max_y);
            let start = (y * width + x) * channels;
            let px = &mut dst[start..start + channels];
            match interpolation {
                Interpolation::Nearest => sampler.nearest(src_x, src_y, px),
                Interpolation::Bilinear => sampler.bilinear(src_x, src_y, px),
                Interpolation::Bicubic => sampler.bicubic(src_x, src_y, px),
            }
        }
    }

    Ok(out)
}

struct Sampler<'a> {
    src: ImageView<'a, u8>,
}

impl Sampler<'_> {
    #[inline]
    fn sample(&self, x: usize, y: usize, c: usize) -> f32 {
        let idx = y * self.src.stride() + x * self.src.channels() + c;
        self.src.as_slice()[idx] as f32
    }

    fn nearest(&self, src_x: f64, src_y: f64, out: &mut [u8]) {
        let x = src_x.round() as usize;
        let y = src_y.round() as usize;
        for (c, value) in out.iter_mut().enumerate() {
            *value = self.sample(x, y, c) as u8;
        }
    }

    fn bilinear(&self, src_x: f64, src_y: f64, out: &mut [u8]) {
        let x0 = src_x.floor() as usize;
        let y0 = src_y.floor() as usize;
        let x1 = (x0 + 1).min(self.src.width() - 1);
        let y1 = (y0 + 1).min(self.src.height() - 1);
        let fx = (src_x - x0 as f64) as f32;
        let fy = (src_y - y0 as f64) as f32;

        let w00 = (1.0 - fx) * (1.0 - fy);
        let w10 = fx * (1.0 - fy);
        let w01 = (1.0 - fx) * fy;
        let w11 = fx * fy;
        for (c, value) in out.iter_mut().enumerate() {
            let v = self.sample(x0, y0, c) * w00
                + self.sample(x1, y0, c) * w10
                + self.sample(x0, y1, c) * w01
                + self.sample(x1, y1, c) * w11;
            *value = to_u8(v);
        }
    }

    fn bicubic(&self, src_x: f64, src_y: f64, out: &mut [u8]) {
        let fx = src_x.floor();
        let fy = src_y.floor();
        let wx = cubic_weights((src_x - fx) as f32);
        let wy = cubic_weights((src_y - fy) as f32);
        let base_x = fx as isize - 1;
        let base_y = fy as isize - 1;
        let last_x = self.src.width() as isize - 1;
        let last_y = self.src.height() as isize - 1;

        let mut acc = [0.0f32; MAX_CHANNELS];
        for (j, &wyj) in wy.iter().enumerate() {
            if wyj == 0.0 {
                continue;
            }
            let yy = (base_y + j as isize).clamp(0, last_y) as usize;
            for (i, &wxi) in wx.iter().enumerate() {
                let weight = wxi * wyj;
                if weight == 0.0 {
                    continue;
                }
                let xx = (base_x + i as isize).clamp(0, last_x) as usize;
                for (c, sum) in acc.iter_mut().take(out.len()).enumerate() {
                    *sum += weight * self.sample(xx, yy, c);
                }
            }
        }
        for (value, sum) in out.iter_mut().zip(acc) {
            *value = to_u8(sum);
        }
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Catmull-Rom weights for the four taps at offsets -1, 0, 1, 2 from the
/// floor of the sample position, where `t` is the fractional part.
fn cubic_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;

    let w1 = t3 - 2.0 * t2 + 1.0;

    let d2 = 1.0 - t;
    let d2_2 = d2 * d2;
    let w2 = (d2_2 * d2) - 2.0 * d2_2 + 1.0;

    let d3 = 2.0 - t;
    let d3_2 = d3 * d3;
    let w3 = -(d3_2 * d3) + 5.0 * d3_2 - 8.0 * d3 + 4.0;

    let d0 = t + 1.0;
    let d0_2 = d0 * d0;
    let w0 = -(d0_2 * d0) + 5.0 * d0_2 - 8.0 * d0 + 4.0;

    [w0, w1, w2, w3]
}

#[cfg(test)]
mod tests {
    use super::{cubic_weights, rotate_u8, Interpolation};
    use crate::fill::Fill;
    use crate::image::ImageView;

    #[test]
    fn cubic_weights_interpolate_and_sum_to_one() {
        assert_eq!(cubic_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let sum: f32 = cubic_weights(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "t={t} sum={sum}");
        }
        let half = cubic_weights(0.5);
        assert!((half[1] - half[2]).abs() < 1e-6);
        assert!(half[0] < 0.0 && half[3] < 0.0);
    }

    #[test]
    fn zero_angle_is_identity_for_every_filter() {
        let data: Vec<u8> = (0u8..36).map(|v| v * 7).collect();
        let view = ImageView::from_slice(&data, 4, 3, 3).unwrap();
        let fill = Fill::Scalar(0).resolve(3).unwrap();
        for filter in [
            Interpolation::Nearest,
            Interpolation::Bilinear,
            Interpolation::Bicubic,
        ] {
            let out = rotate_u8(view, 0.0, &fill, filter).unwrap();
            assert_eq!(out.data(), data.as_slice(), "{filter:?}");
        }
    }

    #[test]
    fn half_turn_reverses_pixels() {
        let data: Vec<u8> = (0u8..12).collect();
        let view = ImageView::from_slice(&data, 4, 3, 1).unwrap();
        let fill = Fill::Scalar(0).resolve(1).unwrap();
        let out = rotate_u8(view, 180.0, &fill, Interpolation::Bicubic).unwrap();
        let expected: Vec<u8> = data.iter().rev().copied().collect();
        assert_eq!(out.data(), expected.as_slice());
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        #[rustfmt::skip]
        let data = [
            1u8, 2, 3,
            4, 5, 6,
            7, 8, 9,
        ];
        let view = ImageView::from_slice(&data, 3, 3, 1).unwrap();
        let fill = Fill::Scalar(0).resolve(1).unwrap();
        let out = rotate_u8(view, 90.0, &fill, Interpolation::Bicubic).unwrap();
        #[rustfmt::skip]
        let expected = [
            3u8, 6, 9,
            2, 5, 8,
            1, 4, 7,
        ];
        assert_eq!(out.data(), &expected);
    }

    #[test]
    fn constant_image_with_matching_fill_stays_constant() {
        let data = vec![200u8; 7 * 5 * 2];
        let view = ImageView::from_slice(&data, 7, 5, 2).unwrap();
        let fill = Fill::Scalar(200).resolve(2).unwrap();
        for filter in [Interpolation::Bilinear, Interpolation::Bicubic] {
            let out = rotate_u8(view, 33.0, &fill, filter).unwrap();
            assert!(out.data().iter().all(|&v| v == 200), "{filter:?}");
        }
    }

    #[test]
    fn rejects_fill_of_wrong_depth() {
        let data = [0u8; 4];
        let view = ImageView::from_slice(&data, 2, 2, 1).unwrap();
        let fill = Fill::Scalar(0).resolve(3).unwrap();
        assert!(rotate_u8(view, 10.0, &fill, Interpolation::Bicubic).is_err());
    }
}
