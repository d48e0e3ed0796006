//! Constant-border expansion.

use crate::fill::ResolvedFill;
use crate::geometry::Padding;
use crate::image::{ImageView, OwnedImage};
use crate::util::{RotrajError, RotrajResult};

/// Expands `src` by `padding` on each side, filling new pixels with `fill`.
///
/// The source content is copied unchanged to offset `(padding.left,
/// padding.top)` of the returned image.
pub fn expand(
    src: ImageView<'_, u8>,
    padding: Padding,
    fill: &ResolvedFill,
) -> RotrajResult<OwnedImage> {
    let channels = src.channels();
    if fill.channels() != channels {
        return Err(RotrajError::FillMismatch {
            fill_len: fill.channels(),
            channels,
        });
    }
    let (out_width, out_height) = padding.padded_size(src.width(), src.height())?;
    let mut out = OwnedImage::filled(out_width, out_height, fill.as_slice())?;
    if padding.is_zero() && src.stride() == src.width() * channels {
        if let Some(contiguous) = src.as_slice().get(..out.data().len()) {
            out.data_mut().copy_from_slice(contiguous);
            return Ok(out);
        }
    }

    let out_stride = out_width * channels;
    let row_len = src.width() * channels;
    let x_offset = padding.left * channels;
    let dst = out.data_mut();
    for y in 0..src.height() {
        let row = src.row(y).ok_or(RotrajError::BufferTooSmall {
            needed: y * src.stride() + row_len,
            got: src.as_slice().len(),
        })?;
        let start = (y + padding.top) * out_stride + x_offset;
        dst[start..start + row_len].copy_from_slice(row);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::expand;
    use crate::fill::Fill;
    use crate::geometry::Padding;
    use crate::image::ImageView;

    #[test]
    fn expand_places_source_in_the_middle() {
        let data = [1u8, 2, 3, 4];
        let view = ImageView::from_slice(&data, 2, 2, 1).unwrap();
        let fill = Fill::Scalar(9).resolve(1).unwrap();
        let out = expand(view, Padding::uniform(1), &fill).unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        #[rustfmt::skip]
        let expected = [
            9u8, 9, 9, 9,
            9, 1, 2, 9,
            9, 3, 4, 9,
            9, 9, 9, 9,
        ];
        assert_eq!(out.data(), &expected);
    }

    #[test]
    fn expand_with_asymmetric_padding_and_channels() {
        let data = [10u8, 20, 30, 40];
        let view = ImageView::from_slice(&data, 1, 1, 4).unwrap();
        let fill = Fill::from([0u8, 0, 0]).resolve(4).unwrap();
        let padding = Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 1,
        };
        let out = expand(view, padding, &fill).unwrap();
        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.view().pixel(1, 0).unwrap(), &[10u8, 20, 30, 40]);
        assert_eq!(out.view().pixel(0, 0).unwrap(), &[0u8, 0, 0, 255]);
        assert_eq!(out.view().pixel(1, 1).unwrap(), &[0u8, 0, 0, 255]);
    }
}
