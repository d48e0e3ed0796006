//! Owned contiguous 8-bit images.

use crate::image::ImageView;
use crate::util::{RotrajError, RotrajResult};

/// Owned contiguous interleaved `u8` image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl OwnedImage {
    /// Wraps a contiguous buffer of exactly `width * height * channels` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize, channels: usize) -> RotrajResult<Self> {
        let needed = ImageView::from_slice(&data, width, height, channels)
            .map(|view| view.stride() * height)?;
        if data.len() > needed {
            return Err(RotrajError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates an image where every pixel equals `pixel`.
    pub(crate) fn filled(width: usize, height: usize, pixel: &[u8]) -> RotrajResult<Self> {
        let channels = pixel.len();
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(RotrajError::InvalidDimensions { width, height })?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..width * height {
            data.extend_from_slice(pixel);
        }
        Self::new(data, width, height, channels)
    }

    /// Wraps a buffer already known to hold `width * height * channels` samples.
    pub(crate) fn from_parts(data: Vec<u8>, width: usize, height: usize, channels: usize) -> Self {
        debug_assert_eq!(data.len(), width * height * channels);
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Copies a (possibly strided) view into a contiguous image.
    pub fn from_view(view: ImageView<'_, u8>) -> RotrajResult<Self> {
        let width = view.width();
        let height = view.height();
        let channels = view.channels();
        let row_len = width * channels;
        let mut data = Vec::with_capacity(row_len * height);
        for y in 0..height {
            let row = view.row(y).ok_or(RotrajError::BufferTooSmall {
                needed: y * view.stride() + row_len,
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, width, height, channels)
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the contiguous sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image and returns its sample buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::OwnedImage;
    use crate::image::ImageView;
    use crate::util::RotrajError;

    #[test]
    fn new_rejects_wrong_length() {
        let err = OwnedImage::new(vec![0u8; 3], 2, 2, 1).unwrap_err();
        assert_eq!(err, RotrajError::BufferTooSmall { needed: 4, got: 3 });
        let err = OwnedImage::new(vec![0u8; 5], 2, 2, 1).unwrap_err();
        assert_eq!(
            err,
            RotrajError::InvalidDimensions {
                width: 2,
                height: 2,
            }
        );
    }

    #[test]
    fn from_view_compacts_strided_rows() {
        let data: Vec<u8> = (0u8..12).collect();
        let view = ImageView::new(&data, 2, 3, 1, 4).unwrap();
        let owned = OwnedImage::from_view(view).unwrap();
        assert_eq!(owned.data(), &[0u8, 1, 4, 5, 8, 9]);
        assert_eq!(owned.view().stride(), 2);
    }

    #[test]
    fn filled_repeats_pixel() {
        let img = OwnedImage::filled(2, 1, &[1, 2, 3]).unwrap();
        assert_eq!(img.data(), &[1u8, 2, 3, 1, 2, 3]);
        assert_eq!(img.channels(), 3);
    }
}
