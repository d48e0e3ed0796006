//! Image views, owned buffers and padding.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer of interleaved samples
//! with an explicit stride. The stride counts elements between the starts of
//! consecutive rows, so a stride larger than `width * channels` represents
//! padded rows. ROI slices are zero-copy views into the same backing slice and
//! retain the original stride.

use crate::util::{RotrajError, RotrajResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;
mod pad;

pub use owned::OwnedImage;
pub use pad::expand;

/// Largest supported channel count (RGBA).
pub const MAX_CHANNELS: usize = 4;

/// Borrowed 2D interleaved image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> RotrajResult<Self> {
        let stride = width
            .checked_mul(channels)
            .ok_or(RotrajError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, channels, stride)
    }

    /// Creates a view with an explicit stride (in elements).
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> RotrajResult<Self> {
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(RotrajError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the sample of channel `c` at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<&'a T> {
        if c >= self.channels {
            return None;
        }
        self.pixel(x, y).and_then(|px| px.get(c))
    }

    /// Returns all channel samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [T]> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let start = x * self.channels;
        row.get(start..start + self.channels)
    }

    /// Returns the interleaved samples of row `y` (`width * channels` long).
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> RotrajResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(RotrajError::InvalidDimensions { width, height });
        }

        let out_of_bounds = RotrajError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x * self.channels))
            .ok_or(RotrajError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(RotrajError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.channels, self.stride)
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> RotrajResult<usize> {
    if width == 0 || height == 0 {
        return Err(RotrajError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(RotrajError::InvalidChannels { channels });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(RotrajError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(RotrajError::InvalidStride {
            width,
            channels,
            stride,
        });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(RotrajError::InvalidDimensions { width, height })
}
