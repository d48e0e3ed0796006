//! Error types for rotraj.

use thiserror::Error;

/// Result alias for rotraj operations.
pub type Result<T> = std::result::Result<T, RotrajError>;

/// Broad category of a [`RotrajError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The trajectory configuration or fill specification is unusable.
    Configuration,
    /// The input image is malformed or has zero extent.
    Image,
    /// Reading or writing an image file failed.
    Io,
}

/// Errors that can occur when generating rotation trajectories.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RotrajError {
    /// The configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
    /// A per-channel fill does not match the image channel count.
    #[error("fill has {fill_len} values but the image has {channels} channels")]
    FillMismatch { fill_len: usize, channels: usize },
    /// A named fill has no meaning for the image channel count.
    #[error("fill `{fill}` is not supported for {channels}-channel images")]
    UnsupportedFill { fill: &'static str, channels: usize },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Channel count is outside `1..=4`.
    #[error("invalid channel count: {channels}")]
    InvalidChannels { channels: usize },
    /// Row stride is shorter than one row of samples.
    #[error("invalid stride {stride} for width {width} with {channels} channels")]
    InvalidStride {
        width: usize,
        channels: usize,
        stride: usize,
    },
    /// Backing buffer is too small for the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside the image.
    #[error("roi ({x}, {y}, {width}x{height}) out of bounds for {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Image decoding or encoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

impl RotrajError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } | Self::FillMismatch { .. } | Self::UnsupportedFill { .. } => {
                ErrorKind::Configuration
            }
            Self::InvalidDimensions { .. }
            | Self::InvalidChannels { .. }
            | Self::InvalidStride { .. }
            | Self::BufferTooSmall { .. }
            | Self::RoiOutOfBounds { .. } => ErrorKind::Image,
            Self::ImageIo { .. } => ErrorKind::Io,
        }
    }
}
