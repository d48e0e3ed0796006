//! Loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Channel depth is kept:
//! grayscale, grayscale+alpha, RGB and RGBA load as 1, 2, 3 and 4 channels;
//! wider sample types are narrowed to 8 bits.

use crate::image::{ImageView, OwnedImage};
use crate::util::{RotrajError, RotrajResult};
use image::{ColorType, DynamicImage};
use std::path::Path;

/// Creates an owned 8-bit image from a decoded dynamic image.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> RotrajResult<OwnedImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let (data, channels) = match img.color().channel_count() {
        1 => (img.to_luma8().into_raw(), 1),
        2 => (img.to_luma_alpha8().into_raw(), 2),
        3 => (img.to_rgb8().into_raw(), 3),
        _ => (img.to_rgba8().into_raw(), 4),
    };
    OwnedImage::new(data, width, height, channels)
}

/// Loads an image from disk.
pub fn load_image<P: AsRef<Path>>(path: P) -> RotrajResult<OwnedImage> {
    let img = image::open(path).map_err(|err| RotrajError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Saves a view to disk; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(path: P, img: ImageView<'_, u8>) -> RotrajResult<()> {
    let color = match img.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        channels => return Err(RotrajError::InvalidChannels { channels }),
    };
    let owned;
    let contiguous = if img.stride() == img.width() * img.channels() {
        img.as_slice()
            .get(..img.stride() * img.height())
            .ok_or(RotrajError::BufferTooSmall {
                needed: img.stride() * img.height(),
                got: img.as_slice().len(),
            })?
    } else {
        owned = OwnedImage::from_view(img)?;
        owned.data()
    };
    let width = u32::try_from(img.width()).map_err(|_| RotrajError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| RotrajError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    image::save_buffer(path, contiguous, width, height, color).map_err(|err| {
        RotrajError::ImageIo {
            reason: err.to_string(),
        }
    })
}
