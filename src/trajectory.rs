//! Rotation trajectories: one image rotated over an evenly sampled angle range
//! and stacked into a single frame-major tensor.
//!
//! Every frame is produced by the same three steps: pad the image so the
//! rotation cannot push content off the canvas, rotate about the padded
//! center, then crop the original window back out. The output buffer is
//! allocated once and each frame is written into its own slot, so frames are
//! independent and may be rendered in parallel.

use crate::angles::AngleSchedule;
use crate::fill::{Fill, ResolvedFill};
use crate::geometry::{Padding, PaddingMode};
use crate::image::{expand, ImageView, OwnedImage};
use crate::rotate::{rotate_u8, Interpolation};
use crate::trace::{trace_event, trace_span};
use crate::util::{RotrajError, RotrajResult};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Axis order of the trajectory tensor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TensorLayout {
    /// `[frames, channels, height, width]`, planar frames.
    #[default]
    Nchw,
    /// `[frames, height, width, channels]`, interleaved frames.
    Nhwc,
}

/// Configuration for generating a rotation trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryConfig {
    /// Angle range `(min, max)` in degrees; `max` itself is never sampled.
    pub angle_range: (f64, f64),
    /// Number of frames (sampled angles).
    pub sample_count: usize,
    /// Value for pixels introduced by padding and rotation.
    pub fill: Fill,
    /// Resampling filter for the rotation.
    pub interpolation: Interpolation,
    /// Padding strategy before rotating.
    pub padding: PaddingMode,
    /// Axis order of the output tensor.
    pub layout: TensorLayout,
    /// Render frames on the rayon thread pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            angle_range: (-180.0, 180.0),
            sample_count: 100,
            fill: Fill::default(),
            interpolation: Interpolation::Bicubic,
            padding: PaddingMode::Uniform,
            layout: TensorLayout::Nchw,
            parallel: false,
        }
    }
}

impl TrajectoryConfig {
    /// Validates the configuration independently of any image.
    pub fn validate(&self) -> RotrajResult<()> {
        self.schedule()?;
        self.fill.validate()?;
        if self.parallel && !cfg!(feature = "rayon") {
            return Err(RotrajError::InvalidConfig {
                reason: "parallel generation requires the `rayon` feature",
            });
        }
        Ok(())
    }

    /// Builds the angle schedule described by this configuration.
    pub fn schedule(&self) -> RotrajResult<AngleSchedule> {
        let (min_deg, max_deg) = self.angle_range;
        AngleSchedule::new(min_deg, max_deg, self.sample_count)
    }
}

/// Stateless generator of rotation trajectories for a fixed configuration.
#[derive(Clone, Debug)]
pub struct TrajectoryGenerator {
    cfg: TrajectoryConfig,
    schedule: AngleSchedule,
}

impl TrajectoryGenerator {
    /// Validates `cfg` and builds a generator.
    pub fn new(cfg: TrajectoryConfig) -> RotrajResult<Self> {
        cfg.validate()?;
        let schedule = cfg.schedule()?;
        Ok(Self { cfg, schedule })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TrajectoryConfig {
        &self.cfg
    }

    /// Returns the sampled angles.
    pub fn schedule(&self) -> &AngleSchedule {
        &self.schedule
    }

    /// Generates the trajectory for `image`.
    ///
    /// The fill is resolved against the image channel count before any frame
    /// is rendered; on error no partial trajectory is produced.
    pub fn generate(&self, image: ImageView<'_, u8>) -> RotrajResult<Trajectory> {
        let fill = self.cfg.fill.resolve(image.channels())?;
        let (width, height, channels) = (image.width(), image.height(), image.channels());
        let frames = self.schedule.len();
        let frame_len = width * height * channels;
        let total = frame_len
            .checked_mul(frames)
            .ok_or(RotrajError::InvalidDimensions { width, height })?;

        let _span = trace_span!(
            "trajectory",
            frames = frames,
            width = width,
            height = height,
            channels = channels,
            parallel = self.cfg.parallel
        )
        .entered();

        let mut data = vec![0u8; total];
        let paddings = self.render_all(image, &fill, &mut data, frame_len)?;

        Ok(Trajectory {
            data,
            frames,
            width,
            height,
            channels,
            layout: self.cfg.layout,
            angles: self.schedule.to_vec(),
            paddings,
        })
    }

    /// Renders a single rotated frame as an interleaved image.
    pub fn render_frame(
        &self,
        image: ImageView<'_, u8>,
        angle_deg: f64,
    ) -> RotrajResult<(OwnedImage, Padding)> {
        let fill = self.cfg.fill.resolve(image.channels())?;
        let mut slot = vec![0u8; image.width() * image.height() * image.channels()];
        let padding = self.render_into(image, angle_deg, &fill, TensorLayout::Nhwc, &mut slot)?;
        let frame = OwnedImage::from_parts(slot, image.width(), image.height(), image.channels());
        Ok((frame, padding))
    }

    #[cfg(feature = "rayon")]
    fn render_all(
        &self,
        image: ImageView<'_, u8>,
        fill: &ResolvedFill,
        data: &mut [u8],
        frame_len: usize,
    ) -> RotrajResult<Vec<Padding>> {
        if self.cfg.parallel {
            return data
                .par_chunks_mut(frame_len)
                .enumerate()
                .map(|(idx, slot)| {
                    let angle = self.schedule.angle_at(idx);
                    self.render_into(image, angle, fill, self.cfg.layout, slot)
                })
                .collect();
        }
        self.render_all_seq(image, fill, data, frame_len)
    }

    #[cfg(not(feature = "rayon"))]
    fn render_all(
        &self,
        image: ImageView<'_, u8>,
        fill: &ResolvedFill,
        data: &mut [u8],
        frame_len: usize,
    ) -> RotrajResult<Vec<Padding>> {
        self.render_all_seq(image, fill, data, frame_len)
    }

    fn render_all_seq(
        &self,
        image: ImageView<'_, u8>,
        fill: &ResolvedFill,
        data: &mut [u8],
        frame_len: usize,
    ) -> RotrajResult<Vec<Padding>> {
        let mut paddings = Vec::with_capacity(self.schedule.len());
        for (angle, slot) in self.schedule.iter().zip(data.chunks_mut(frame_len)) {
            paddings.push(self.render_into(image, angle, fill, self.cfg.layout, slot)?);
        }
        Ok(paddings)
    }

    fn render_into(
        &self,
        image: ImageView<'_, u8>,
        angle_deg: f64,
        fill: &ResolvedFill,
        layout: TensorLayout,
        slot: &mut [u8],
    ) -> RotrajResult<Padding> {
        let (width, height) = (image.width(), image.height());
        let padding = Padding::for_angle(width, height, angle_deg, self.cfg.padding);
        debug_assert!(padding.covers_rotation(width, height, angle_deg));
        trace_event!(
            "frame",
            angle_deg = angle_deg,
            pad_x = padding.left,
            pad_y = padding.top
        );

        let padded = expand(image, padding, fill)?;
        let rotated = rotate_u8(padded.view(), angle_deg, fill, self.cfg.interpolation)?;
        let crop = rotated.view().roi(padding.left, padding.top, width, height)?;
        write_frame(crop, layout, slot);
        Ok(padding)
    }
}

/// Generates a trajectory for `image` with a one-off generator.
pub fn generate(image: ImageView<'_, u8>, cfg: TrajectoryConfig) -> RotrajResult<Trajectory> {
    TrajectoryGenerator::new(cfg)?.generate(image)
}

fn write_frame(crop: ImageView<'_, u8>, layout: TensorLayout, slot: &mut [u8]) {
    let (width, height, channels) = (crop.width(), crop.height(), crop.channels());
    let row_len = width * channels;
    let plane_len = width * height;
    for y in 0..height {
        let Some(row) = crop.row(y) else {
            continue;
        };
        match layout {
            TensorLayout::Nhwc => {
                slot[y * row_len..(y + 1) * row_len].copy_from_slice(row);
            }
            TensorLayout::Nchw => {
                for (x, px) in row.chunks_exact(channels).enumerate() {
                    for (c, &value) in px.iter().enumerate() {
                        slot[c * plane_len + y * width + x] = value;
                    }
                }
            }
        }
    }
}

/// A stack of equally sized frames, one per sampled angle, in angle order.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    data: Vec<u8>,
    frames: usize,
    width: usize,
    height: usize,
    channels: usize,
    layout: TensorLayout,
    angles: Vec<f64>,
    paddings: Vec<Padding>,
}

impl Trajectory {
    /// Returns the tensor shape in the order given by [`Trajectory::layout`].
    pub fn shape(&self) -> [usize; 4] {
        match self.layout {
            TensorLayout::Nchw => [self.frames, self.channels, self.height, self.width],
            TensorLayout::Nhwc => [self.frames, self.height, self.width, self.channels],
        }
    }

    /// Returns the number of frames.
    pub fn len(&self) -> usize {
        self.frames
    }

    /// Returns true if the trajectory has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the axis order of the tensor.
    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// Returns the angle (degrees) of every frame.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Returns the padding applied before rotating each frame.
    pub fn paddings(&self) -> &[Padding] {
        &self.paddings
    }

    /// Returns the number of samples in one frame.
    pub fn frame_len(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// Returns the raw samples of frame `idx` in the tensor layout.
    pub fn frame(&self, idx: usize) -> Option<&[u8]> {
        let len = self.frame_len();
        let start = idx.checked_mul(len)?;
        self.data.get(start..start.checked_add(len)?)
    }

    /// Returns frame `idx` as an interleaved image regardless of layout.
    pub fn frame_image(&self, idx: usize) -> Option<OwnedImage> {
        let frame = self.frame(idx)?;
        let data = match self.layout {
            TensorLayout::Nhwc => frame.to_vec(),
            TensorLayout::Nchw => {
                let plane_len = self.width * self.height;
                let mut data = Vec::with_capacity(frame.len());
                for p in 0..plane_len {
                    data.extend((0..self.channels).map(|c| frame[c * plane_len + p]));
                }
                data
            }
        };
        Some(OwnedImage::from_parts(
            data,
            self.width,
            self.height,
            self.channels,
        ))
    }

    /// Returns the whole tensor as a flat slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the trajectory and returns the flat tensor buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
