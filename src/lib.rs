//! rotraj turns one image into a rotation trajectory: a stack of frames
//! showing the image rotated over an evenly sampled angle range.
//!
//! Each frame is padded just enough that the rotation never clips content,
//! rotated with a bicubic filter, and cropped back to the original size.
//! Frames are written into a pre-allocated `[frames, channels, height,
//! width]` tensor in angle order. Parallel rendering is available through the
//! `rayon` feature and file loading through `image-io`.
//!
//! ```
//! use rotraj::{ImageView, TrajectoryConfig, TrajectoryGenerator};
//!
//! let pixels = vec![0u8; 8 * 6];
//! let image = ImageView::from_slice(&pixels, 8, 6, 1).unwrap();
//! let generator = TrajectoryGenerator::new(TrajectoryConfig {
//!     sample_count: 12,
//!     ..TrajectoryConfig::default()
//! })
//! .unwrap();
//! let trajectory = generator.generate(image).unwrap();
//! assert_eq!(trajectory.shape(), [12, 1, 6, 8]);
//! ```

pub mod angles;
pub mod fill;
pub mod geometry;
pub mod image;
pub mod lowlevel;
pub mod rotate;
pub(crate) mod trace;
pub mod trajectory;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use angles::AngleSchedule;
pub use fill::{Fill, NamedFill, ResolvedFill};
pub use geometry::{Padding, PaddingMode};
pub use crate::image::{ImageView, OwnedImage};
pub use rotate::Interpolation;
pub use trajectory::{generate, TensorLayout, Trajectory, TrajectoryConfig, TrajectoryGenerator};
pub use util::{ErrorKind, RotrajError, RotrajResult};
