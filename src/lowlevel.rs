//! Building blocks of the per-frame transform.
//!
//! These expose the padding, expansion and rotation steps individually for
//! callers that want to inspect intermediates. Most users should prefer
//! `TrajectoryGenerator`.

pub use crate::geometry::rotated_bounds;
pub use crate::image::expand;
pub use crate::rotate::rotate_u8;
