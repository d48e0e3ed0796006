//! Evenly spaced angle sampling over a half-open range.

use crate::util::{RotrajError, RotrajResult};

/// `count` angles in degrees evenly spaced over `[min_deg, max_deg)`.
///
/// Sample `i` is `min_deg + i * (max_deg - min_deg) / count`. The upper bound
/// is never produced; with `min_deg == max_deg` every sample equals
/// `min_deg`.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleSchedule {
    min_deg: f64,
    max_deg: f64,
    len: usize,
}

impl AngleSchedule {
    /// Creates a schedule over `[min_deg, max_deg)` with `count` samples.
    pub fn new(min_deg: f64, max_deg: f64, count: usize) -> RotrajResult<Self> {
        if !min_deg.is_finite() || !max_deg.is_finite() {
            return Err(RotrajError::InvalidConfig {
                reason: "angle range must be finite",
            });
        }
        if min_deg > max_deg {
            return Err(RotrajError::InvalidConfig {
                reason: "angle range min must not exceed max",
            });
        }
        if count == 0 {
            return Err(RotrajError::InvalidConfig {
                reason: "sample_count must be >= 1",
            });
        }
        Ok(Self {
            min_deg,
            max_deg,
            len: count,
        })
    }

    /// Returns the number of sampled angles.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a schedule holds at least one angle.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first (inclusive) angle in degrees.
    pub fn min_deg(&self) -> f64 {
        self.min_deg
    }

    /// Returns the exclusive upper bound in degrees.
    pub fn max_deg(&self) -> f64 {
        self.max_deg
    }

    /// Returns the spacing between consecutive samples in degrees.
    pub fn step_deg(&self) -> f64 {
        (self.max_deg - self.min_deg) / self.len as f64
    }

    /// Returns the angle for sample `idx`.
    pub fn angle_at(&self, idx: usize) -> f64 {
        debug_assert!(idx < self.len);
        self.min_deg + idx as f64 * (self.max_deg - self.min_deg) / self.len as f64
    }

    /// Iterates over all sampled angles in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|idx| self.angle_at(idx))
    }

    /// Collects the sampled angles.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::AngleSchedule;
    use crate::util::RotrajError;

    #[test]
    fn full_circle_in_quarters_excludes_upper_bound() {
        let schedule = AngleSchedule::new(-180.0, 180.0, 4).unwrap();
        assert_eq!(schedule.to_vec(), vec![-180.0, -90.0, 0.0, 90.0]);
        assert_eq!(schedule.step_deg(), 90.0);
    }

    #[test]
    fn single_sample_is_range_min() {
        let schedule = AngleSchedule::new(15.0, 75.0, 1).unwrap();
        assert_eq!(schedule.to_vec(), vec![15.0]);
    }

    #[test]
    fn degenerate_range_repeats_min() {
        let schedule = AngleSchedule::new(30.0, 30.0, 3).unwrap();
        assert_eq!(schedule.to_vec(), vec![30.0, 30.0, 30.0]);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            AngleSchedule::new(10.0, -10.0, 4).unwrap_err(),
            RotrajError::InvalidConfig {
                reason: "angle range min must not exceed max",
            }
        );
        assert!(AngleSchedule::new(0.0, 90.0, 0).is_err());
        assert!(AngleSchedule::new(f64::NAN, 90.0, 2).is_err());
        assert!(AngleSchedule::new(0.0, f64::INFINITY, 2).is_err());
    }
}
