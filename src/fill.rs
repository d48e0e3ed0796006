//! Fill values for pixels introduced by padding and rotation.
//!
//! A [`Fill`] is resolved against the image channel count into a
//! [`ResolvedFill`] before any pixel is touched. Images with 2 or 4 channels
//! are treated as carrying a trailing alpha channel.

use crate::image::MAX_CHANNELS;
use crate::util::{RotrajError, RotrajResult};
use std::fmt;
use std::str::FromStr;

/// Named fill constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NamedFill {
    /// Zero intensity, opaque.
    #[default]
    Black,
    /// Full intensity, opaque.
    White,
    /// Mid intensity (128), opaque.
    Gray,
    /// Zero intensity with zero alpha; only valid for images with alpha.
    Transparent,
}

impl NamedFill {
    /// Returns the lowercase name of the constant.
    pub fn as_str(&self) -> &'static str {
        match self {
            NamedFill::Black => "black",
            NamedFill::White => "white",
            NamedFill::Gray => "gray",
            NamedFill::Transparent => "transparent",
        }
    }
}

impl fmt::Display for NamedFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedFill {
    type Err = RotrajError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(NamedFill::Black),
            "white" => Ok(NamedFill::White),
            "gray" | "grey" => Ok(NamedFill::Gray),
            "transparent" => Ok(NamedFill::Transparent),
            _ => Err(RotrajError::InvalidConfig {
                reason: "unknown fill name (expected black, white, gray or transparent)",
            }),
        }
    }
}

/// Fill specification used for out-of-bounds pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fill {
    /// One value broadcast to every channel.
    Scalar(u8),
    /// One value per channel. For images with alpha the alpha value may be
    /// omitted, in which case it is opaque.
    PerChannel(Vec<u8>),
    /// A named constant.
    Named(NamedFill),
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Named(NamedFill::Black)
    }
}

impl From<u8> for Fill {
    fn from(value: u8) -> Self {
        Fill::Scalar(value)
    }
}

impl From<NamedFill> for Fill {
    fn from(value: NamedFill) -> Self {
        Fill::Named(value)
    }
}

impl From<Vec<u8>> for Fill {
    fn from(value: Vec<u8>) -> Self {
        Fill::PerChannel(value)
    }
}

impl<const N: usize> From<[u8; N]> for Fill {
    fn from(value: [u8; N]) -> Self {
        Fill::PerChannel(value.to_vec())
    }
}

impl Fill {
    /// Checks the parts of the fill that do not depend on the image.
    pub fn validate(&self) -> RotrajResult<()> {
        if let Fill::PerChannel(values) = self {
            if values.is_empty() || values.len() > MAX_CHANNELS {
                return Err(RotrajError::InvalidConfig {
                    reason: "per-channel fill must have 1 to 4 values",
                });
            }
        }
        Ok(())
    }

    /// Resolves the fill to concrete samples for a `channels`-deep image.
    pub fn resolve(&self, channels: usize) -> RotrajResult<ResolvedFill> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(RotrajError::InvalidChannels { channels });
        }
        let has_alpha = channels == 2 || channels == 4;
        let mut samples = [0u8; MAX_CHANNELS];
        match self {
            Fill::Scalar(value) => samples[..channels].fill(*value),
            Fill::PerChannel(values) => {
                if values.len() == channels {
                    samples[..channels].copy_from_slice(values);
                } else if has_alpha && values.len() + 1 == channels {
                    samples[..values.len()].copy_from_slice(values);
                    samples[channels - 1] = u8::MAX;
                } else {
                    return Err(RotrajError::FillMismatch {
                        fill_len: values.len(),
                        channels,
                    });
                }
            }
            Fill::Named(name) => {
                let (intensity, alpha) = match name {
                    NamedFill::Black => (0, u8::MAX),
                    NamedFill::White => (u8::MAX, u8::MAX),
                    NamedFill::Gray => (128, u8::MAX),
                    NamedFill::Transparent => {
                        if !has_alpha {
                            return Err(RotrajError::UnsupportedFill {
                                fill: name.as_str(),
                                channels,
                            });
                        }
                        (0, 0)
                    }
                };
                samples[..channels].fill(intensity);
                if has_alpha {
                    samples[channels - 1] = alpha;
                }
            }
        }
        Ok(ResolvedFill { samples, channels })
    }
}

/// A fill resolved to one sample per image channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedFill {
    samples: [u8; MAX_CHANNELS],
    channels: usize,
}

impl ResolvedFill {
    /// Returns the per-channel samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.samples[..self.channels]
    }

    /// Returns the channel count this fill was resolved for.
    pub fn channels(&self) -> usize {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::{Fill, NamedFill};
    use crate::util::{ErrorKind, RotrajError};

    #[test]
    fn scalar_broadcasts_to_all_channels() {
        let fill = Fill::Scalar(7).resolve(3).unwrap();
        assert_eq!(fill.as_slice(), &[7u8, 7, 7]);
    }

    #[test]
    fn named_fills_respect_alpha() {
        assert_eq!(Fill::default().resolve(1).unwrap().as_slice(), &[0u8]);
        assert_eq!(
            Fill::Named(NamedFill::Black).resolve(4).unwrap().as_slice(),
            &[0u8, 0, 0, 255]
        );
        assert_eq!(
            Fill::Named(NamedFill::White).resolve(2).unwrap().as_slice(),
            &[255u8, 255]
        );
        assert_eq!(
            Fill::Named(NamedFill::Transparent)
                .resolve(4)
                .unwrap()
                .as_slice(),
            &[0u8, 0, 0, 0]
        );
        let err = Fill::Named(NamedFill::Transparent).resolve(3).unwrap_err();
        assert_eq!(
            err,
            RotrajError::UnsupportedFill {
                fill: "transparent",
                channels: 3,
            }
        );
    }

    #[test]
    fn per_channel_fill_must_match_depth() {
        let fill = Fill::from([10u8, 20, 30]);
        assert_eq!(fill.resolve(3).unwrap().as_slice(), &[10u8, 20, 30]);
        assert_eq!(fill.resolve(4).unwrap().as_slice(), &[10u8, 20, 30, 255]);
        let err = fill.resolve(1).unwrap_err();
        assert_eq!(
            err,
            RotrajError::FillMismatch {
                fill_len: 3,
                channels: 1,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn validate_rejects_empty_and_oversized_tuples() {
        assert!(Fill::PerChannel(Vec::new()).validate().is_err());
        assert!(Fill::PerChannel(vec![0; 5]).validate().is_err());
        assert!(Fill::PerChannel(vec![0; 4]).validate().is_ok());
    }

    #[test]
    fn named_fill_parses_case_insensitively() {
        assert_eq!("Black".parse::<NamedFill>().unwrap(), NamedFill::Black);
        assert_eq!(" grey ".parse::<NamedFill>().unwrap(), NamedFill::Gray);
        assert!("purple".parse::<NamedFill>().is_err());
    }
}
