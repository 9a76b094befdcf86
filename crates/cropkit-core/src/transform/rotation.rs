//! Lossless quarter-turn rotation.

use serde::{Deserialize, Serialize};

use crate::error::ProcessError;
use crate::raster::DecodedImage;

/// A 90-degree rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuarterTurn {
    /// Counter-clockwise, -90 degrees
    Left,
    /// Clockwise, +90 degrees
    Right,
}

impl QuarterTurn {
    /// Signed angle in degrees, clockwise positive.
    pub fn degrees(self) -> i32 {
        match self {
            QuarterTurn::Left => -90,
            QuarterTurn::Right => 90,
        }
    }

    /// Parse a signed angle. Only -90 and 90 are quarter turns.
    pub fn from_degrees(degrees: i32) -> Option<QuarterTurn> {
        match degrees {
            -90 => Some(QuarterTurn::Left),
            90 => Some(QuarterTurn::Right),
            _ => None,
        }
    }
}

/// Rotate the whole image by a quarter turn. Width and height swap.
///
/// # Errors
///
/// Returns `ProcessError::InvalidImage` if the pixel buffer does not match
/// the declared dimensions.
pub fn rotate_quarter(
    image: &DecodedImage,
    turn: QuarterTurn,
) -> Result<DecodedImage, ProcessError> {
    let rgb = image.to_rgb_image().ok_or_else(|| {
        ProcessError::InvalidImage(format!(
            "buffer of {} bytes for {}x{} image",
            image.pixels.len(),
            image.width,
            image.height
        ))
    })?;

    let rotated = match turn {
        QuarterTurn::Left => image::imageops::rotate270(&rgb),
        QuarterTurn::Right => image::imageops::rotate90(&rgb),
    };
    Ok(DecodedImage::from_rgb_image(rotated))
}
