//! Pixel-level image operations backing [`PixelProcessor`].
//!
//! These are the reference implementations of the two operations an edit
//! session asks of its image processor: quarter-turn rotation and cropping to
//! a [`NormalizedCropSpec`](crate::geometry::NormalizedCropSpec). Hosts that
//! manipulate images natively implement
//! [`ImageProcessor`](crate::session::ImageProcessor) themselves instead.
//!
//! # Coordinate System
//!
//! - Crop specs are in image pixels, origin at the top-left corner
//! - `QuarterTurn::Right` is clockwise as seen on screen

mod crop;
mod rotation;

pub use crop::crop_pixels;
pub use rotation::{rotate_quarter, QuarterTurn};

use crate::error::ProcessError;
use crate::geometry::{Dimensions, NormalizedCropSpec};
use crate::raster::DecodedImage;
use crate::session::{EditableImage, ImageProcessor};

impl EditableImage for DecodedImage {
    fn dimensions(&self) -> Dimensions {
        DecodedImage::dimensions(self)
    }
}

/// In-process processor operating on [`DecodedImage`] buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelProcessor;

impl ImageProcessor<DecodedImage> for PixelProcessor {
    fn rotate(
        &mut self,
        image: &DecodedImage,
        turn: QuarterTurn,
    ) -> Result<DecodedImage, ProcessError> {
        rotate_quarter(image, turn)
    }

    fn crop(
        &mut self,
        image: &DecodedImage,
        spec: &NormalizedCropSpec,
    ) -> Result<DecodedImage, ProcessError> {
        crop_pixels(image, spec)
    }
}
