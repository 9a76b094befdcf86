//! Cropping to a pixel-unit crop spec.

use crate::error::ProcessError;
use crate::geometry::NormalizedCropSpec;
use crate::raster::DecodedImage;

/// Crop `image` to the region described by `spec`.
///
/// # Behavior
///
/// - Spec values are rounded to whole pixels
/// - The region is clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
/// - A spec covering the whole image returns a copy of the original
///
/// # Errors
///
/// Returns `ProcessError::InvalidImage` for an empty image or a pixel buffer
/// that does not match the declared dimensions.
pub fn crop_pixels(
    image: &DecodedImage,
    spec: &NormalizedCropSpec,
) -> Result<DecodedImage, ProcessError> {
    if image.is_empty() || image.pixels.len() != (image.width * image.height * 3) as usize {
        return Err(ProcessError::InvalidImage(format!(
            "{}x{} image with {} bytes",
            image.width,
            image.height,
            image.pixels.len()
        )));
    }

    let px_left = to_pixels(spec.origin_x).min(image.width - 1);
    let px_top = to_pixels(spec.origin_y).min(image.height - 1);
    let px_right = (px_left + to_pixels(spec.width)).min(image.width);
    let px_bottom = (px_top + to_pixels(spec.height)).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    if out_width == image.width && out_height == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in px_top..px_top + out_height {
        let start = y as usize * src_stride + px_left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(DecodedImage::new(out_width, out_height, output))
}

/// Round a non-negative pixel coordinate; negatives and NaN become 0.
#[inline]
fn to_pixels(value: f64) -> u32 {
    value.max(0.0).round() as u32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
