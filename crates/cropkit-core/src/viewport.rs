//! Mapping between native image pixels and the on-screen fit rectangle.
//!
//! The image is drawn letterboxed or pillarboxed inside the viewport: scaled
//! uniformly until one side touches the viewport, then centered along the
//! other axis.
//!
//! # Algorithm
//!
//! ```text
//! viewport_ratio = vh / vw
//! image_ratio    = ih / iw
//!
//! viewport_ratio > image_ratio  =>  fit_w = vw,            fit_h = vw * image_ratio
//! otherwise                     =>  fit_w = vh / image_ratio, fit_h = vh
//! ```
//!
//! Degenerate input (zero-area or non-finite image) is not handled here and may
//! produce zero-area or NaN output. Guard with [`Dimensions::is_valid`] first.

use crate::geometry::{Dimensions, NormalizedCropSpec, Rect};

/// Compute the fit rectangle for `image` inside a viewport anchored at (0, 0).
///
/// # Example
///
/// ```
/// use cropkit_core::geometry::Dimensions;
/// use cropkit_core::viewport::compute_fit_rect;
///
/// let fit = compute_fit_rect(Dimensions::new(400.0, 800.0), Dimensions::new(1000.0, 2000.0));
/// assert_eq!(fit.width, 400.0);
/// assert_eq!(fit.height, 800.0);
/// ```
pub fn compute_fit_rect(viewport: Dimensions, image: Dimensions) -> Rect {
    fit_rect_in(Rect::from_size(viewport), image)
}

/// Compute the fit rectangle for `image` inside an arbitrary viewport
/// rectangle, in the same coordinate space as `bounds`.
pub fn fit_rect_in(bounds: Rect, image: Dimensions) -> Rect {
    let viewport_ratio = bounds.height / bounds.width;
    let image_ratio = image.ratio();

    let (fit_width, fit_height) = if viewport_ratio > image_ratio {
        // Viewport is relatively taller: width-constrained
        (bounds.width, bounds.width * image_ratio)
    } else {
        (bounds.height / image_ratio, bounds.height)
    };

    Rect {
        x: bounds.x + (bounds.width - fit_width) / 2.0,
        y: bounds.y + (bounds.height - fit_height) / 2.0,
        width: fit_width,
        height: fit_height,
    }
}

/// Map a screen-space rectangle onto image pixel space.
///
/// Each component is interpolated independently and clamped to the image:
///
/// ```text
/// x      = (sx - fit.x) / fit.w * iw      clamped to [0, iw]
/// y      = (sy - fit.y) / fit.h * ih      clamped to [0, ih]
/// width  =  sw / fit.w * iw               clamped to [0, iw]
/// height =  sh / fit.h * ih               clamped to [0, ih]
/// ```
///
/// Mapping the fit rectangle itself yields the full image.
pub fn to_image_coordinates(screen: &Rect, fit: &Rect, image: Dimensions) -> NormalizedCropSpec {
    let scale_x = image.width / fit.width;
    let scale_y = image.height / fit.height;

    NormalizedCropSpec {
        origin_x: clamp_to_extent((screen.x - fit.x) * scale_x, image.width),
        origin_y: clamp_to_extent((screen.y - fit.y) * scale_y, image.height),
        width: clamp_to_extent(screen.width * scale_x, image.width),
        height: clamp_to_extent(screen.height * scale_y, image.height),
    }
}

/// Like `f64::clamp`, but a NaN or negative `extent` yields `0.0` instead of
/// panicking.
#[inline]
fn clamp_to_extent(value: f64, extent: f64) -> f64 {
    value.min(extent).max(0.0)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
